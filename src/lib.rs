#![doc = include_str!("../README.md")]

pub mod chart;
pub mod error;
pub mod month;
pub mod report;
pub mod sample;

pub use chart::{Backend, ChartRenderer, RenderOutcome};
pub use error::{Result, RevenueError};
pub use month::MonthKey;
pub use report::{MonthlyReport, MonthlySeries, RawRecord};
pub use sample::generate_sample;

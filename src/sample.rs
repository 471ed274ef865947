use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::Result;

/// Lower bound of generated monthly revenue values.
pub const MIN_REVENUE: f64 = 1_000.0;
/// Upper bound of generated monthly revenue values.
pub const MAX_REVENUE: f64 = 50_000.0;

#[derive(Debug, Serialize)]
struct SampleRow {
    date: String,
    revenue: f64,
}

/// Writes a sample revenue CSV to `path` and returns the path written.
///
/// The file has a `date,revenue` header and one row per consecutive month,
/// starting in January of `start_year` and rolling over year boundaries.
/// Each row carries a random day of month (1 to 28, so every date is
/// valid) and a random revenue between 1,000 and 50,000, rounded to two
/// decimals. Randomness is unseeded; the only guarantee is that the output
/// always parses cleanly through [`crate::MonthlyReport`].
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns any error from creating directories or writing the file.
pub fn generate_sample(path: impl AsRef<Path>, start_year: i32, months: u32) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(path)?;
    let mut rng = rand::thread_rng();
    for offset in 0..months {
        let year = start_year + (offset / 12) as i32;
        let month = offset % 12 + 1;
        let day = rng.gen_range(1..=28);
        let revenue = (rng.gen_range(MIN_REVENUE..=MAX_REVENUE) * 100.0).round() / 100.0;
        wtr.serialize(SampleRow {
            date: format!("{year:04}-{month:02}-{day:02}"),
            revenue,
        })?;
    }
    wtr.flush()?;
    debug!("wrote {months} sample rows to {}", path.display());
    Ok(path.to_path_buf())
}

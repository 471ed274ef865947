use std::path::PathBuf;

use thiserror::Error;

/// All errors produced while aggregating or charting revenue data.
#[derive(Debug, Error)]
pub enum RevenueError {
    /// The input file could not be opened or read.
    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV header lacks a required column.
    #[error("input is missing a {0:?} column")]
    MissingColumn(&'static str),

    /// A date string matched none of the accepted formats.
    #[error("unrecognised date {0:?} (expected a form like 2023-05-17)")]
    DateFormat(String),

    /// A revenue value was not numeric after stripping separators.
    #[error("invalid revenue amount {0:?}")]
    BadNumber(String),

    /// A row could not be parsed; the whole aggregation is abandoned.
    #[error("row {line}")]
    RowParse {
        line: usize,
        #[source]
        source: Box<RevenueError>,
    },

    /// This build carries no drawing backend; textual output still works.
    #[error("charting is not available in this build (enable the `plot` feature)")]
    RenderUnavailable,

    /// The drawing backend failed while producing or saving the chart.
    #[error("failed to render chart: {0}")]
    Render(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RevenueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_parse_chain_reports_line_then_cause() {
        let err = RevenueError::RowParse {
            line: 3,
            source: Box::new(RevenueError::DateFormat("17th May".into())),
        };
        let report = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(
            report,
            "row 3: unrecognised date \"17th May\" (expected a form like 2023-05-17)"
        );
    }

    #[test]
    fn messages_are_single_line() {
        let errors = [
            RevenueError::MissingColumn("revenue"),
            RevenueError::BadNumber("abc".into()),
            RevenueError::RenderUnavailable,
            RevenueError::Render("out of memory".into()),
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "multi-line: {err}");
        }
    }
}

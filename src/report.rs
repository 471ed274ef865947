use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{Result, RevenueError};
use crate::month::MonthKey;

/// One input row as read from the CSV, column name mapped to raw field.
pub type RawRecord = HashMap<String, String>;

/// Chronologically ordered monthly totals, the pipeline's final output.
pub type MonthlySeries = Vec<(MonthKey, f64)>;

/// Holds revenue totals aggregated by calendar month.
///
/// To create a new, empty report, use [`MonthlyReport::new`].
///
/// To add revenue data, use [`MonthlyReport::read_csv`] or
/// [`MonthlyReport::read_from`].
///
/// To get the ordered totals, use [`MonthlyReport::series`]; for a
/// printable summary, use its [`Display`] implementation.
///
/// Aggregation is all-or-nothing: the first malformed row abandons the
/// whole pass with an error naming the offending line, and no partial
/// totals are reported. A file with a valid header but no rows is not an
/// error; it yields an empty report.
#[derive(Debug, Default)]
pub struct MonthlyReport {
    totals: BTreeMap<MonthKey, f64>,
}

impl MonthlyReport {
    /// Creates a new, empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads revenue data from the CSV file at `path` and updates the report.
    ///
    /// The file must be UTF-8 with a header row containing `date` and
    /// `revenue` columns, in any order and any letter case; other columns
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RevenueError::FileRead`] if the file cannot be opened,
    /// [`RevenueError::MissingColumn`] if a required column is absent, and
    /// [`RevenueError::RowParse`] on the first row whose date or revenue
    /// does not parse.
    pub fn read_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RevenueError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from(file)
    }

    /// Reads revenue data in CSV form from `reader` and updates the report.
    ///
    /// Rows with a different field count than the header are tolerated:
    /// absent fields read as empty, extra fields are dropped. A row only
    /// fails when its date or revenue does not parse.
    ///
    /// On error the report is left untouched; a failed pass contributes no
    /// partial totals.
    ///
    /// # Errors
    ///
    /// As for [`MonthlyReport::read_csv`], minus the file-open failure.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let date_column = required_column(&headers, "date")?;
        let revenue_column = required_column(&headers, "revenue")?;

        let mut batch: BTreeMap<MonthKey, f64> = BTreeMap::new();
        let mut rows = 0;
        for (index, result) in rdr.records().enumerate() {
            // Line 1 is the header, so the first data row is line 2.
            let line = index + 2;
            let record = raw_record(&headers, &result?);
            let (month, amount) =
                parse_row(&record, &date_column, &revenue_column).map_err(|source| {
                    RevenueError::RowParse {
                        line,
                        source: Box::new(source),
                    }
                })?;
            *batch.entry(month).or_insert(0.0) += amount;
            rows += 1;
        }
        for (month, amount) in batch {
            *self.totals.entry(month).or_insert(0.0) += amount;
        }
        debug!("aggregated {rows} rows into {} months", self.totals.len());
        Ok(())
    }

    /// Returns the monthly totals in chronological order, earliest first.
    #[must_use]
    pub fn series(&self) -> MonthlySeries {
        self.totals
            .iter()
            .map(|(&month, &total)| (month, total))
            .collect()
    }

    /// Reports whether any revenue has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl Display for MonthlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.totals.is_empty() {
            return writeln!(f, "no revenue data.");
        }
        writeln!(f, "{:7} {:>12}", "Month", "Revenue")?;
        writeln!(f, "{:-<20}", "")?;
        let mut grand_total = 0.0;
        for (month, total) in &self.totals {
            writeln!(f, "{month} {total:>12.2}")?;
            grand_total += total;
        }
        writeln!(f, "{:-<20}", "")?;
        writeln!(f, "{:7} {grand_total:>12.2}", "Total")?;
        Ok(())
    }
}

/// Finds `name` in the header, ignoring case and surrounding whitespace,
/// and returns the column's actual spelling for row lookups.
fn required_column(headers: &csv::StringRecord, name: &'static str) -> Result<String> {
    headers
        .iter()
        .find(|header| header.trim().eq_ignore_ascii_case(name))
        .map(str::to_string)
        .ok_or(RevenueError::MissingColumn(name))
}

/// Pairs header names with a row's fields, padding short rows with empty
/// strings and dropping fields beyond the header.
fn raw_record(headers: &csv::StringRecord, record: &csv::StringRecord) -> RawRecord {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            (
                header.to_string(),
                record.get(index).unwrap_or("").to_string(),
            )
        })
        .collect()
}

fn parse_row(
    record: &RawRecord,
    date_column: &str,
    revenue_column: &str,
) -> Result<(MonthKey, f64)> {
    let date = record.get(date_column).map(String::as_str).unwrap_or("");
    let month: MonthKey = date.parse()?;
    let revenue = record.get(revenue_column).map(String::as_str).unwrap_or("");
    Ok((month, parse_amount(revenue)?))
}

/// Parses a revenue amount, tolerating thousands-separator commas.
fn parse_amount(text: &str) -> Result<f64> {
    text.replace(',', "")
        .trim()
        .parse()
        .map_err(|_| RevenueError::BadNumber(text.to_string()))
}

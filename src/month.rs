use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::RevenueError;

/// Date formats accepted for input rows, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y-%m-%dT%H:%M:%S"];

/// Identifies one calendar month, the grouping key for aggregation.
///
/// Parsing a `MonthKey` from a string is the date normalizer: any of the
/// accepted date forms for the same month produce an equal key, and the
/// day and time components are discarded. Accepted forms are `YYYY-MM-DD`,
/// `YYYY/MM/DD`, month-only `YYYY-MM`, and `YYYY-MM-DDTHH:MM:SS`. Values
/// are naive calendar dates; no timezone interpretation is applied.
///
/// Keys order chronologically, not by string comparison.
///
/// # Examples
///
/// ```
/// use revenue::MonthKey;
///
/// let key: MonthKey = "2023-05-17".parse().unwrap();
/// assert_eq!(key.to_string(), "2023-05");
/// assert_eq!(key, "2023/05/17".parse().unwrap());
/// assert_eq!(key, "2023-05".parse().unwrap());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// The year this key falls in.
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }
}

impl FromStr for MonthKey {
    type Err = RevenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RevenueError::DateFormat(s.to_string()));
        }
        // A month-only value gets a synthetic first-of-month day so the
        // full-date formats below can handle it.
        let candidate = if trimmed.len() == 7 && trimmed.contains('-') {
            format!("{trimmed}-01")
        } else {
            trimmed.to_string()
        };
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
                return Ok(Self {
                    year: date.year(),
                    month: date.month(),
                });
            }
        }
        Err(RevenueError::DateFormat(trimmed.to_string()))
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_fn_gives_same_key_for_all_accepted_forms() {
        let forms = ["2023-05-17", "2023/05/17", "2023-05", "2023-05-17T10:00:00"];
        for form in forms {
            let key: MonthKey = form.parse().unwrap();
            assert_eq!(key.to_string(), "2023-05", "from {form:?}");
        }
    }

    #[test]
    fn from_str_fn_discards_day_and_time() {
        let a: MonthKey = "2024-02-01".parse().unwrap();
        let b: MonthKey = "2024-02-29T23:59:59".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_str_fn_trims_surrounding_whitespace() {
        let key: MonthKey = "  2023-05-17 ".parse().unwrap();
        assert_eq!(key.to_string(), "2023-05");
    }

    #[test]
    fn from_str_fn_rejects_empty_input() {
        assert!(matches!(
            "".parse::<MonthKey>(),
            Err(RevenueError::DateFormat(_))
        ));
        assert!(matches!(
            "   ".parse::<MonthKey>(),
            Err(RevenueError::DateFormat(_))
        ));
    }

    #[test]
    fn from_str_fn_rejects_unparseable_text() {
        for bad in ["17th May", "2023-13-01", "05/17/2023", "yesterday"] {
            assert!(
                matches!(bad.parse::<MonthKey>(), Err(RevenueError::DateFormat(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn keys_order_chronologically_across_year_boundary() {
        let december: MonthKey = "2023-12".parse().unwrap();
        let january: MonthKey = "2024-01".parse().unwrap();
        assert!(december < january);

        let mut keys: Vec<MonthKey> = ["2024-01", "2023-02", "2023-12", "2022-07"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(MonthKey::to_string).collect();
        assert_eq!(rendered, ["2022-07", "2023-02", "2023-12", "2024-01"]);
    }

    #[test]
    fn display_zero_pads_year_and_month() {
        let key: MonthKey = "0987-03-02".parse().unwrap();
        assert_eq!(key.to_string(), "0987-03");
    }
}

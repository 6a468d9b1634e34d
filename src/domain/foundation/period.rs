//! Reporting period value object (a year, optionally narrowed to one month).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Earliest reporting year accepted.
pub const MIN_REPORTING_YEAR: i32 = 1990;

/// Latest reporting year accepted.
pub const MAX_REPORTING_YEAR: i32 = 2100;

/// The period an aggregation covers.
///
/// A missing month means the full calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingPeriod {
    year: i32,
    month: Option<u8>,
}

impl ReportingPeriod {
    /// Creates a full-year period.
    pub fn year(year: i32) -> Result<Self, ValidationError> {
        Self::new(year, None)
    }

    /// Creates a single-month period.
    pub fn month(year: i32, month: u8) -> Result<Self, ValidationError> {
        Self::new(year, Some(month))
    }

    /// Creates a period, validating both bounds.
    pub fn new(year: i32, month: Option<u8>) -> Result<Self, ValidationError> {
        if !(MIN_REPORTING_YEAR..=MAX_REPORTING_YEAR).contains(&year) {
            return Err(ValidationError::out_of_range(
                "year",
                MIN_REPORTING_YEAR as i64,
                MAX_REPORTING_YEAR as i64,
                year as i64,
            ));
        }
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(ValidationError::out_of_range("month", 1, 12, m as i64));
            }
        }
        Ok(Self { year, month })
    }

    /// Parses raw request input.
    ///
    /// A blank month string is treated the same as an absent one.
    pub fn parse(year: &str, month: Option<&str>) -> Result<Self, ValidationError> {
        let year = year.trim();
        if year.is_empty() {
            return Err(ValidationError::empty_field("year"));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::invalid_format("year", format!("'{}' is not a year", year)))?;

        let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
            None => None,
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| {
                    ValidationError::invalid_format("month", format!("'{}' is not a month", raw))
                })?;
                if !(1..=12).contains(&value) {
                    return Err(ValidationError::out_of_range("month", 1, 12, value));
                }
                Some(value as u8)
            }
        };

        Self::new(year, month)
    }

    /// The reporting year.
    pub fn reporting_year(&self) -> i32 {
        self.year
    }

    /// The reporting month, if narrowed.
    pub fn reporting_month(&self) -> Option<u8> {
        self.month
    }

    /// True when the period spans the whole year.
    pub fn is_full_year(&self) -> bool {
        self.month.is_none()
    }

    /// Months covered by this period, in calendar order.
    pub fn months(&self) -> Vec<u8> {
        match self.month {
            Some(m) => vec![m],
            None => (1..=12).collect(),
        }
    }

    /// True when a record stamped with `year`/`month` falls inside the period.
    pub fn contains(&self, year: i32, month: u8) -> bool {
        self.year == year && self.month.map_or(true, |m| m == month)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(m) => write!(f, "{}-{:02}", self.year, m),
            None => write!(f, "{}", self.year),
        }
    }
}

//! Column types under test and their representable ranges

use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A temporal column type supported by the target dialect.
///
/// Each type stores instants inside an inclusive `[min, max]` range at
/// one-second granularity. `Date` and `Datetime` share the wide
/// `1000-01-01 .. 9999-12-31` range, `Timestamp` is limited to the 32-bit
/// unix epoch window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Timestamp,
    Date,
    Datetime,
}

impl ColumnType {
    /// All column types, in generation order.
    pub const ALL: [ColumnType; 3] = [ColumnType::Timestamp, ColumnType::Date, ColumnType::Datetime];

    /// Type name as written in a `CREATE TABLE` column definition.
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Timestamp => "timestamp",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
        }
    }

    /// Smallest instant the type can store.
    pub fn min(self) -> NaiveDateTime {
        match self {
            ColumnType::Timestamp => instant(1970, 1, 1, 0, 0, 1),
            ColumnType::Date | ColumnType::Datetime => instant(1000, 1, 1, 0, 0, 0),
        }
    }

    /// Largest instant the type can store.
    pub fn max(self) -> NaiveDateTime {
        match self {
            ColumnType::Timestamp => instant(2038, 1, 19, 3, 14, 7),
            ColumnType::Date | ColumnType::Datetime => instant(9999, 12, 31, 23, 59, 59),
        }
    }

    /// Inclusive `(min, max)` pair.
    pub fn valid_range(self) -> (NaiveDateTime, NaiveDateTime) {
        (self.min(), self.max())
    }

    /// Whether the dialect reliably reports overflow past the upper bound.
    ///
    /// `date` and `datetime` may silently clamp instead of failing, so no
    /// case may assert an error for them at the upper bound.
    pub fn reports_upper_overflow(self) -> bool {
        matches!(self, ColumnType::Timestamp)
    }
}

fn instant(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("column type bounds are valid calendar instants")
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for ColumnType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(ColumnType::Timestamp),
            "date" => Ok(ColumnType::Date),
            "datetime" => Ok(ColumnType::Datetime),
            _ => Err(CoreError::UnknownColumnType {
                name: s.to_string(),
            }),
        }
    }
}

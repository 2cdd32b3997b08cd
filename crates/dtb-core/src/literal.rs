//! SQL literal rendering for instants, intervals and durations
//!
//! Every argument that ends up in a generated statement is a [`Literal`].
//! Rendering is centralized in one `Display` impl so the literal grammar
//! lives in a single place:
//!
//! - date: `'YYYY-MM-DD'`
//! - datetime / timestamp: `'YYYY-MM-DD HH:MM:SS'`
//! - interval: `INTERVAL <int> {DAY|HOUR|MINUTE|SECOND}`
//! - composite duration: `'[-][D ]H:M:S'`

use crate::column_type::ColumnType;
use crate::error::{CoreError, CoreResult};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Unit of an `INTERVAL` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl IntervalUnit {
    /// All units, in generation order.
    pub const ALL: [IntervalUnit; 4] = [
        IntervalUnit::Days,
        IntervalUnit::Hours,
        IntervalUnit::Minutes,
        IntervalUnit::Seconds,
    ];

    /// Keyword following the amount in an `INTERVAL` literal.
    pub fn keyword(self) -> &'static str {
        match self {
            IntervalUnit::Days => "DAY",
            IntervalUnit::Hours => "HOUR",
            IntervalUnit::Minutes => "MINUTE",
            IntervalUnit::Seconds => "SECOND",
        }
    }

    /// Length of one unit.
    pub fn span(self) -> Duration {
        match self {
            IntervalUnit::Days => Duration::days(1),
            IntervalUnit::Hours => Duration::hours(1),
            IntervalUnit::Minutes => Duration::minutes(1),
            IntervalUnit::Seconds => Duration::seconds(1),
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Hours => "hours",
            IntervalUnit::Minutes => "minutes",
            IntervalUnit::Seconds => "seconds",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntervalUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntervalUnit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownIntervalUnit {
                name: s.to_string(),
            })
    }
}

/// A value rendered into a generated SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Reference to the column being updated.
    Column,

    /// An instant rendered in the format of a column type.
    Instant {
        at: NaiveDateTime,
        column_type: ColumnType,
    },

    /// `INTERVAL <amount> <unit>`.
    Interval { unit: IntervalUnit, amount: i64 },

    /// Signed `'[-][D ]H:M:S'` duration, stored in whole seconds.
    CompositeDuration { seconds: i64 },
}

impl Literal {
    /// Render `at` as a value of `column_type`.
    pub fn instant(at: NaiveDateTime, column_type: ColumnType) -> Self {
        Literal::Instant { at, column_type }
    }

    /// Express `offset` in whole `unit`s.
    ///
    /// The amount is truncated toward zero: 36 hours is `INTERVAL 1 DAY`.
    pub fn interval(offset: Duration, unit: IntervalUnit) -> Self {
        Literal::Interval {
            unit,
            amount: offset.num_seconds() / unit.span().num_seconds(),
        }
    }

    /// Express `offset` as a composite duration (sub-second part dropped).
    pub fn composite_duration(offset: Duration) -> Self {
        Literal::CompositeDuration {
            seconds: offset.num_seconds(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Column => f.write_str(crate::case::COLUMN_NAME),
            Literal::Instant { at, column_type } => match column_type {
                ColumnType::Date => write!(f, "'{}'", at.format("%Y-%m-%d")),
                ColumnType::Timestamp | ColumnType::Datetime => {
                    write!(f, "'{}'", at.format("%Y-%m-%d %H:%M:%S"))
                }
            },
            Literal::Interval { unit, amount } => {
                write!(f, "INTERVAL {} {}", amount, unit.keyword())
            }
            Literal::CompositeDuration { seconds } => {
                let sign = if *seconds < 0 { "-" } else { "" };
                let mut rest = seconds.unsigned_abs();
                let days = rest / SECONDS_PER_DAY;
                rest -= days * SECONDS_PER_DAY;
                let hours = rest / SECONDS_PER_HOUR;
                rest -= hours * SECONDS_PER_HOUR;
                let minutes = rest / SECONDS_PER_MINUTE;
                let secs = rest - minutes * SECONDS_PER_MINUTE;

                f.write_str("'")?;
                f.write_str(sign)?;
                if days != 0 {
                    write!(f, "{} ", days)?;
                }
                write!(f, "{}:{}:{}'", hours, minutes, secs)
            }
        }
    }
}

impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Parse a composite duration literal back into a signed duration.
///
/// Accepts the output of [`Literal::composite_duration`], with or without the
/// surrounding single quotes.
pub fn parse_composite_duration(literal: &str) -> CoreResult<Duration> {
    let invalid = |reason: &str| CoreError::InvalidDurationLiteral {
        literal: literal.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = literal.trim();
    let body = match trimmed.strip_prefix('\'') {
        Some(inner) => inner
            .strip_suffix('\'')
            .ok_or_else(|| invalid("unterminated quote"))?,
        None => trimmed,
    };
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (days, clock) = match body.split_once(' ') {
        Some((days, clock)) => (parse_component(days, &invalid)?, clock),
        None => (0, body),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid("expected H:M:S"));
    };
    let hours = parse_component(hours, &invalid)?;
    let minutes = parse_component(minutes, &invalid)?;
    let seconds = parse_component(seconds, &invalid)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid("minutes and seconds must be below 60"));
    }

    let total = days
        .checked_mul(SECONDS_PER_DAY as i64)
        .and_then(|d| d.checked_add(hours.checked_mul(SECONDS_PER_HOUR as i64)?))
        .and_then(|t| t.checked_add(minutes * SECONDS_PER_MINUTE as i64 + seconds))
        .ok_or_else(|| invalid("duration out of range"))?;

    Duration::try_seconds(if negative { -total } else { total })
        .ok_or_else(|| invalid("duration out of range"))
}

fn parse_component(s: &str, invalid: &dyn Fn(&str) -> CoreError) -> CoreResult<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("components must be unsigned integers"));
    }
    s.parse::<i64>().map_err(|_| invalid("component out of range"))
}

#[cfg(test)]
#[path = "literal_test.rs"]
mod tests;

//! Date/time shifting functions under test

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a function expects its offset argument to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetForm {
    /// `INTERVAL <n> <unit>`, one case per interval unit.
    Interval,
    /// A single `'[-][D ]H:M:S'` duration string.
    CompositeDuration,
}

/// One of the four time-shifting functions of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateFunction {
    AddDate,
    SubDate,
    AddTime,
    SubTime,
}

impl DateFunction {
    /// All functions, in registry order.
    pub const ALL: [DateFunction; 4] = [
        DateFunction::AddDate,
        DateFunction::SubDate,
        DateFunction::AddTime,
        DateFunction::SubTime,
    ];

    /// SQL function name.
    pub fn name(self) -> &'static str {
        match self {
            DateFunction::AddDate => "ADDDATE",
            DateFunction::SubDate => "SUBDATE",
            DateFunction::AddTime => "ADDTIME",
            DateFunction::SubTime => "SUBTIME",
        }
    }

    /// Sign applied to a boundary offset before it is rendered.
    ///
    /// Subtracting functions receive the negated offset so that
    /// `f(t, d)` and `g(t, -d)` shift `t` the same way.
    pub fn offset_sign(self) -> i32 {
        match self {
            DateFunction::AddDate | DateFunction::AddTime => 1,
            DateFunction::SubDate | DateFunction::SubTime => -1,
        }
    }

    pub fn offset_form(self) -> OffsetForm {
        match self {
            DateFunction::AddDate | DateFunction::SubDate => OffsetForm::Interval,
            DateFunction::AddTime | DateFunction::SubTime => OffsetForm::CompositeDuration,
        }
    }
}

impl fmt::Display for DateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateFunction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFunction::ALL
            .into_iter()
            .find(|func| func.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownFunction {
                name: s.to_string(),
            })
    }
}

//! Boundary combinator
//!
//! Derives `(instant, offset, expected_valid)` triples that push a column
//! type's range past its edges. Both endpoints are first pulled inward by one
//! [`safe_span`], then shifted by `level * safe_span()` in each direction:
//!
//! ```text
//! may be invalid      valid
//! max + (+d)          max + (-d)
//! min + (-d)          min + (+d)
//! ```
//!
//! An adding function applies `d` and a subtracting function applies `-d`,
//! so both shift the instant the same way and share one expected outcome.

use crate::column_type::ColumnType;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Length of the safe span in hours.
pub const SAFE_SPAN_HOURS: i64 = 24;

/// Multipliers of [`safe_span`] applied to each boundary.
pub const MAGNITUDE_LEVELS: RangeInclusive<u8> = 0..=3;

/// Highest level whose offset stays within the slack left by the inward shift.
const INHERENTLY_VALID_LEVEL: u8 = 1;

/// Unit of boundary perturbation.
pub fn safe_span() -> Duration {
    Duration::hours(SAFE_SPAN_HOURS)
}

/// Which end of the range a case starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Min,
    Max,
}

/// One derived boundary triple, before expansion into test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryCase {
    /// Starting value, one safe span inside the range.
    pub instant: NaiveDateTime,

    /// Signed shift as seen by an adding function.
    pub offset: Duration,

    /// Whether shifting `instant` by `offset` must succeed.
    pub expected_valid: bool,

    /// Range end `instant` was derived from.
    pub endpoint: Endpoint,

    /// Multiplier of [`safe_span`] used for `offset`.
    pub level: u8,
}

/// Generate every boundary triple for `column_type`.
///
/// Yields four combinations per magnitude level for `timestamp` and three for
/// `date`/`datetime`, which never assert an error at the upper bound.
pub fn boundary_cases(column_type: ColumnType) -> impl Iterator<Item = BoundaryCase> {
    let span = safe_span();
    let (min, max) = column_type.valid_range();
    let min_valid = min + span;
    let max_valid = max - span;

    MAGNITUDE_LEVELS.flat_map(move |level| {
        let offset = span * i32::from(level);
        let inherently_valid = level <= INHERENTLY_VALID_LEVEL;

        let combinations = [
            (Endpoint::Max, max_valid, offset, false),
            (Endpoint::Min, min_valid, -offset, false),
            (Endpoint::Max, max_valid, -offset, true),
            (Endpoint::Min, min_valid, offset, true),
        ];

        combinations
            .into_iter()
            .filter(move |&(endpoint, _, _, canonical_valid)| {
                canonical_valid || endpoint == Endpoint::Min || column_type.reports_upper_overflow()
            })
            .map(move |(endpoint, instant, offset, canonical_valid)| BoundaryCase {
                instant,
                offset,
                expected_valid: canonical_valid || inherently_valid,
                endpoint,
                level,
            })
    })
}

#[cfg(test)]
#[path = "boundary_test.rs"]
mod tests;

//! dtb-core - Core library for datebound
//!
//! This crate derives boundary-value test cases for the date/time shifting
//! functions (`ADDDATE`, `SUBDATE`, `ADDTIME`, `SUBTIME`) of a MySQL-compatible
//! dialect. It owns the column type ranges, the SQL literal formatter, the
//! boundary combinator and the case registry. Nothing in this crate touches a
//! database.

pub mod boundary;
pub mod case;
pub mod column_type;
pub mod config;
pub mod error;
pub mod function;
pub mod literal;
pub mod registry;

pub use boundary::{boundary_cases, safe_span, BoundaryCase, Endpoint, MAGNITUDE_LEVELS};
pub use case::{CaseStatements, TestCase, COLUMN_NAME};
pub use column_type::ColumnType;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use function::{DateFunction, OffsetForm};
pub use literal::{parse_composite_duration, IntervalUnit, Literal};
pub use registry::CaseRegistry;

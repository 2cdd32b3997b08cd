//! dtb-test - Case execution for datebound
//!
//! This crate turns generated cases into create/insert/update statements,
//! runs them against a `Database` and judges each update against the case's
//! expected validity.

pub mod error;
pub mod runner;

pub use error::{RunError, RunResult};
pub use runner::{CaseResult, CaseRunner, RunSummary};

//! Case execution

use crate::error::{RunError, RunResult};
use dtb_core::config::is_plain_identifier;
use dtb_core::{CaseRegistry, CaseStatements, TestCase};
use dtb_db::{Database, DbError};
use std::time::{Duration, Instant};

/// Result of a single case execution
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// Case that was run
    pub case: TestCase,

    /// Statements issued, for reproduction
    pub statements: CaseStatements,

    /// Whether the update outcome matched the expectation
    pub passed: bool,

    /// Error returned by the update statement, if any
    pub update_error: Option<String>,

    /// Execution time
    pub duration: Duration,
}

impl CaseResult {
    /// Human-readable mismatch report with reproduction statements
    pub fn failure_report(&self) -> String {
        let outcome = match &self.update_error {
            Some(error) => format!("update failed: {}", error),
            None => "update succeeded".to_string(),
        };
        format!(
            "{} failed ({}, expected {})\nReproduce:\n{}",
            self.case,
            outcome,
            if self.case.expected_valid {
                "success"
            } else {
                "an error"
            },
            self.statements
        )
    }
}

/// Summary of a case run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases run
    pub total: usize,

    /// Cases whose outcome matched
    pub passed: usize,

    /// Cases whose outcome did not match
    pub failed: usize,

    /// Total execution time
    pub duration: Duration,
}

impl RunSummary {
    /// Create a summary from case results
    pub fn from_results(results: &[CaseResult], duration: Duration) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();

        Self {
            total,
            passed,
            failed: total - passed,
            duration,
        }
    }

    /// Check if all cases passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs cases one at a time against a shared scratch table
///
/// The table is dropped and recreated for every case, so a runner must not be
/// shared by concurrent runs against the same database.
pub struct CaseRunner<'a> {
    db: &'a dyn Database,
    table: String,
}

impl<'a> CaseRunner<'a> {
    /// Create a new case runner using `table` as the scratch table
    pub fn new(db: &'a dyn Database, table: impl Into<String>) -> RunResult<Self> {
        let table = table.into();
        if !is_plain_identifier(&table) {
            return Err(RunError::InvalidTable(table));
        }
        Ok(Self { db, table })
    }

    /// Set session state shared by every case
    pub async fn prepare_session(&self, time_zone: &str) -> RunResult<()> {
        log::info!("Setting {} session time zone to {}", self.db.db_type(), time_zone);
        self.db
            .set_time_zone(time_zone)
            .await
            .map_err(|e| setup_error(format!("SET SESSION time_zone = '{}'", time_zone), e))
    }

    /// Run a single case
    ///
    /// Returns `Err` when the table could not be prepared or the update failed
    /// for a reason other than a server rejection; an update that disagrees
    /// with the expectation yields a failed `CaseResult`.
    pub async fn run_case(&self, case: &TestCase) -> RunResult<CaseResult> {
        let start = Instant::now();

        self.db
            .drop_table_if_exists(&self.table)
            .await
            .map_err(|e| setup_error(format!("DROP TABLE IF EXISTS {}", self.table), e))?;

        let statements = case.statements(&self.table);
        let [create, insert, update] = statements.as_array();
        for setup in [create, insert] {
            self.db
                .execute(setup)
                .await
                .map_err(|e| setup_error(setup.to_string(), e))?;
        }

        // Only a server-side rejection is a verdict on the case. Transport
        // and protocol failures say nothing about the function under test.
        let update_error = match self.db.execute(update).await {
            Ok(_) => None,
            Err(DbError::ExecutionError(message)) => Some(message),
            Err(e) => {
                return Err(RunError::UpdateInterrupted {
                    statement: update.to_string(),
                    message: e.to_string(),
                })
            }
        };
        let passed = update_error.is_none() == case.expected_valid;
        if !passed {
            log::warn!("Mismatch: {}", statements.update);
        }

        Ok(CaseResult {
            case: case.clone(),
            statements,
            passed,
            update_error,
            duration: start.elapsed(),
        })
    }

    /// Run cases in order, stopping at the first mismatch if `fail_fast`
    ///
    /// `on_result` sees every result as soon as its case finishes.
    pub async fn run_cases<'c, I, F>(
        &self,
        cases: I,
        fail_fast: bool,
        mut on_result: F,
    ) -> RunResult<Vec<CaseResult>>
    where
        I: IntoIterator<Item = &'c TestCase>,
        F: FnMut(&CaseResult),
    {
        let mut results = Vec::new();

        for case in cases {
            let result = self.run_case(case).await?;
            on_result(&result);
            let stop = fail_fast && !result.passed;
            results.push(result);
            if stop {
                break;
            }
        }

        Ok(results)
    }

    /// Run every case of a registry and return summary
    pub async fn run_registry<F>(
        &self,
        registry: &CaseRegistry,
        fail_fast: bool,
        on_result: F,
    ) -> RunResult<(Vec<CaseResult>, RunSummary)>
    where
        F: FnMut(&CaseResult),
    {
        let start = Instant::now();
        let results = self
            .run_cases(registry.iter(), fail_fast, on_result)
            .await?;
        let summary = RunSummary::from_results(&results, start.elapsed());

        Ok((results, summary))
    }
}

fn setup_error(statement: String, err: DbError) -> RunError {
    RunError::Setup {
        statement,
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;

//! Run command implementation

use anyhow::{Context, Result};
use dtb_core::{CaseRegistry, CaseStatements, TestCase};
use dtb_db::MySqlBackend;
use dtb_test::{CaseResult, CaseRunner, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, RunArgs};
use crate::commands::common::{resolve_config, ExitCode, EXIT_MISMATCH};

/// JSON report for a whole run
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    duration_ms: u128,
    results: Vec<CaseReport<'a>>,
}

/// JSON entry for one case
#[derive(Debug, Serialize)]
struct CaseReport<'a> {
    #[serde(flatten)]
    case: &'a TestCase,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_error: Option<&'a str>,
    statements: &'a CaseStatements,
    duration_ms: u128,
}

impl<'a> CaseReport<'a> {
    fn from_result(result: &'a CaseResult) -> Self {
        Self {
            case: &result.case,
            passed: result.passed,
            update_error: result.update_error.as_deref(),
            statements: &result.statements,
            duration_ms: result.duration.as_millis(),
        }
    }
}

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = resolve_config(global, &args.filter)?;
    if let Some(zone) = &args.time_zone {
        config.time_zone = zone.clone();
        config.validate().context("Invalid --time-zone")?;
    }
    let json = args.output == OutputFormat::Json;

    let registry = CaseRegistry::build_filtered(&config.functions, &config.column_types);
    log::info!("Generated {} cases", registry.len());

    let url = config.connection_url()?;
    let db = MySqlBackend::connect(&url)
        .await
        .context("Failed to connect to database")?;

    let outcome = execute_registry(
        &db,
        &registry,
        &config.table,
        &config.time_zone,
        args.fail_fast,
        json,
    )
    .await;
    if let Err(e) = db.close().await {
        log::warn!("Failed to close connection: {}", e);
    }
    let (results, summary) = outcome?;

    if json {
        print_json(&results, &summary)?;
    } else {
        print_text(&results, &summary);
    }

    if !summary.all_passed() {
        return Err(ExitCode(EXIT_MISMATCH).into());
    }

    Ok(())
}

async fn execute_registry(
    db: &MySqlBackend,
    registry: &CaseRegistry,
    table: &str,
    time_zone: &str,
    fail_fast: bool,
    quiet: bool,
) -> Result<(Vec<CaseResult>, RunSummary)> {
    let runner = CaseRunner::new(db, table)?;
    runner
        .prepare_session(time_zone)
        .await
        .context("Failed to prepare session")?;

    let progress = if quiet {
        None
    } else {
        let pb = ProgressBar::new(registry.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    // Harness errors are fatal: they point at the environment, not the case.
    let outcome = runner
        .run_registry(registry, fail_fast, |result| {
            if let Some(pb) = &progress {
                pb.set_message(format!("{} {}", result.case.function, result.case.column_type));
                pb.inc(1);
            }
        })
        .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(outcome?)
}

fn print_text(results: &[CaseResult], summary: &RunSummary) {
    for result in results.iter().filter(|r| !r.passed) {
        println!("  ✗ {}", result.failure_report());
        println!();
    }

    println!(
        "{} cases passed, {} failed [{}ms]",
        summary.passed,
        summary.failed,
        summary.duration.as_millis()
    );
}

fn print_json(results: &[CaseResult], summary: &RunSummary) -> Result<()> {
    let report = RunReport {
        total: summary.total,
        passed: summary.passed,
        failed: summary.failed,
        duration_ms: summary.duration.as_millis(),
        results: results.iter().map(CaseReport::from_result).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtb_core::{ColumnType, DateFunction};
    use std::time::Duration;

    fn result(passed: bool, update_error: Option<&str>) -> CaseResult {
        let registry =
            CaseRegistry::build_filtered(&[DateFunction::AddTime], &[ColumnType::Timestamp]);
        let case = registry.iter().next().cloned().unwrap();
        CaseResult {
            statements: case.statements("t"),
            case,
            passed,
            update_error: update_error.map(String::from),
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_case_report_json_shape() {
        let result = result(false, Some("datetime overflow"));
        let json = serde_json::to_value(CaseReport::from_result(&result)).unwrap();

        assert_eq!(json["function"], "ADDTIME");
        assert_eq!(json["column_type"], "timestamp");
        assert_eq!(json["initial_value"], "'2038-01-18 03:14:07'");
        assert_eq!(json["arguments"][0], "c");
        assert_eq!(json["arguments"][1], "'0:0:0'");
        assert_eq!(json["passed"], false);
        assert_eq!(json["update_error"], "datetime overflow");
        assert_eq!(json["expected_valid"], true);
        assert_eq!(
            json["statements"]["update"],
            "UPDATE t SET c = ADDTIME(c,'0:0:0');"
        );
    }

    #[test]
    fn test_case_report_omits_missing_error() {
        let result = result(true, None);
        let json = serde_json::to_value(CaseReport::from_result(&result)).unwrap();
        assert!(json.get("update_error").is_none());
    }
}

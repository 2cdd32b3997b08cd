//! List command implementation

use anyhow::Result;
use dtb_core::{CaseRegistry, CaseStatements, TestCase};
use serde::Serialize;

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common::resolve_config;

/// JSON entry for one generated case
#[derive(Debug, Serialize)]
struct ListedCase<'a> {
    #[serde(flatten)]
    case: &'a TestCase,
    statements: CaseStatements,
}

/// Execute the list command
pub async fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let config = resolve_config(global, &args.filter)?;
    let registry = CaseRegistry::build_filtered(&config.functions, &config.column_types);

    match args.output {
        OutputFormat::Json => print_json(&registry, &config.table)?,
        OutputFormat::Text => print_text(&registry),
    }

    Ok(())
}

fn print_text(registry: &CaseRegistry) {
    for function in registry.functions() {
        let cases = registry.get(function);
        println!("{} ({} cases)", function, cases.len());
        for case in cases {
            let marker = if case.expected_valid { "ok " } else { "err" };
            println!("  [{}] {}", marker, render_call(case));
        }
        println!();
    }

    println!("{} cases", registry.len());
}

fn print_json(registry: &CaseRegistry, table: &str) -> Result<()> {
    let listed: Vec<ListedCase<'_>> = registry
        .iter()
        .map(|case| ListedCase {
            case,
            statements: case.statements(table),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&listed)?);
    Ok(())
}

/// One-line summary: `<type> <initial> -> FUNC(args)`
fn render_call(case: &TestCase) -> String {
    let arguments = case
        .arguments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{:<9} {} -> {}({})",
        case.column_type.sql_name(),
        case.initial_value,
        case.function,
        arguments
    )
}

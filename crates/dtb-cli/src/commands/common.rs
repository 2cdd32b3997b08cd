//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use dtb_core::{ColumnType, Config, DateFunction};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::cli::{FilterArgs, GlobalArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that the database connection is closed before the process exits.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code when at least one case did not match its expectation.
pub(crate) const EXIT_MISMATCH: i32 = 2;

/// Install the logger. `--verbose` lowers the default level to debug;
/// `RUST_LOG` takes precedence over both.
pub(crate) fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Resolve the effective configuration.
///
/// Precedence: CLI flag, then `DATEBOUND_DSN`, then the config file, then
/// built-in defaults.
pub(crate) fn resolve_config(global: &GlobalArgs, filter: &FilterArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::load_from_dir(Path::new(".")).context("Failed to load datebound.yml")?,
    };

    if let Some(dsn) = &global.dsn {
        config.dsn = dsn.clone();
    }
    if let Some(table) = &global.table {
        config.table = table.clone();
    }
    if let Some(functions) = &filter.functions {
        config.functions = parse_list::<DateFunction>(functions).context("Invalid --functions")?;
    }
    if let Some(column_types) = &filter.column_types {
        config.column_types =
            parse_list::<ColumnType>(column_types).context("Invalid --column-types")?;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Parse a comma-separated list, skipping blanks and duplicates.
pub(crate) fn parse_list<T>(raw: &str) -> Result<Vec<T>, T::Err>
where
    T: FromStr + PartialEq,
{
    let mut items = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let item = part.parse::<T>()?;
        if !items.contains(&item) {
            items.push(item);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn global() -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            config: None,
            dsn: None,
            table: None,
        }
    }

    #[test]
    fn test_parse_list_dedups_and_trims() {
        let parsed: Vec<DateFunction> = parse_list(" adddate, ADDDATE ,,subtime").unwrap();
        assert_eq!(parsed, vec![DateFunction::AddDate, DateFunction::SubTime]);
    }

    #[test]
    fn test_parse_list_rejects_unknown() {
        let err = parse_list::<ColumnType>("date,time").unwrap_err();
        assert!(err.to_string().contains("[E001]"));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("datebound.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dsn: \"root@tcp(db:4000)/test\"\ntable: from_file").unwrap();

        let mut args = global();
        args.config = Some(path.display().to_string());
        args.dsn = Some("mysql://root@override:4000/test".to_string());
        let filter = FilterArgs {
            functions: Some("subdate".to_string()),
            column_types: None,
        };

        let config = resolve_config(&args, &filter).unwrap();
        assert_eq!(config.dsn, "mysql://root@override:4000/test");
        assert_eq!(config.table, "from_file");
        assert_eq!(config.functions, vec![DateFunction::SubDate]);
        assert_eq!(config.column_types, ColumnType::ALL.to_vec());
    }

    #[test]
    fn test_empty_filter_is_rejected() {
        let mut args = global();
        args.dsn = Some("/test".to_string());
        let filter = FilterArgs {
            functions: Some(" , ".to_string()),
            column_types: None,
        };
        assert!(resolve_config(&args, &filter).is_err());
    }

    #[test]
    fn test_exit_code_display_is_empty() {
        assert_eq!(ExitCode(2).to_string(), "");
    }
}

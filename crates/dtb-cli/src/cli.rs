//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// datebound - boundary tests for ADDDATE, SUBDATE, ADDTIME and SUBTIME
#[derive(Parser, Debug)]
#[command(name = "datebound")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: ./datebound.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Connection string, e.g. root:@tcp(127.0.0.1:4000)/test or mysql://...
    #[arg(long, global = true, env = "DATEBOUND_DSN")]
    pub dsn: Option<String>,

    /// Scratch table recreated for every case
    #[arg(long, global = true)]
    pub table: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute generated cases against the database
    Run(RunArgs),

    /// Print generated cases without connecting
    List(ListArgs),
}

/// Case selection shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Functions to exercise (comma-separated, default: all)
    #[arg(short, long)]
    pub functions: Option<String>,

    /// Column types to exercise (comma-separated, default: all)
    #[arg(long)]
    pub column_types: Option<String>,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Stop on first mismatch
    #[arg(long)]
    pub fail_fast: bool,

    /// Session time zone (default: UTC)
    #[arg(long)]
    pub time_zone: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "uiplan")]
#[command(about = "Turn UI prompts into validated component plans")]
pub struct Cli {
    /// Log decisions at debug level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Plan(PlanCommand),
    Generate(GenerateCommand),
    Explain(ExplainCommand),
    Build(BuildCommand),
    Diff(DiffCommand),
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    List(HistoryListCommand),
    Show(HistoryShowCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PlanCommand {
    #[arg(long)]
    pub prompt: String,
    #[arg(long)]
    pub previous: Option<PathBuf>,
    /// Ask the configured model instead of the rule-based engine.
    #[arg(long, default_value_t = false)]
    pub model: bool,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateCommand {
    #[arg(long)]
    pub plan: PathBuf,
    /// Wrap the markup in a component module.
    #[arg(long, default_value_t = false)]
    pub module: bool,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExplainCommand {
    #[arg(long)]
    pub plan: PathBuf,
    #[arg(long)]
    pub prompt: String,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildCommand {
    #[arg(long)]
    pub prompt: String,
    #[arg(long)]
    pub previous: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub model: bool,
    #[arg(long, default_value_t = false)]
    pub module: bool,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DiffCommand {
    #[arg(long)]
    pub before: PathBuf,
    #[arg(long)]
    pub after: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct HistoryListCommand {
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct HistoryShowCommand {
    /// Version number as printed by `history list`.
    pub version: usize,
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

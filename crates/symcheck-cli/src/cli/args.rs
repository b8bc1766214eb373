use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "symcheck",
    version,
    about = "Educational symptom checker backed by a hosted LLM (not a medical diagnosis)"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// YAML settings file; must exist when given [default: symcheck.yaml, if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// History database (overrides config file and SYMCHECK_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a symptom description and record it in the history
    Analyze(AnalyzeArgs),
    History(HistoryArgs),
    /// Export the history to CSV
    Export(ExportArgs),
    /// Ensure the history database exists (keeps existing records)
    InitDb,
    /// List the selectable models
    Models,
    /// Print the safety notes
    Safety,
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Symptom text; read from stdin when omitted
    #[arg(long, short)]
    pub symptoms: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// groq | fake
    #[arg(long)]
    pub provider: Option<String>,

    /// Used only when GROQ_API_KEY and the secrets file provide none
    #[arg(long)]
    pub api_key: Option<String>,

    /// Secrets file consulted after the environment
    #[arg(long, default_value = symcheck_core::config::credentials::DEFAULT_SECRETS_PATH)]
    pub secrets: PathBuf,

    /// Print the provider's raw response envelope
    #[arg(long)]
    pub show_raw: bool,

    /// Do not record this analysis in the history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Parser, Clone)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub cmd: HistorySub,
}

#[derive(Subcommand, Clone)]
pub enum HistorySub {
    /// Most recent entries first
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Full symptoms and response for one entry
    Show { id: i64 },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, default_value = symcheck_core::config::DEFAULT_EXPORT_PATH)]
    pub out: PathBuf,

    /// Only the N most recent entries
    #[arg(long)]
    pub limit: Option<u32>,
}

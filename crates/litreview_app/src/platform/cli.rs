use std::path::PathBuf;

use clap::Parser;
use litreview_core::OutputLanguage;
use litreview_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "litreview",
    about = "Generate a literature review from up to 10 PDF papers"
)]
pub struct Cli {
    /// PDF files to include in the request
    pub files: Vec<PathBuf>,

    /// Topic and aim of the research
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Output language: turkish or english (defaults to the settings file)
    #[arg(short, long)]
    pub language: Option<OutputLanguage>,

    /// OpenRouter API key; stored for later runs
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the generation service
    #[arg(long, env = "LITREVIEW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Also write the review to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Copy the review to the clipboard (OSC 52)
    #[arg(long)]
    pub copy: bool,

    /// Only check that the service is reachable
    #[arg(long)]
    pub check: bool,

    /// Keep the API key in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Where log output goes: terminal, file or both
    #[arg(long, default_value = "terminal")]
    pub log: LogDestination,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory for settings.ron and credentials.ron
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

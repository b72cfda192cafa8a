//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockstudy")]
#[command(author, version, about = "Technical indicators before and after a dividing date")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Compute indicators around a dividing date once
    Analyze(AnalyzeArgs),
    /// List or search known stocks
    Stocks(StocksArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Bind host (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Stock symbol
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// Dividing date (YYYY-MM-DD)
    #[arg(short, long)]
    pub dividing_date: NaiveDate,

    /// Calendar days before the dividing date
    #[arg(long)]
    pub historical_days: Option<u32>,

    /// Calendar days after the dividing date
    #[arg(long)]
    pub future_days: Option<u32>,

    /// Directory of CSV files (uses the CSV source instead of the configured one)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON result to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct StocksArgs {
    /// Match against symbol or name
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Maximum number of results
    #[arg(long, default_value_t = stockstudy_data::DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,
}

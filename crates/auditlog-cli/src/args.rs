//! CLI argument definitions for auditlog.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Filter and sort audit log entries.
///
/// ## Examples
///
/// Entries of one application changed by a given user, oldest first:
///   auditlog -r audit.json --app shop -f "username=jdoe" -s time
///
/// Everything except bucket changes, rendered in UTC+5:
///   auditlog -r audit.json -f "\-bucket,time={+0500}2024"
#[derive(Parser, Debug)]
#[command(name = "auditlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding an array of audit log entries
    #[arg(short = 'r', long, env = "AUDITLOG_RECORDS")]
    pub records: PathBuf,

    /// YAML configuration file
    #[arg(short = 'c', long, env = "AUDITLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only entries of this application
    #[arg(long, conflicts_with = "global")]
    pub app: Option<String>,

    /// Only entries not tied to an application
    #[arg(long)]
    pub global: bool,

    /// Filter mask, e.g. "checkout,action=created,time={+0100}09:"
    #[arg(short = 'f', long, default_value = "", allow_hyphen_values = true)]
    pub filter: String,

    /// Sort order, e.g. "app,-time"
    #[arg(short = 's', long, default_value = "", allow_hyphen_values = true)]
    pub sort: String,

    /// Maximum entries to consider (overrides the config file)
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Structured output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

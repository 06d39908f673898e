//! Execution of the auditlog command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use auditlog_seeker::{
    newest_first, AuditLog, AuditLogConfig, AuditLogEntry, AuditLogRepository, Scope,
    SeekerError,
};
use tracing::{info, Level};
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel, OutputFormat};

/// Initialize logging with the specified level.
///
/// Logs are written to stderr so stdout remains clean for program output.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Repository backed by a JSON export: an array of audit log entries.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileRepository { path: path.into() }
    }
}

impl AuditLogRepository for JsonFileRepository {
    fn fetch(
        &self,
        scope: &Scope,
        limit: usize,
    ) -> auditlog_seeker::Result<Vec<AuditLogEntry>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SeekerError::repository(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let entries: Vec<AuditLogEntry> = serde_json::from_str(&contents).map_err(|e| {
            SeekerError::repository(format!("cannot parse {}: {e}", self.path.display()))
        })?;
        let scoped = entries
            .into_iter()
            .filter(|entry| scope.contains(entry))
            .collect();
        Ok(newest_first(scoped, limit))
    }
}

/// Runs the command and returns the rendered output.
pub fn execute(args: &Cli) -> Result<String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(limit) = args.limit {
        config = config.with_fetch_limit(limit);
    }

    let scope = if args.global {
        Scope::Global
    } else if let Some(app) = &args.app {
        Scope::Application(app.clone())
    } else {
        Scope::All
    };

    let audit_log = AuditLog::new(JsonFileRepository::new(&args.records), config);
    let entries = audit_log
        .logs(&scope, &args.filter, &args.sort)
        .with_context(|| format!("failed to load entries from {}", args.records.display()))?;
    info!(count = entries.len(), "selected audit log entries");

    render(&entries, args.output)
}

fn load_config(path: Option<&Path>) -> Result<AuditLogConfig> {
    match path {
        Some(path) => AuditLogConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AuditLogConfig::default()),
    }
}

fn render(entries: &[AuditLogEntry], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(entries)?,
        OutputFormat::Yaml => serde_yaml::to_string(entries)?,
    };
    Ok(rendered)
}

//! Error types for the audit log seeker.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the repository, service and configuration layers.
///
/// The filter and sort path never produces these: malformed masks and
/// unknown keys degrade to well-defined results instead.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// The backing repository failed to produce entries.
    #[error("repository fetch failed: {0}")]
    Repository(String),

    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl SeekerError {
    /// Create a repository error.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

/// Errors reported by the filter-mask parser.
///
/// The pipeline turns these into its documented degraded results rather
/// than returning them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    /// A field token contains more than one `=`.
    #[error("ambiguous filter token '{0}': more than one '='")]
    AmbiguousToken(String),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;

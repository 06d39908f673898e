//! Service configuration.
//!
//! ```yaml
//! fetch_limit: 5000
//! default_offset: "+0100"
//! ```

use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeekerError};
use crate::time::parse_offset;

/// Default maximum number of entries fetched per call.
pub const DEFAULT_FETCH_LIMIT: usize = 10_000;

/// Configuration for [`AuditLog`](crate::AuditLog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditLogConfig {
    /// Maximum number of entries requested from the repository.
    pub fetch_limit: usize,
    /// Zone offset for `time` predicates without an option block.
    pub default_offset: Option<String>,
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        AuditLogConfig {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            default_offset: None,
        }
    }
}

impl AuditLogConfig {
    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SeekerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// The configured default offset, UTC when unset.
    pub fn offset(&self) -> FixedOffset {
        parse_offset(self.default_offset.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AuditLogConfig::default();
        assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
        assert_eq!(config.offset().local_minus_utc(), 0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = AuditLogConfig::from_yaml_str("default_offset: \"+0100\"").unwrap();
        assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
        assert_eq!(config.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AuditLogConfig::from_yaml_str("fetchlimit: 3").unwrap_err();
        assert!(matches!(err, SeekerError::ConfigParse(_)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fetch_limit: 25").unwrap();
        let config = AuditLogConfig::from_path(file.path()).unwrap();
        assert_eq!(config.fetch_limit, 25);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AuditLogConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, SeekerError::ConfigIo { .. }));
    }
}

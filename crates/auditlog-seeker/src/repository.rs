//! The source of audit log entries.
//!
//! Repositories deliver entries newest first; the pipeline relies on that
//! order being the default (`-time`) and does not re-sort it.

use std::cmp::Ordering;
use std::sync::RwLock;

use crate::entry::AuditLogEntry;
use crate::error::{Result, SeekerError};

/// Which entries a fetch covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Entries belonging to one application.
    Application(String),
    /// Every entry.
    All,
    /// Entries not tied to any application.
    Global,
}

impl Scope {
    /// Returns `true` if the entry falls within this scope.
    pub fn contains(&self, entry: &AuditLogEntry) -> bool {
        match self {
            Scope::Application(name) => entry.application_name.as_deref() == Some(name.as_str()),
            Scope::All => true,
            Scope::Global => entry.application_name.is_none(),
        }
    }
}

/// Storage for audit log entries.
pub trait AuditLogRepository {
    /// Returns at most `limit` entries within `scope`, newest first.
    fn fetch(&self, scope: &Scope, limit: usize) -> Result<Vec<AuditLogEntry>>;
}

/// An in-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<AuditLogEntry>) -> Self {
        InMemoryRepository {
            entries: RwLock::new(entries),
        }
    }

    /// Appends an entry.
    pub fn record(&self, entry: AuditLogEntry) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| SeekerError::repository("entry store lock poisoned"))?
            .push(entry);
        Ok(())
    }
}

impl AuditLogRepository for InMemoryRepository {
    fn fetch(&self, scope: &Scope, limit: usize) -> Result<Vec<AuditLogEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SeekerError::repository("entry store lock poisoned"))?;
        let scoped = entries
            .iter()
            .filter(|entry| scope.contains(entry))
            .cloned()
            .collect();
        Ok(newest_first(scoped, limit))
    }
}

/// Orders entries newest first, undated entries last, and truncates.
pub fn newest_first(mut entries: Vec<AuditLogEntry>, limit: usize) -> Vec<AuditLogEntry> {
    entries.sort_by(|a, b| match (&a.time, &b.time) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AuditAction;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, app: Option<&str>) -> AuditLogEntry {
        let entry = AuditLogEntry::new(AuditAction::ExperimentChanged)
            .with_time(Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap());
        match app {
            Some(app) => entry.with_application(app),
            None => entry,
        }
    }

    fn days(entries: &[AuditLogEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.time.map(|t| t.format("%d").to_string()).unwrap_or_default())
            .collect()
    }

    fn repository() -> InMemoryRepository {
        InMemoryRepository::with_entries(vec![
            at(1, Some("shop")),
            at(3, None),
            at(2, Some("blog")),
            at(4, Some("shop")),
        ])
    }

    #[test]
    fn all_scope_is_newest_first() {
        let entries = repository().fetch(&Scope::All, 10).unwrap();
        assert_eq!(days(&entries), vec!["04", "03", "02", "01"]);
    }

    #[test]
    fn application_scope() {
        let entries = repository()
            .fetch(&Scope::Application("shop".into()), 10)
            .unwrap();
        assert_eq!(days(&entries), vec!["04", "01"]);
    }

    #[test]
    fn global_scope_has_no_application() {
        let entries = repository().fetch(&Scope::Global, 10).unwrap();
        assert_eq!(days(&entries), vec!["03"]);
    }

    #[test]
    fn limit_caps_results() {
        let entries = repository().fetch(&Scope::All, 2).unwrap();
        assert_eq!(days(&entries), vec!["04", "03"]);
    }

    #[test]
    fn undated_entries_come_last() {
        let repo = repository();
        repo.record(AuditLogEntry::default()).unwrap();
        let entries = repo.fetch(&Scope::All, 10).unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries[4].time.is_none());
    }
}

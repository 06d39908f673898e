//! The audit log service: fetch, then filter and sort.

use tracing::debug;

use crate::config::AuditLogConfig;
use crate::entry::AuditLogEntry;
use crate::error::Result;
use crate::pipeline;
use crate::predicate::Evaluator;
use crate::repository::{AuditLogRepository, Scope};

/// Serves filtered and sorted audit logs from a repository.
///
/// # Example
///
/// ```
/// use auditlog_seeker::{AuditAction, AuditLog, AuditLogConfig, AuditLogEntry, InMemoryRepository};
///
/// let repository = InMemoryRepository::with_entries(vec![
///     AuditLogEntry::new(AuditAction::BucketCreated).with_bucket("red").with_application("shop"),
///     AuditLogEntry::new(AuditAction::BucketDeleted).with_bucket("blue").with_application("shop"),
/// ]);
/// let audit_log = AuditLog::new(repository, AuditLogConfig::default());
///
/// let entries = audit_log.application_logs("shop", "action=created", "").unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].bucket_label.as_deref(), Some("red"));
/// ```
#[derive(Debug)]
pub struct AuditLog<R> {
    repository: R,
    config: AuditLogConfig,
    evaluator: Evaluator,
}

impl<R: AuditLogRepository> AuditLog<R> {
    pub fn new(repository: R, config: AuditLogConfig) -> Self {
        let evaluator = Evaluator::new().with_default_offset(config.offset());
        AuditLog {
            repository,
            config,
            evaluator,
        }
    }

    /// Entries of one application.
    pub fn application_logs(
        &self,
        application: &str,
        filter_mask: &str,
        sort_order: &str,
    ) -> Result<Vec<AuditLogEntry>> {
        self.logs(
            &Scope::Application(application.to_string()),
            filter_mask,
            sort_order,
        )
    }

    /// Entries of every application plus global entries.
    pub fn all_logs(&self, filter_mask: &str, sort_order: &str) -> Result<Vec<AuditLogEntry>> {
        self.logs(&Scope::All, filter_mask, sort_order)
    }

    /// Entries not tied to any application.
    pub fn global_logs(&self, filter_mask: &str, sort_order: &str) -> Result<Vec<AuditLogEntry>> {
        self.logs(&Scope::Global, filter_mask, sort_order)
    }

    /// Fetches entries within `scope`, then filters and sorts them.
    pub fn logs(
        &self,
        scope: &Scope,
        filter_mask: &str,
        sort_order: &str,
    ) -> Result<Vec<AuditLogEntry>> {
        let entries = self.repository.fetch(scope, self.config.fetch_limit)?;
        debug!(?scope, fetched = entries.len(), "fetched audit log entries");
        Ok(pipeline::process_with(
            entries,
            filter_mask,
            sort_order,
            &self.evaluator,
        ))
    }

    /// Filters entries with this service's evaluator.
    pub fn filter(&self, entries: Vec<AuditLogEntry>, filter_mask: &str) -> Vec<AuditLogEntry> {
        pipeline::filter_with(entries, filter_mask, &self.evaluator)
    }

    /// Sorts entries.
    pub fn sort(&self, entries: Vec<AuditLogEntry>, sort_order: &str) -> Vec<AuditLogEntry> {
        pipeline::sort(entries, sort_order)
    }

    pub fn config(&self) -> &AuditLogConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

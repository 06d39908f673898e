//! Audit log records.
//!
//! An [`AuditLogEntry`] is one recorded change: who did it ([`UserInfo`]),
//! what kind of change it was ([`AuditAction`]), where it happened
//! (application, experiment, bucket) and what changed (property, before and
//! after values). Every field is optional; the engine treats absent values
//! according to its containment and null-ordering rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user responsible for an audit log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl UserInfo {
    /// Creates a user with only a username set.
    pub fn with_username(username: impl Into<String>) -> Self {
        UserInfo {
            username: Some(username.into()),
            ..UserInfo::default()
        }
    }

    /// First and last name joined by a single space.
    ///
    /// Absent parts render as empty strings, so the result is never absent.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

/// Category of an audited change.
///
/// The declaration order is the sort order used for the `action` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    UnspecifiedAction,
    ExperimentCreated,
    ExperimentChanged,
    BucketCreated,
    BucketChanged,
    BucketDeleted,
    PageAdded,
    PageRemoved,
    MutualExclusionAdded,
    MutualExclusionRemoved,
    PriorityChanged,
}

impl AuditAction {
    /// All actions in declaration order.
    pub const ALL: [AuditAction; 11] = [
        AuditAction::UnspecifiedAction,
        AuditAction::ExperimentCreated,
        AuditAction::ExperimentChanged,
        AuditAction::BucketCreated,
        AuditAction::BucketChanged,
        AuditAction::BucketDeleted,
        AuditAction::PageAdded,
        AuditAction::PageRemoved,
        AuditAction::MutualExclusionAdded,
        AuditAction::MutualExclusionRemoved,
        AuditAction::PriorityChanged,
    ];

    /// Returns the raw category name, e.g. `EXPERIMENT_CREATED`.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::UnspecifiedAction => "UNSPECIFIED_ACTION",
            AuditAction::ExperimentCreated => "EXPERIMENT_CREATED",
            AuditAction::ExperimentChanged => "EXPERIMENT_CHANGED",
            AuditAction::BucketCreated => "BUCKET_CREATED",
            AuditAction::BucketChanged => "BUCKET_CHANGED",
            AuditAction::BucketDeleted => "BUCKET_DELETED",
            AuditAction::PageAdded => "PAGE_ADDED",
            AuditAction::PageRemoved => "PAGE_REMOVED",
            AuditAction::MutualExclusionAdded => "MUTUAL_EXCLUSION_ADDED",
            AuditAction::MutualExclusionRemoved => "MUTUAL_EXCLUSION_REMOVED",
            AuditAction::PriorityChanged => "PRIORITY_CHANGED",
        }
    }

    /// Renders the human-readable description of an entry.
    ///
    /// The description depends on the entry's action as well as its bucket
    /// label, changed property and before/after values. Entries without an
    /// action are described as unspecified actions.
    pub fn description(entry: &AuditLogEntry) -> String {
        let action = entry.action.unwrap_or(AuditAction::UnspecifiedAction);
        let bucket = entry.bucket_label.as_deref().unwrap_or_default();
        let before = entry.before.as_deref().unwrap_or_default();
        let after = entry.after.as_deref().unwrap_or_default();

        match action {
            AuditAction::UnspecifiedAction => "performed an unspecified action".to_string(),
            AuditAction::ExperimentCreated => "created experiment".to_string(),
            AuditAction::ExperimentChanged => match entry.changed_property.as_deref() {
                Some("state") => match after {
                    "RUNNING" => "started experiment".to_string(),
                    "PAUSED" => "stopped experiment".to_string(),
                    "TERMINATED" => "terminated experiment".to_string(),
                    "DELETED" => "deleted experiment".to_string(),
                    other => format!("changed state to {other}"),
                },
                Some(property) if entry.after.is_some() => {
                    format!("changed {property} to {after}")
                }
                Some(property) => format!("changed {property}"),
                None => "changed experiment".to_string(),
            },
            AuditAction::BucketCreated => format!("created bucket {bucket}"),
            AuditAction::BucketChanged => match entry.changed_property.as_deref() {
                Some(property) => format!("changed {property} of bucket {bucket} to {after}"),
                None => format!("changed bucket {bucket}"),
            },
            AuditAction::BucketDeleted => format!("deleted bucket {bucket}"),
            AuditAction::PageAdded => format!("added page {after}"),
            AuditAction::PageRemoved => format!("removed page {before}"),
            AuditAction::MutualExclusionAdded => format!("added mutual exclusion with {after}"),
            AuditAction::MutualExclusionRemoved => {
                format!("removed mutual exclusion with {before}")
            }
            AuditAction::PriorityChanged => "changed priorities".to_string(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditLogEntry {
    pub user: UserInfo,
    pub action: Option<AuditAction>,
    pub experiment_id: Option<String>,
    pub experiment_label: Option<String>,
    pub bucket_label: Option<String>,
    pub application_name: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub changed_property: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl AuditLogEntry {
    /// Creates an empty entry for the given action.
    pub fn new(action: AuditAction) -> Self {
        AuditLogEntry {
            action: Some(action),
            ..AuditLogEntry::default()
        }
    }

    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.user = user;
        self
    }

    pub fn with_experiment(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.experiment_id = Some(id.into());
        self.experiment_label = Some(label.into());
        self
    }

    pub fn with_bucket(mut self, label: impl Into<String>) -> Self {
        self.bucket_label = Some(label.into());
        self
    }

    pub fn with_application(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Records a property change from `before` to `after`.
    pub fn with_change(
        mut self,
        property: impl Into<String>,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Self {
        self.changed_property = Some(property.into());
        self.before = before.map(str::to_string);
        self.after = after.map(str::to_string);
        self
    }

    /// Shorthand for [`AuditAction::description`].
    pub fn description(&self) -> String {
        AuditAction::description(self)
    }
}

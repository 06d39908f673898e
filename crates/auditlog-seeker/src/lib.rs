//! Audit log seeker - filter masks and multi-key sorting for audit logs.
//!
//! The crate takes a list of [`AuditLogEntry`] values plus two strings, a
//! filter mask and a sort order, and returns the matching entries in the
//! requested order.
//!
//! # Quick Start
//!
//! ```rust
//! use auditlog_seeker::{process, AuditAction, AuditLogEntry, UserInfo};
//!
//! let entries = vec![
//!     AuditLogEntry::new(AuditAction::BucketCreated).with_user(UserInfo::with_username("bob")),
//!     AuditLogEntry::new(AuditAction::BucketDeleted).with_user(UserInfo::with_username("ann")),
//!     AuditLogEntry::new(AuditAction::BucketCreated).with_user(UserInfo::with_username("Al")),
//! ];
//!
//! let results = process(entries, "action=created", "username");
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].user.username.as_deref(), Some("Al"));
//! ```
//!
//! # Filter Masks
//!
//! ```text
//! mask           := [fulltext_token] ("," field_token)*
//! field_token    := key "=" ["{" options "}"] ["\-"] pattern
//! fulltext_token := ["\-"] pattern
//! ```
//!
//! - Matching is case-insensitive substring containment.
//! - A comma separates tokens only when followed by a known key and `=`.
//! - `\-` negates a pattern.
//! - `{+HHMM}` sets the zone offset used to render `time` values.
//! - A field token with more than one `=` empties the result.
//!
//! | Key | Field(s) |
//! |-----|----------|
//! | `firstname`, `lastname`, `mail` | user name parts, email |
//! | `username` | username or user id |
//! | `action`, `desc` | action category or its description |
//! | `experiment`, `bucket`, `app` | labels and application name |
//! | `time` | timestamp rendered as `MMM d, yyyy HH:mm:ss a` |
//! | `attr`, `before`, `after` | changed property and its values |
//! | `fullname`, `user` | first and last name joined by a space |
//!
//! # Sort Orders
//!
//! A comma-separated list of keys, `-` prefix for descending. Absent values
//! sort last in either direction. Blank orders and `-time` keep the input
//! order.

mod config;
mod entry;
mod error;
mod mask;
mod ordering;
mod pipeline;
mod predicate;
mod property;
mod repository;
mod service;
pub mod time;

// Re-export public API
pub use config::{AuditLogConfig, DEFAULT_FETCH_LIMIT};
pub use entry::{AuditAction, AuditLogEntry, UserInfo};
pub use error::{MaskError, Result, SeekerError};
pub use mask::{split_tokens, FullText, Mask, Predicate, NEGATION};
pub use ordering::{
    compare_by_terms, compare_ignore_case, compare_nullable, Dir, SortOrder, SortTerm,
};
pub use pipeline::{filter, filter_with, process, process_with, sort};
pub use predicate::{contains, Evaluator};
pub use property::{Property, KEYS};
pub use repository::{newest_first, AuditLogRepository, InMemoryRepository, Scope};
pub use service::AuditLog;

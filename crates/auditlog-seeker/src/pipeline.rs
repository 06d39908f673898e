//! The filter-then-sort pipeline.
//!
//! Filtering keeps the relative order of surviving entries; sorting runs
//! only after filtering. Both steps take ownership of the entry list and
//! hand it back refined, so one list is never shared between concurrent
//! calls.

use tracing::{debug, warn};

use crate::entry::AuditLogEntry;
use crate::mask::Mask;
use crate::ordering::SortOrder;
use crate::predicate::Evaluator;

/// Filters entries by a mask, rendering times in UTC by default.
///
/// A blank mask returns the entries unchanged. A mask containing a field
/// token with more than one `=` returns an empty list.
pub fn filter(entries: Vec<AuditLogEntry>, filter_mask: &str) -> Vec<AuditLogEntry> {
    filter_with(entries, filter_mask, &Evaluator::new())
}

/// Filters entries by a mask using the given evaluator.
pub fn filter_with(
    mut entries: Vec<AuditLogEntry>,
    filter_mask: &str,
    evaluator: &Evaluator,
) -> Vec<AuditLogEntry> {
    let mask = match Mask::parse(filter_mask) {
        Ok(mask) => mask,
        Err(err) => {
            warn!(error = %err, "malformed filter mask, returning no entries");
            return Vec::new();
        }
    };
    if mask.is_empty() {
        return entries;
    }

    let before = entries.len();
    entries.retain(|entry| evaluator.matches_mask(entry, &mask));
    debug!(before, after = entries.len(), "filtered audit log entries");
    entries
}

/// Sorts entries by a sort-order string.
///
/// Blank orders and `-time` return the entries exactly as given.
pub fn sort(mut entries: Vec<AuditLogEntry>, sort_order: &str) -> Vec<AuditLogEntry> {
    let order = SortOrder::parse(sort_order);
    order.sort(&mut entries);
    entries
}

/// Filters and then sorts entries.
pub fn process(
    entries: Vec<AuditLogEntry>,
    filter_mask: &str,
    sort_order: &str,
) -> Vec<AuditLogEntry> {
    process_with(entries, filter_mask, sort_order, &Evaluator::new())
}

/// Filters with the given evaluator and then sorts entries.
pub fn process_with(
    entries: Vec<AuditLogEntry>,
    filter_mask: &str,
    sort_order: &str,
    evaluator: &Evaluator,
) -> Vec<AuditLogEntry> {
    sort(filter_with(entries, filter_mask, evaluator), sort_order)
}

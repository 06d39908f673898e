//! Sort orders for audit log entries.
//!
//! A sort order is a comma-separated list of keys, each optionally prefixed
//! with `-` for descending order:
//!
//! ```text
//! order := term ("," term)*
//! term  := ["-"] key
//! ```
//!
//! Terms are applied left to right; the first term that tells two entries
//! apart decides their order. Unknown keys are ignored. Absent values always
//! sort after present ones, in both directions.

use std::cmp::Ordering;

use tracing::debug;

use crate::entry::AuditLogEntry;
use crate::property::Property;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

/// One key of a sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortTerm {
    pub property: Property,
    pub dir: Dir,
}

impl SortTerm {
    pub fn new(property: Property, dir: Dir) -> Self {
        SortTerm { property, dir }
    }

    /// Compares two entries on this term, direction already applied.
    pub fn compare(&self, a: &AuditLogEntry, b: &AuditLogEntry) -> Ordering {
        let dir = self.dir;
        match self.property {
            Property::FirstName => compare_text(
                a.user.first_name.as_deref(),
                b.user.first_name.as_deref(),
                dir,
            ),
            Property::LastName => compare_text(
                a.user.last_name.as_deref(),
                b.user.last_name.as_deref(),
                dir,
            ),
            Property::Username | Property::User => compare_text(
                a.user.username.as_deref(),
                b.user.username.as_deref(),
                dir,
            )
            .then_with(|| {
                compare_text(a.user.user_id.as_deref(), b.user.user_id.as_deref(), dir)
            }),
            Property::Mail => {
                compare_text(a.user.email.as_deref(), b.user.email.as_deref(), dir)
            }
            Property::Action => {
                compare_nullable(a.action.as_ref(), b.action.as_ref(), dir, Ord::cmp)
            }
            Property::Experiment => compare_text(
                a.experiment_label.as_deref(),
                b.experiment_label.as_deref(),
                dir,
            ),
            Property::Bucket => {
                compare_text(a.bucket_label.as_deref(), b.bucket_label.as_deref(), dir)
            }
            Property::App => compare_text(
                a.application_name.as_deref(),
                b.application_name.as_deref(),
                dir,
            ),
            Property::Time => compare_nullable(a.time.as_ref(), b.time.as_ref(), dir, Ord::cmp),
            Property::Attr => compare_text(
                a.changed_property.as_deref(),
                b.changed_property.as_deref(),
                dir,
            ),
            Property::Before => compare_text(a.before.as_deref(), b.before.as_deref(), dir),
            Property::After => compare_text(a.after.as_deref(), b.after.as_deref(), dir),
            // Descriptions are always derivable, so no null handling.
            Property::Description => {
                dir.apply(compare_ignore_case(&a.description(), &b.description()))
            }
        }
    }
}

/// A parsed sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    terms: Vec<SortTerm>,
    preserve: bool,
}

impl SortOrder {
    /// Parses a sort-order string.
    ///
    /// Blank input and `-time` keep the input order untouched: that is the
    /// order repositories already deliver, so no sort is performed.
    pub fn parse(sort_order: &str) -> SortOrder {
        let trimmed = sort_order.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("-time") {
            return SortOrder::preserved();
        }

        let terms = trimmed
            .to_lowercase()
            .split(',')
            .filter_map(|term| {
                let term = term.trim();
                let (dir, key) = match term.strip_prefix('-') {
                    Some(key) => (Dir::Desc, key),
                    None => (Dir::Asc, term),
                };
                let property = Property::from_key(key);
                if property.is_none() {
                    debug!(key, "ignoring unknown sort key");
                }
                property.map(|property| SortTerm::new(property, dir))
            })
            .collect();

        SortOrder {
            terms,
            preserve: false,
        }
    }

    /// An order that leaves the input untouched.
    pub fn preserved() -> SortOrder {
        SortOrder {
            terms: Vec::new(),
            preserve: true,
        }
    }

    /// Returns `true` if sorting with this order must not touch the input.
    pub fn is_preserved(&self) -> bool {
        self.preserve
    }

    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    /// Compares two entries term by term.
    ///
    /// Returns `Equal` when every term ties, so a stable sort keeps their
    /// original relative order.
    pub fn compare(&self, a: &AuditLogEntry, b: &AuditLogEntry) -> Ordering {
        compare_by_terms(a, b, &self.terms)
    }

    /// Sorts entries in place. Stable; a preserved order is a no-op.
    pub fn sort(&self, entries: &mut [AuditLogEntry]) {
        if self.preserve || self.terms.is_empty() {
            return;
        }
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compares two entries using a list of terms.
///
/// Uses the first term as the primary sort key, the second to break ties,
/// and so on.
pub fn compare_by_terms(a: &AuditLogEntry, b: &AuditLogEntry, terms: &[SortTerm]) -> Ordering {
    terms
        .iter()
        .map(|term| term.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compares two optional values so that absent values sort last.
///
/// When both are present the comparison result is flipped for descending
/// order; the position of absent values is not.
pub fn compare_nullable<T: ?Sized>(
    a: Option<&T>,
    b: Option<&T>,
    dir: Dir,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(cmp(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>, dir: Dir) -> Ordering {
    compare_nullable(a, b, dir, compare_ignore_case)
}

/// Lexical comparison ignoring case.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

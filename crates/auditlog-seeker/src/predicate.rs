//! Predicate evaluation against audit log entries.
//!
//! All matching is case-insensitive substring containment on the string
//! form of a field. An absent field never contains anything. Negation flips
//! the outcome of one predicate as a whole: a negated predicate passes
//! exactly when its plain counterpart fails.

use chrono::FixedOffset;

use crate::entry::AuditLogEntry;
use crate::mask::{FullText, Mask, Predicate};
use crate::property::Property;
use crate::time::{format_like_ui, parse_offset};

/// Evaluates mask predicates against entries.
///
/// The evaluator carries the zone offset used to render `time` fields when
/// a predicate has no `{offset}` block of its own.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    default_offset: FixedOffset,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator {
            default_offset: parse_offset(""),
        }
    }
}

impl Evaluator {
    /// Creates an evaluator rendering times in UTC by default.
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// Sets the offset used for `time` predicates without options.
    pub fn with_default_offset(mut self, offset: FixedOffset) -> Self {
        self.default_offset = offset;
        self
    }

    /// Tests a single key/pattern pair against an entry.
    ///
    /// Unknown keys never contain the pattern, so they fail unless negated.
    pub fn matches(
        &self,
        entry: &AuditLogEntry,
        key: &str,
        pattern: &str,
        options: &str,
        negated: bool,
    ) -> bool {
        let found = Property::from_key(key)
            .is_some_and(|property| self.field_contains(entry, property, pattern, options));
        found != negated
    }

    /// Tests a parsed predicate against an entry.
    pub fn matches_predicate(&self, entry: &AuditLogEntry, predicate: &Predicate) -> bool {
        let found = predicate.property.is_some_and(|property| {
            self.field_contains(entry, property, &predicate.pattern, &predicate.options)
        });
        found != predicate.negated
    }

    /// Tests the full-text token against every field of an entry.
    ///
    /// The pattern matches when any registry field or the experiment id
    /// contains it. Option blocks recorded on the mask's field tokens apply
    /// to the corresponding fields here too. Negation applies to the
    /// combined result, not per field.
    pub fn matches_full_text(
        &self,
        entry: &AuditLogEntry,
        full_text: &FullText,
        mask: &Mask,
    ) -> bool {
        let pattern = full_text.pattern.as_str();
        let found = Property::ALL.iter().any(|&property| {
            let options = mask.options_for(property).unwrap_or_default();
            self.field_contains(entry, property, pattern, options)
        }) || contains(entry.experiment_id.as_deref(), pattern);
        found != full_text.negated
    }

    /// Tests a whole mask: every predicate and the full-text token must pass.
    pub fn matches_mask(&self, entry: &AuditLogEntry, mask: &Mask) -> bool {
        mask.predicates()
            .iter()
            .all(|predicate| self.matches_predicate(entry, predicate))
            && mask
                .full_text()
                .map_or(true, |full_text| self.matches_full_text(entry, full_text, mask))
    }

    /// Returns `true` if the field selected by `property` contains `pattern`.
    pub fn field_contains(
        &self,
        entry: &AuditLogEntry,
        property: Property,
        pattern: &str,
        options: &str,
    ) -> bool {
        let user = &entry.user;
        match property {
            Property::FirstName => contains(user.first_name.as_deref(), pattern),
            Property::LastName => contains(user.last_name.as_deref(), pattern),
            Property::Username => {
                contains(user.username.as_deref(), pattern)
                    || contains(user.user_id.as_deref(), pattern)
            }
            Property::Mail => contains(user.email.as_deref(), pattern),
            Property::Action | Property::Description => {
                contains(entry.action.map(|action| action.as_str()), pattern)
                    || contains(Some(entry.description().as_str()), pattern)
            }
            Property::Experiment => contains(entry.experiment_label.as_deref(), pattern),
            Property::Bucket => contains(entry.bucket_label.as_deref(), pattern),
            Property::App => contains(entry.application_name.as_deref(), pattern),
            Property::Time => {
                let offset = if options.trim().is_empty() {
                    self.default_offset
                } else {
                    parse_offset(options)
                };
                let rendered = entry.time.map(|time| format_like_ui(&time, offset));
                contains(rendered.as_deref(), pattern)
            }
            Property::Attr => contains(entry.changed_property.as_deref(), pattern),
            Property::Before => contains(entry.before.as_deref(), pattern),
            Property::After => contains(entry.after.as_deref(), pattern),
            Property::User => contains(Some(user.full_name().as_str()), pattern),
        }
    }
}

/// Case-insensitive containment; an absent container contains nothing.
pub fn contains(container: Option<&str>, pattern: &str) -> bool {
    container.is_some_and(|container| container.to_lowercase().contains(&pattern.to_lowercase()))
}

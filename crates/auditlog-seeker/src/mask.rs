//! Filter-mask parsing.
//!
//! A filter mask is a single string holding an optional full-text token
//! followed by field tokens:
//!
//! ```text
//! mask          := [fulltext_token] ("," field_token)*
//! field_token   := key "=" ["{" options "}"] ["\-"] pattern
//! fulltext_token := ["\-"] pattern
//! ```
//!
//! A comma only separates tokens when it is immediately followed by a
//! registry key and `=`. Every other comma belongs to the surrounding
//! pattern, so `experiment=a,b` searches for the literal `a,b`.
//!
//! The whole mask is lower-cased before scanning; matching is
//! case-insensitive throughout.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MaskError;
use crate::property::{key_assignment_prefix, Property};

/// Prefix that negates a pattern.
pub const NEGATION: &str = "\\-";

/// The full-text token of a mask, matched against every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullText {
    pub pattern: String,
    pub negated: bool,
}

/// One field-scoped predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// The key as written in the mask.
    pub key: String,
    /// The resolved property, `None` for unknown keys.
    pub property: Option<Property>,
    pub pattern: String,
    /// Contents of the `{...}` block, empty when absent.
    pub options: String,
    pub negated: bool,
}

/// A parsed filter mask.
///
/// An entry passes the mask when every predicate matches and, if present,
/// the full-text token matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    full_text: Option<FullText>,
    predicates: Vec<Predicate>,
    options: HashMap<Property, String>,
}

impl Mask {
    /// Parses a filter mask.
    ///
    /// Blank masks parse to an empty mask that matches everything. Field
    /// tokens without `=` and tokens with an empty value are skipped. A
    /// field token with more than one `=` makes the whole mask invalid.
    pub fn parse(filter_mask: &str) -> Result<Mask, MaskError> {
        if filter_mask.trim().is_empty() {
            return Ok(Mask::default());
        }

        let tokens = split_tokens(filter_mask);
        let mut mask = Mask::default();
        let mut field_tokens = tokens.iter();

        if let Some(first) = tokens.first() {
            if !first.contains('=') {
                let (negated, pattern) = strip_negation(first);
                mask.full_text = Some(FullText {
                    pattern: pattern.to_string(),
                    negated,
                });
                field_tokens.next();
            }
        }

        for token in field_tokens {
            match token.matches('=').count() {
                0 => {
                    debug!(token = token.as_str(), "skipping filter token without '='");
                    continue;
                }
                1 => {}
                _ => return Err(MaskError::AmbiguousToken(token.clone())),
            }

            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                debug!(key, "skipping filter token with empty value");
                continue;
            }

            let property = Property::from_key(key);
            let (options, value) = split_options(value);
            if let (Some(property), Some(options)) = (property, options) {
                mask.options.insert(property, options.to_string());
            }
            let (negated, pattern) = strip_negation(value);

            mask.predicates.push(Predicate {
                key: key.to_string(),
                property,
                pattern: pattern.to_string(),
                options: options.unwrap_or_default().to_string(),
                negated,
            });
        }

        debug!(
            full_text = mask.full_text.is_some(),
            predicates = mask.predicates.len(),
            "parsed filter mask"
        );
        Ok(mask)
    }

    /// Returns `true` if the mask filters nothing.
    pub fn is_empty(&self) -> bool {
        self.full_text.is_none() && self.predicates.is_empty()
    }

    /// Returns the full-text token, if the mask has one.
    pub fn full_text(&self) -> Option<&FullText> {
        self.full_text.as_ref()
    }

    /// Returns the field predicates in mask order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns the option block recorded for a property, if any.
    ///
    /// Options given on field tokens also apply when the full-text token
    /// searches that property.
    pub fn options_for(&self, property: Property) -> Option<&str> {
        self.options.get(&property).map(String::as_str)
    }
}

/// Splits a raw mask into lower-cased tokens.
///
/// A comma is a separator only when the text after it starts with a
/// registry key followed by `=`; other commas stay inside the token.
pub fn split_tokens(filter_mask: &str) -> Vec<String> {
    let lowered = filter_mask.to_lowercase();
    let mut tokens = Vec::new();
    let mut start = 0;

    for (idx, c) in lowered.char_indices() {
        if c != ',' {
            continue;
        }
        let rest = &lowered[idx + 1..];
        if key_assignment_prefix(rest).is_some() {
            tokens.push(lowered[start..idx].to_string());
            start = idx + 1;
        }
    }
    tokens.push(lowered[start..].to_string());
    tokens
}

/// Separates a leading `{options}` block from a token value.
fn split_options(value: &str) -> (Option<&str>, &str) {
    if let Some(inner) = value.strip_prefix('{') {
        if let Some(end) = inner.find('}') {
            return (Some(&inner[..end]), &inner[end + 1..]);
        }
    }
    (None, value)
}

fn strip_negation(value: &str) -> (bool, &str) {
    match value.strip_prefix(NEGATION) {
        Some(pattern) => (true, pattern),
        None => (false, value),
    }
}

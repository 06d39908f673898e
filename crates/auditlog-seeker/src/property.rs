//! The field registry.
//!
//! [`Property`] is the closed set of fields that filter masks and sort
//! orders can name. Each key string maps to exactly one property; `fullname`
//! and `user` are aliases. Unknown keys resolve to `None` and are inert.

use std::fmt;

/// A field of an [`AuditLogEntry`](crate::AuditLogEntry) addressable by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    FirstName,
    LastName,
    Username,
    Mail,
    Action,
    Description,
    Experiment,
    Bucket,
    App,
    Time,
    Attr,
    Before,
    After,
    /// First and last name combined.
    User,
}

/// Every recognized key, in registry order.
pub const KEYS: [&str; 15] = [
    "firstname",
    "lastname",
    "username",
    "mail",
    "action",
    "desc",
    "experiment",
    "bucket",
    "app",
    "time",
    "attr",
    "before",
    "after",
    "fullname",
    "user",
];

impl Property {
    /// Every property, in registry order.
    pub const ALL: [Property; 14] = [
        Property::FirstName,
        Property::LastName,
        Property::Username,
        Property::Mail,
        Property::Action,
        Property::Description,
        Property::Experiment,
        Property::Bucket,
        Property::App,
        Property::Time,
        Property::Attr,
        Property::Before,
        Property::After,
        Property::User,
    ];

    /// Looks up a property by its lower-case key.
    pub fn from_key(key: &str) -> Option<Property> {
        let property = match key {
            "firstname" => Property::FirstName,
            "lastname" => Property::LastName,
            "username" => Property::Username,
            "mail" => Property::Mail,
            "action" => Property::Action,
            "desc" => Property::Description,
            "experiment" => Property::Experiment,
            "bucket" => Property::Bucket,
            "app" => Property::App,
            "time" => Property::Time,
            "attr" => Property::Attr,
            "before" => Property::Before,
            "after" => Property::After,
            "fullname" | "user" => Property::User,
            _ => return None,
        };
        Some(property)
    }

    /// Returns the canonical key of this property.
    pub fn key(self) -> &'static str {
        match self {
            Property::FirstName => "firstname",
            Property::LastName => "lastname",
            Property::Username => "username",
            Property::Mail => "mail",
            Property::Action => "action",
            Property::Description => "desc",
            Property::Experiment => "experiment",
            Property::Bucket => "bucket",
            Property::App => "app",
            Property::Time => "time",
            Property::Attr => "attr",
            Property::Before => "before",
            Property::After => "after",
            Property::User => "fullname",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returns the registry key that `input` starts with, if that key is
/// immediately followed by `=`.
pub(crate) fn key_assignment_prefix(input: &str) -> Option<&'static str> {
    KEYS.iter().copied().find(|key| {
        input
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with('='))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves() {
        for key in KEYS {
            assert!(Property::from_key(key).is_some(), "{key} should resolve");
        }
    }

    #[test]
    fn canonical_keys_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::from_key(property.key()), Some(property));
        }
    }

    #[test]
    fn fullname_and_user_are_aliases() {
        assert_eq!(Property::from_key("fullname"), Some(Property::User));
        assert_eq!(Property::from_key("user"), Some(Property::User));
    }

    #[test]
    fn unknown_and_mixed_case_keys_are_inert() {
        assert_eq!(Property::from_key("nickname"), None);
        assert_eq!(Property::from_key("FirstName"), None);
        assert_eq!(Property::from_key(""), None);
    }

    #[test]
    fn assignment_prefix_requires_equals() {
        assert_eq!(key_assignment_prefix("app=wasabi"), Some("app"));
        assert_eq!(key_assignment_prefix("username=bob"), Some("username"));
        assert_eq!(key_assignment_prefix("user=bob"), Some("user"));
        assert_eq!(key_assignment_prefix("apple"), None);
        assert_eq!(key_assignment_prefix("app"), None);
        assert_eq!(key_assignment_prefix("nickname=bob"), None);
    }
}

//! Newtype wrappers for record identifiers, plus the id generator.
//!
//! The wrappers prevent accidentally mixing up ids of different record
//! kinds at compile time. Ids are opaque strings; within one collection
//! they are unique for the lifetime of the owning store.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype record id wrapping a `String`.
macro_rules! define_record_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_record_id! {
    /// Unique identifier for an expense record.
    ExpenseId
}

define_record_id! {
    /// Unique identifier for an income record.
    IncomeId
}

define_record_id! {
    /// Unique identifier for a debt record.
    DebtId
}

define_record_id! {
    /// Unique identifier for an expense category.
    CategoryId
}

/// Generator for fresh record id strings.
///
/// Ids are millisecond timestamps; when several ids are requested within
/// the same millisecond (or the clock steps backwards) a counter suffix is
/// appended so that rapid sequential creation never collides.
#[derive(Debug, Default)]
pub struct IdSequence {
    /// Timestamp of the most recently issued id, in Unix milliseconds.
    last_millis: i64,
    /// Collision counter within `last_millis`.
    counter: u32,
}

impl IdSequence {
    /// Creates a fresh sequence.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_millis: 0,
            counter: 0,
        }
    }

    /// Issues the next unique id string.
    #[must_use]
    pub fn next(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        if now > self.last_millis {
            self.last_millis = now;
            self.counter = 0;
            now.to_string()
        } else {
            self.counter += 1;
            format!("{}-{}", self.last_millis, self.counter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_id_serde_roundtrip() {
        let id = ExpenseId::new("1700000000000".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""1700000000000""#);
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn record_id_display() {
        let id = DebtId::new("abc-123".to_owned());
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn record_id_from_inner() {
        let id: CategoryId = "7".to_owned().into();
        assert_eq!(id.as_inner(), "7");
    }

    #[test]
    fn record_id_into_inner() {
        let id = IncomeId::new("i-1".to_owned());
        assert_eq!(id.into_inner(), "i-1");
    }

    #[test]
    fn sequence_never_collides_under_rapid_creation() {
        let mut seq = IdSequence::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0_i32..10_000_i32 {
            assert!(seen.insert(seq.next()), "duplicate id issued");
        }
    }

    #[test]
    fn sequence_appends_counter_within_same_millisecond() {
        let mut seq = IdSequence {
            last_millis: i64::MAX,
            counter: 0,
        };
        // Clock can never exceed last_millis, so every id takes the
        // counter-suffix path.
        let first = seq.next();
        let second = seq.next();
        assert_ne!(first, second);
        assert!(first.ends_with("-1"));
        assert!(second.ends_with("-2"));
    }
}

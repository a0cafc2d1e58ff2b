//! In-memory preferences storage for testing.
//!
//! Provides [`InMemoryPreferences`], a thread-safe in-memory slot. Ideal
//! for unit tests: the raw payload can be pre-loaded (including malformed
//! JSON) and writes can be made to fail on demand.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, TallybookError};
use crate::models::UserPreferences;
use crate::storage::PreferencesStore;

/// Inner mutable state.
#[derive(Debug, Default)]
struct Slot {
    /// Raw JSON payload, or `None` if the slot was never written.
    payload: Option<String>,
    /// When set, every save fails with a storage error.
    fail_writes: bool,
}

/// Thread-safe in-memory preferences slot.
///
/// Stores the *serialized* payload rather than the parsed record, so tests
/// can inject malformed JSON and exercise the load-failure path exactly as
/// a corrupted on-disk slot would.
///
/// # Example
///
/// ```rust
/// use tallybook::storage::{InMemoryPreferences, PreferencesStore};
///
/// let storage = InMemoryPreferences::new();
/// assert!(storage.load().unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Slot>,
}

impl InMemoryPreferences {
    /// Creates an empty slot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-loaded with the given raw payload. The payload
    /// is not validated — pass malformed JSON to test load failures.
    #[inline]
    #[must_use]
    pub fn with_payload(payload: &str) -> Self {
        Self {
            inner: Mutex::new(Slot {
                payload: Some(payload.to_owned()),
                fail_writes: false,
            }),
        }
    }

    /// Makes every subsequent save fail (or succeed again) with a storage
    /// error, simulating quota exhaustion.
    pub fn set_fail_writes(&self, fail_writes: bool) {
        self.lock().fail_writes = fail_writes;
    }

    /// Returns the raw stored payload, if any.
    #[must_use]
    pub fn raw_payload(&self) -> Option<String> {
        self.lock().payload.clone()
    }

    /// Locks the slot, absorbing poisoning.
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferencesStore for InMemoryPreferences {
    fn load(&self) -> Result<Option<UserPreferences>> {
        self.lock()
            .payload
            .as_deref()
            .map(|payload| serde_json::from_str(payload).map_err(TallybookError::from))
            .transpose()
    }

    fn save(&self, preferences: &UserPreferences) -> Result<()> {
        let json = serde_json::to_string(preferences)?;
        let mut slot = self.lock();
        if slot.fail_writes {
            return Err(TallybookError::Storage("simulated write failure".into()));
        }
        slot.payload = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock().payload = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_loads_none() {
        let storage = InMemoryPreferences::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let storage = InMemoryPreferences::new();
        let prefs = UserPreferences::default();
        storage.save(&prefs).unwrap();
        assert_eq!(storage.load().unwrap(), Some(prefs));
    }

    #[test]
    fn malformed_payload_fails_to_load() {
        let storage = InMemoryPreferences::with_payload("{not json");
        let err = storage.load().unwrap_err();
        assert!(matches!(err, TallybookError::Serialization(_)));
    }

    #[test]
    fn failing_writes_leave_slot_untouched() {
        let storage = InMemoryPreferences::new();
        storage.save(&UserPreferences::default()).unwrap();
        storage.set_fail_writes(true);
        let mut changed = UserPreferences::default();
        changed.currency = "USD".to_owned();
        assert!(storage.save(&changed).is_err());
        assert_eq!(storage.load().unwrap(), Some(UserPreferences::default()));
    }

    #[test]
    fn clear_empties_the_slot() {
        let storage = InMemoryPreferences::new();
        storage.save(&UserPreferences::default()).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}

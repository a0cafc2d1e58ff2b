//! Pluggable persistence for user preferences.
//!
//! This module defines [`PreferencesStore`], the local key/value surface
//! the settings store persists through: a single named slot holding the
//! JSON-serialized [`UserPreferences`](crate::models::UserPreferences)
//! record, written whole and read whole. There is no partial-field
//! persistence and no schema versioning — a malformed payload surfaces as
//! a serialization error and the caller falls back to the in-memory
//! record.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FilePreferences;
pub use memory::InMemoryPreferences;

use crate::error::Result;
use crate::models::UserPreferences;

/// Storage backend holding the preferences slot.
///
/// All methods take `&self` — implementations use interior mutability
/// (e.g. `Mutex`) for thread-safe mutation.
pub trait PreferencesStore: core::fmt::Debug + Send + Sync {
    /// Reads the stored preferences record.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read or the stored payload
    /// is not a valid preferences record.
    fn load(&self) -> Result<Option<UserPreferences>>;

    /// Writes the full preferences record into the slot, replacing any
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn save(&self, preferences: &UserPreferences) -> Result<()>;

    /// Empties the slot, as if it had never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn clear(&self) -> Result<()>;
}

//! JSON-file-based preferences storage.
//!
//! Stores the preferences slot as a single JSON file under a configurable
//! directory (default: the platform data dir, e.g.
//! `$XDG_DATA_HOME/tallybook/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, TallybookError, storage_io_error};
use crate::models::UserPreferences;
use crate::storage::PreferencesStore;

/// Application name used for the platform data directory.
const APP_NAME: &str = "tallybook";

/// File name of the preferences slot. Matches the key the original web
/// build used in browser local storage.
const SLOT_FILE: &str = "finance-settings.json";

/// File-backed preferences slot.
///
/// The record is written whole and read whole. Writes go through a
/// temporary file and an atomic rename, so a crashed write never leaves a
/// half-written slot behind. An in-process [`Mutex`] serializes concurrent
/// access; cross-process coordination is out of scope for a
/// single-instance client app.
///
/// # File layout
///
/// ```text
/// <dir>/
///   finance-settings.json
/// ```
#[derive(Debug)]
pub struct FilePreferences {
    /// Directory containing the slot file.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
}

impl FilePreferences {
    /// Creates a file-backed slot rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Creates a file-backed slot in the default platform data directory.
    ///
    /// On Linux: `$XDG_DATA_HOME/tallybook/` (typically
    /// `~/.local/share/tallybook/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined or created.
    #[inline]
    pub fn default_dir() -> Result<Self> {
        let dir = dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                TallybookError::Storage("could not determine platform data directory".into())
            })?;
        Self::new(dir)
    }

    /// Full path of the slot file.
    fn slot_path(&self) -> PathBuf {
        self.dir.join(SLOT_FILE)
    }

    /// Acquires the in-process lock, absorbing poisoning.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferencesStore for FilePreferences {
    fn load(&self) -> Result<Option<UserPreferences>> {
        let _guard = self.guard();
        match fs::read_to_string(self.slot_path()) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(TallybookError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    fn save(&self, preferences: &UserPreferences) -> Result<()> {
        let _guard = self.guard();
        let json = serde_json::to_string_pretty(preferences)?;
        let path = self.slot_path();
        let tmp_path = self.dir.join(format!("{SLOT_FILE}.tmp"));
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.guard();
        match fs::remove_file(self.slot_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreferencesPatch, ThemePreference};

    /// A slot rooted in a fresh temp dir, plus the dir guard.
    fn temp_slot() -> (FilePreferences, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FilePreferences::new(dir.path().to_path_buf()).unwrap();
        (storage, dir)
    }

    #[test]
    fn missing_file_loads_none() {
        let (storage, _dir) = temp_slot();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let (storage, _dir) = temp_slot();
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesPatch {
            theme: Some(ThemePreference::Dark),
            currency: Some("EUR".to_owned()),
            ..PreferencesPatch::default()
        });
        storage.save(&prefs).unwrap();
        assert_eq!(storage.load().unwrap(), Some(prefs));
    }

    #[test]
    fn malformed_payload_fails_to_load() {
        let (storage, dir) = temp_slot();
        fs::write(dir.path().join(SLOT_FILE), "{definitely not json").unwrap();
        let err = storage.load().unwrap_err();
        assert!(matches!(err, TallybookError::Serialization(_)));
    }

    #[test]
    fn save_replaces_whole_slot() {
        let (storage, _dir) = temp_slot();
        storage.save(&UserPreferences::default()).unwrap();
        let mut changed = UserPreferences::default();
        changed.language = "en-US".to_owned();
        storage.save(&changed).unwrap();
        assert_eq!(storage.load().unwrap(), Some(changed));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (storage, dir) = temp_slot();
        storage.save(&UserPreferences::default()).unwrap();
        assert!(!dir.path().join(format!("{SLOT_FILE}.tmp")).exists());
        assert!(dir.path().join(SLOT_FILE).exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let (storage, _dir) = temp_slot();
        storage.save(&UserPreferences::default()).unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}

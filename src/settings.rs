//! User-settings state container.
//!
//! [`SettingsStore`] owns the single [`UserPreferences`] record, resolves
//! the effective theme against the system color-scheme signal, and
//! persists the record through a [`PreferencesStore`] backend. It is the
//! sole integration point between preference state and the display layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::display::{DisplayEnvironment, SubscriptionId};
use crate::error::Result;
use crate::models::{PreferencesPatch, ResolvedTheme, ThemePreference, UserPreferences};
use crate::storage::PreferencesStore;

/// Currency code → display symbol table. Unknown codes fall back to the
/// raw code string.
const CURRENCY_SYMBOLS: [(&str, &str); 7] = [
    ("CNY", "¥"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("KRW", "₩"),
    ("HKD", "HK$"),
];

/// Mutable state of a [`SettingsStore`].
#[derive(Debug)]
struct SettingsState {
    /// Current preferences; always fully populated.
    preferences: UserPreferences,
    /// UI-facing loading flag. Bookkeeping only, never set by the core.
    is_loading: bool,
    /// Human-readable message from the last failed persistence write.
    error: Option<String>,
}

/// State container for user preferences with theme sync and persistence.
///
/// Mutating methods take `&self`: the state sits behind a `Mutex` so the
/// store can be shared via [`Arc`] with the color-scheme listener. Lock
/// poisoning is absorbed — every critical section leaves the state
/// coherent.
///
/// Persistence-write failures never roll back the in-memory preference
/// change; they are recorded in the [`error`](Self::error) field instead.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tallybook::display::HeadlessDisplay;
/// use tallybook::models::{PreferencesPatch, ResolvedTheme, ThemePreference};
/// use tallybook::settings::SettingsStore;
/// use tallybook::storage::InMemoryPreferences;
///
/// let store = SettingsStore::new(InMemoryPreferences::new(), Arc::new(HeadlessDisplay::new()));
/// store.update_preferences(PreferencesPatch {
///     theme: Some(ThemePreference::Dark),
///     ..PreferencesPatch::default()
/// });
/// assert_eq!(store.current_theme(), ResolvedTheme::Dark);
/// assert!(store.is_dark_mode());
/// ```
#[derive(Debug)]
pub struct SettingsStore<S: PreferencesStore, D: DisplayEnvironment> {
    /// Persistence backend for the preferences slot.
    storage: S,
    /// Host display layer (theme markers + system scheme signal).
    display: Arc<D>,
    /// Preferences plus UI bookkeeping.
    state: Mutex<SettingsState>,
}

/// Teardown capability for a color-scheme subscription.
///
/// Unsubscribes when dropped; the caller keeps it alive for as long as the
/// listening context lasts, preventing a dangling subscription.
#[derive(Debug)]
pub struct SchemeSubscription<D: DisplayEnvironment> {
    /// Display the subscription was registered with.
    display: Arc<D>,
    /// Live subscription id; taken on cancel/drop.
    id: Option<SubscriptionId>,
}

impl<D: DisplayEnvironment> SchemeSubscription<D> {
    /// Unsubscribes immediately. Equivalent to dropping the guard.
    #[inline]
    pub fn cancel(mut self) {
        self.release();
    }

    /// Removes the handler from the display, once.
    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.display.unsubscribe(id);
        }
    }
}

impl<D: DisplayEnvironment> Drop for SchemeSubscription<D> {
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: PreferencesStore, D: DisplayEnvironment> SettingsStore<S, D> {
    /// Creates a store with default preferences.
    ///
    /// Nothing is read from storage and no theme is applied yet; call
    /// [`load`](Self::load) and [`apply_theme`](Self::apply_theme) (or let
    /// `load` apply it on success) when the surrounding app is ready.
    #[inline]
    pub fn new(storage: S, display: Arc<D>) -> Self {
        Self {
            storage,
            display,
            state: Mutex::new(SettingsState {
                preferences: UserPreferences::default(),
                is_loading: false,
                error: None,
            }),
        }
    }

    /// Locks the state, absorbing poisoning.
    fn lock(&self) -> MutexGuard<'_, SettingsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current preferences record.
    #[must_use]
    pub fn preferences(&self) -> UserPreferences {
        self.lock().preferences.clone()
    }

    /// Merges the patch into the preferences, re-applies the theme, and
    /// persists the full record.
    ///
    /// A failed persistence write is caught: the message lands in
    /// [`error`](Self::error) and the merged in-memory record stays in
    /// effect.
    #[tracing::instrument(skip_all)]
    pub fn update_preferences(&self, patch: PreferencesPatch) {
        {
            let mut state = self.lock();
            state.preferences.apply(patch);
        }
        self.apply_theme();
        self.persist_caught();
    }

    /// The effective theme: an explicit preference passes through, `auto`
    /// resolves against the live system color-scheme signal at read time.
    #[must_use]
    pub fn current_theme(&self) -> ResolvedTheme {
        match self.lock().preferences.theme {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::Auto => {
                if self.display.prefers_dark() {
                    ResolvedTheme::Dark
                } else {
                    ResolvedTheme::Light
                }
            }
        }
    }

    /// `true` when the effective theme is dark.
    #[inline]
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.current_theme() == ResolvedTheme::Dark
    }

    /// Display symbol for the preferred currency; unrecognized codes are
    /// returned unchanged.
    #[must_use]
    pub fn currency_symbol(&self) -> String {
        let currency = self.lock().preferences.currency.clone();
        CURRENCY_SYMBOLS
            .iter()
            .find(|&&(code, _)| code == currency)
            .map_or(currency, |&(_, symbol)| symbol.to_owned())
    }

    /// Applies the effective theme to the display environment: clears any
    /// previous theme marker, sets the current one, and mirrors the value
    /// into the queryable theme attribute.
    pub fn apply_theme(&self) {
        let theme = self.current_theme();
        tracing::debug!(theme = %theme, "applying theme");
        self.display.remove_theme_markers();
        self.display.add_theme_marker(theme.marker());
        self.display.set_theme_attribute(theme.as_str());
    }

    /// Persists the full preferences record to the storage slot.
    ///
    /// This is the direct, error-surfacing path; the mutating methods call
    /// the catching wrapper instead.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    #[tracing::instrument(skip_all)]
    pub fn save(&self) -> Result<()> {
        let preferences = self.preferences();
        self.storage.save(&preferences)
    }

    /// Saves, catching any failure into the `error` field.
    fn persist_caught(&self) {
        if let Err(err) = self.save() {
            tracing::warn!(error = %err, "failed to persist preferences");
            self.lock().error = Some(err.to_string());
        }
    }

    /// Reloads preferences from the storage slot.
    ///
    /// On success the in-memory record is replaced wholesale and the theme
    /// re-applied; returns `true`. An empty slot is a no-op. A failed read
    /// (backend error, malformed payload) is logged and the current
    /// in-memory record is left untouched; returns `false`.
    #[tracing::instrument(skip_all)]
    pub fn load(&self) -> bool {
        match self.storage.load() {
            Ok(Some(preferences)) => {
                tracing::debug!("loaded stored preferences");
                self.lock().preferences = preferences;
                self.apply_theme();
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load stored preferences");
                false
            }
        }
    }

    /// Restores the default preferences, re-applies the theme, and
    /// persists (catching write failures like
    /// [`update_preferences`](Self::update_preferences)).
    #[tracing::instrument(skip_all)]
    pub fn reset(&self) {
        self.lock().preferences = UserPreferences::default();
        self.apply_theme();
        self.persist_caught();
    }

    /// Message from the last failed persistence write, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Clears the persistence-error message.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// UI-facing loading flag.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    /// Sets the UI-facing loading flag.
    pub fn set_loading(&self, is_loading: bool) {
        self.lock().is_loading = is_loading;
    }
}

impl<S, D> SettingsStore<S, D>
where
    S: PreferencesStore + 'static,
    D: DisplayEnvironment + 'static,
{
    /// Subscribes to system color-scheme changes.
    ///
    /// On each notification, if the stored preference is `auto`, the theme
    /// is re-applied — the *effective* theme tracks the system signal even
    /// though the stored preference does not change. The handler is
    /// idempotent and side-effect-only, so redundant notifications are
    /// harmless.
    ///
    /// The store is held weakly: dropping every other handle ends the
    /// reactions without the guard. Drop (or [`cancel`]) the returned
    /// subscription when the listening context ends.
    ///
    /// [`cancel`]: SchemeSubscription::cancel
    #[must_use]
    pub fn watch_color_scheme(self: Arc<Self>) -> SchemeSubscription<D> {
        let weak = Arc::downgrade(&self);
        let id = self.display.subscribe_scheme_changes(Arc::new(move || {
            if let Some(store) = weak.upgrade()
                && store.preferences().theme == ThemePreference::Auto
            {
                store.apply_theme();
            }
        }));
        SchemeSubscription {
            display: Arc::clone(&self.display),
            id: Some(id),
        }
    }
}

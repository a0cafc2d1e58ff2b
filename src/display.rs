//! Display-environment integration seam.
//!
//! The settings store talks to the host display layer through the
//! [`DisplayEnvironment`] trait: it writes a theme marker class onto the
//! root display element, mirrors the same value into a queryable
//! attribute, and reads the system color-scheme preference as a boolean
//! signal. [`HeadlessDisplay`] is the in-memory implementation used by
//! tests and non-GUI embedders; a real GUI adapter implements the same
//! trait.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked when the system color scheme changes.
pub type SchemeChangeHandler = Arc<dyn Fn() + Send + Sync>;

/// Opaque handle identifying one scheme-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Host display layer as seen by the settings store.
///
/// Notifications from [`subscribe_scheme_changes`] arrive out-of-band
/// relative to normal store calls, so handlers must be idempotent and
/// side-effect-only.
///
/// [`subscribe_scheme_changes`]: DisplayEnvironment::subscribe_scheme_changes
pub trait DisplayEnvironment: core::fmt::Debug + Send + Sync {
    /// Returns `true` if the system color scheme currently prefers dark.
    ///
    /// This is a live query; the answer can change between reads.
    fn prefers_dark(&self) -> bool;

    /// Removes every previously applied theme marker class.
    fn remove_theme_markers(&self);

    /// Adds a theme marker class to the root display element.
    fn add_theme_marker(&self, marker: &str);

    /// Mirrors the resolved theme name into a queryable attribute.
    fn set_theme_attribute(&self, value: &str);

    /// Registers a handler for system color-scheme changes.
    fn subscribe_scheme_changes(&self, handler: SchemeChangeHandler) -> SubscriptionId;

    /// Removes a previously registered handler. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Mutable state of a [`HeadlessDisplay`].
#[derive(Default)]
struct Inner {
    /// Simulated system color-scheme signal.
    prefers_dark: bool,
    /// Applied theme marker classes, in application order.
    markers: Vec<String>,
    /// Mirrored theme attribute, if any was ever set.
    attribute: Option<String>,
    /// Registered scheme-change handlers by subscription id.
    subscribers: HashMap<u64, SchemeChangeHandler>,
    /// Next subscription id to hand out.
    next_subscription: u64,
}

/// In-memory display environment.
///
/// Keeps the marker list, attribute slot, and a simulated color-scheme
/// signal; [`set_prefers_dark`](Self::set_prefers_dark) flips the signal
/// and delivers change notifications, standing in for the host
/// environment's media-query change event.
#[derive(Default)]
pub struct HeadlessDisplay {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Inner>,
}

impl core::fmt::Debug for HeadlessDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inner = self.lock();
        f.debug_struct("HeadlessDisplay")
            .field("prefers_dark", &inner.prefers_dark)
            .field("markers", &inner.markers)
            .field("attribute", &inner.attribute)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl HeadlessDisplay {
    /// Creates a display reporting a light system scheme, with no markers
    /// applied.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the inner state, absorbing poisoning: the state stays
    /// coherent even if a panicking thread held the lock.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flips the simulated system color-scheme signal and notifies every
    /// subscriber of the change.
    ///
    /// Handlers run after the lock is released, so they may call back into
    /// the display.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let handlers: Vec<SchemeChangeHandler> = {
            let mut inner = self.lock();
            inner.prefers_dark = prefers_dark;
            inner.subscribers.values().map(Arc::clone).collect()
        };
        tracing::trace!(prefers_dark, subscribers = handlers.len(), "scheme signal changed");
        for handler in handlers {
            handler();
        }
    }

    /// Currently applied theme marker classes, in application order.
    #[must_use]
    pub fn theme_markers(&self) -> Vec<String> {
        self.lock().markers.clone()
    }

    /// Current value of the mirrored theme attribute, if any.
    #[must_use]
    pub fn theme_attribute(&self) -> Option<String> {
        self.lock().attribute.clone()
    }

    /// Number of live scheme-change subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl DisplayEnvironment for HeadlessDisplay {
    #[inline]
    fn prefers_dark(&self) -> bool {
        self.lock().prefers_dark
    }

    fn remove_theme_markers(&self) {
        self.lock().markers.clear();
    }

    fn add_theme_marker(&self, marker: &str) {
        self.lock().markers.push(marker.to_owned());
    }

    fn set_theme_attribute(&self, value: &str) {
        self.lock().attribute = Some(value.to_owned());
    }

    fn subscribe_scheme_changes(&self, handler: SchemeChangeHandler) -> SubscriptionId {
        let mut inner = self.lock();
        let id = inner.next_subscription;
        inner.next_subscription += 1;
        drop(inner.subscribers.insert(id, handler));
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        drop(self.lock().subscribers.remove(&id.0));
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn markers_and_attribute_are_recorded() {
        let display = HeadlessDisplay::new();
        display.add_theme_marker("dark-theme");
        display.set_theme_attribute("dark");
        assert_eq!(display.theme_markers(), vec!["dark-theme".to_owned()]);
        assert_eq!(display.theme_attribute(), Some("dark".to_owned()));
        display.remove_theme_markers();
        assert!(display.theme_markers().is_empty());
    }

    #[test]
    fn scheme_change_notifies_subscribers() {
        let display = HeadlessDisplay::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&calls);
        let id = display.subscribe_scheme_changes(Arc::new(move || {
            let _ = observed.fetch_add(1, Ordering::SeqCst);
        }));
        display.set_prefers_dark(true);
        display.set_prefers_dark(false);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!display.prefers_dark());
        display.unsubscribe(id);
        display.set_prefers_dark(true);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handlers_may_read_the_display() {
        let display = Arc::new(HeadlessDisplay::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&seen);
        let inner_display = Arc::clone(&display);
        let _ = display.subscribe_scheme_changes(Arc::new(move || {
            // Re-entrant read: must not deadlock.
            if inner_display.prefers_dark() {
                let _ = observed.fetch_add(1, Ordering::SeqCst);
            }
        }));
        display.set_prefers_dark(true);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}

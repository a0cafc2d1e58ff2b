//! Enumeration types for constrained record values.

use serde::{Deserialize, Serialize};

/// Repayment status of a debt.
///
/// The status is plain data: nothing in the core derives it from the due
/// date or remaining amount. Transitions (`active` → `paid` | `overdue`,
/// `overdue` → `paid`) happen only through explicit debt updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebtStatus {
    /// Still being paid off.
    Active,
    /// Fully repaid.
    Paid,
    /// Past its due date with a balance remaining.
    Overdue,
}

/// User-selected theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemePreference {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the system color scheme.
    Auto,
}

/// A theme after resolving [`ThemePreference::Auto`] against the system
/// color-scheme signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl ResolvedTheme {
    /// Returns the lowercase theme name (`"light"` / `"dark"`), as mirrored
    /// into the display environment's theme attribute.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the marker class applied to the display environment
    /// (`"light-theme"` / `"dark-theme"`).
    #[inline]
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Light => "light-theme",
            Self::Dark => "dark-theme",
        }
    }
}

impl core::fmt::Display for ResolvedTheme {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_status_serde_roundtrip() {
        let variants = [DebtStatus::Active, DebtStatus::Paid, DebtStatus::Overdue];
        for variant in variants {
            let json = serde_json::to_string(&variant).unwrap();
            let deserialized: DebtStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn debt_status_wire_names() {
        assert_eq!(serde_json::to_string(&DebtStatus::Active).unwrap(), r#""active""#);
        assert_eq!(serde_json::to_string(&DebtStatus::Overdue).unwrap(), r#""overdue""#);
    }

    #[test]
    fn theme_preference_wire_names() {
        assert_eq!(serde_json::to_string(&ThemePreference::Auto).unwrap(), r#""auto""#);
        let deserialized: ThemePreference = serde_json::from_str(r#""dark""#).unwrap();
        assert_eq!(deserialized, ThemePreference::Dark);
    }

    #[test]
    fn resolved_theme_markers() {
        assert_eq!(ResolvedTheme::Light.marker(), "light-theme");
        assert_eq!(ResolvedTheme::Dark.marker(), "dark-theme");
        assert_eq!(ResolvedTheme::Dark.to_string(), "dark");
    }
}

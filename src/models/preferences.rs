//! User display preferences.

use serde::{Deserialize, Serialize};

use super::ThemePreference;

/// Per-session user preferences.
///
/// The record is always fully populated: partial updates go through
/// [`PreferencesPatch`], which merges into an existing complete record.
/// One instance exists per application session; it is reset to defaults,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Theme preference (light, dark, or follow the system).
    pub theme: ThemePreference,
    /// UI locale tag (e.g. `zh-CN`).
    pub language: String,
    /// ISO-like currency code (e.g. `CNY`).
    pub currency: String,
    /// Date display pattern (e.g. `YYYY-MM-DD`).
    pub date_format: String,
    /// Whether budget alerts are enabled.
    pub budget_alerts: bool,
}

impl Default for UserPreferences {
    #[inline]
    fn default() -> Self {
        Self {
            theme: ThemePreference::Auto,
            language: "zh-CN".to_owned(),
            currency: "CNY".to_owned(),
            date_format: "YYYY-MM-DD".to_owned(),
            budget_alerts: true,
        }
    }
}

/// A partial-field update for [`UserPreferences`]. Unset fields keep their
/// current values, so the merged record stays fully populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    /// New theme preference, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
    /// New locale tag, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// New currency code, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// New date pattern, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// New budget-alert flag, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_alerts: Option<bool>,
}

impl UserPreferences {
    /// Shallow-merges the patch into this record.
    pub(crate) fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(date_format) = patch.date_format {
            self.date_format = date_format;
        }
        if let Some(budget_alerts) = patch.budget_alerts {
            self.budget_alerts = budget_alerts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.theme, ThemePreference::Auto);
        assert_eq!(prefs.language, "zh-CN");
        assert_eq!(prefs.currency, "CNY");
        assert_eq!(prefs.date_format, "YYYY-MM-DD");
        assert!(prefs.budget_alerts);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_string(&UserPreferences::default()).unwrap();
        assert!(json.contains(r#""dateFormat":"YYYY-MM-DD""#));
        assert!(json.contains(r#""budgetAlerts":true"#));
        assert!(json.contains(r#""theme":"auto""#));
    }

    #[test]
    fn patch_keeps_record_fully_populated() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesPatch {
            theme: Some(ThemePreference::Dark),
            currency: Some("USD".to_owned()),
            ..PreferencesPatch::default()
        });
        assert_eq!(prefs.theme, ThemePreference::Dark);
        assert_eq!(prefs.currency, "USD");
        // Untouched fields keep their defaults.
        assert_eq!(prefs.language, "zh-CN");
        assert!(prefs.budget_alerts);
    }

    #[test]
    fn roundtrip_matches_saved_record() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferencesPatch {
            language: Some("en-US".to_owned()),
            budget_alerts: Some(false),
            ..PreferencesPatch::default()
        });
        let json = serde_json::to_string(&prefs).unwrap();
        let loaded: UserPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, prefs);
    }
}

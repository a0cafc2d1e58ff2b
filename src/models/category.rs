//! Expense category model.

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// An expense category with display metadata.
///
/// Expenses reference categories *by name* ([`super::Expense::category`]),
/// not by id. The coupling is deliberately loose: renaming a category does
/// not rewrite existing expense records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier within the category collection.
    pub id: CategoryId,
    /// Category name, matched as free text from expenses.
    pub name: String,
    /// Display glyph (emoji or short text).
    pub icon: String,
    /// Display color (CSS-style hex string).
    pub color: String,
}

/// A category as supplied by the caller, before the store assigns an id.
///
/// Categories are add-only in the store: there is no patch type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    /// Category name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Display color.
    pub color: String,
}

impl CategoryDraft {
    /// Attaches the given id, producing a full record.
    pub(crate) fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            icon: self.icon,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_category() {
        let json = r##"{
            "id": "1",
            "name": "住房",
            "icon": "🏠",
            "color": "#4F46E5"
        }"##;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new("1".to_owned()));
        assert_eq!(category.name, "住房");
        assert_eq!(category.icon, "🏠");
        assert_eq!(category.color, "#4F46E5");
    }

    #[test]
    fn serialize_roundtrip() {
        let category = Category {
            id: CategoryId::new("c-1".to_owned()),
            name: "交通".to_owned(),
            icon: "🚗".to_owned(),
            color: "#10B981".to_owned(),
        };
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, category);
    }
}

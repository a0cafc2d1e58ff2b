//! Expense record model.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ExpenseId;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier within the expense collection.
    pub id: ExpenseId,
    /// Spent amount. Non-negative by convention; the store does not
    /// validate ranges (caller responsibility).
    pub amount: Decimal,
    /// Category *name*. Matched against [`super::Category::name`] as free
    /// text, not by id — renaming a category does not rewrite expenses.
    pub category: String,
    /// Calendar date of the expense.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Labels attached to the expense. A set: order is irrelevant and
    /// duplicates collapse.
    pub tags: BTreeSet<String>,
}

/// An expense as supplied by the caller, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    /// Spent amount.
    pub amount: Decimal,
    /// Category name (free text).
    pub category: String,
    /// Calendar date of the expense.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Labels attached to the expense.
    pub tags: BTreeSet<String>,
}

impl ExpenseDraft {
    /// Attaches the given id, producing a full record.
    pub(crate) fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// A partial-field update for an expense. Unset fields keep their current
/// values; the id is never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    /// New amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// New category name, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New date, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement tag set, if changing. Replaces the whole set — the merge
    /// is shallow, matching the other record fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
}

impl Expense {
    /// Shallow-merges the patch into this record, preserving the id.
    pub(crate) fn apply(&mut self, patch: ExpensePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

//! Data models for the financial state core.
//!
//! This module contains the value records owned by the stores, newtype id
//! wrappers, draft/patch types for create and partial-update operations,
//! and enumeration types for constrained values.

mod category;
mod debt;
mod enums;
mod expense;
mod ids;
mod income;
mod preferences;

pub use category::{Category, CategoryDraft};
pub use debt::{Debt, DebtDraft, DebtPatch};
pub use enums::{DebtStatus, ResolvedTheme, ThemePreference};
pub use expense::{Expense, ExpenseDraft, ExpensePatch};
pub use ids::{CategoryId, DebtId, ExpenseId, IdSequence, IncomeId};
pub use income::{Income, IncomeDraft, IncomePatch};
pub use preferences::{PreferencesPatch, UserPreferences};

//! Debt record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DebtId, DebtStatus};

/// An outstanding debt being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    /// Unique identifier within the debt collection.
    pub id: DebtId,
    /// Display name of the debt.
    pub name: String,
    /// Original borrowed amount (>= 0).
    pub total_amount: Decimal,
    /// Amount still owed. Expected to satisfy
    /// `0 <= remaining_amount <= total_amount`, but not enforced.
    pub remaining_amount: Decimal,
    /// Fractional yearly interest rate (`0.05` = 5%).
    pub interest_rate: Decimal,
    /// Date the next payment is due.
    pub due_date: NaiveDate,
    /// Repayment status. Never derived automatically; see
    /// [`DebtStatus`].
    pub status: DebtStatus,
}

/// A debt as supplied by the caller, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtDraft {
    /// Display name of the debt.
    pub name: String,
    /// Original borrowed amount.
    pub total_amount: Decimal,
    /// Amount still owed.
    pub remaining_amount: Decimal,
    /// Fractional yearly interest rate.
    pub interest_rate: Decimal,
    /// Date the next payment is due.
    pub due_date: NaiveDate,
    /// Repayment status.
    pub status: DebtStatus,
}

impl DebtDraft {
    /// Attaches the given id, producing a full record.
    pub(crate) fn into_debt(self, id: DebtId) -> Debt {
        Debt {
            id,
            name: self.name,
            total_amount: self.total_amount,
            remaining_amount: self.remaining_amount,
            interest_rate: self.interest_rate,
            due_date: self.due_date,
            status: self.status,
        }
    }
}

/// A partial-field update for a debt record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPatch {
    /// New name, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New total amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    /// New remaining amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<Decimal>,
    /// New interest rate, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    /// New due date, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// New status, if changing. This is the only way status transitions
    /// happen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DebtStatus>,
}

impl Debt {
    /// Shallow-merges the patch into this record, preserving the id.
    pub(crate) fn apply(&mut self, patch: DebtPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(total_amount) = patch.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(remaining_amount) = patch.remaining_amount {
            self.remaining_amount = remaining_amount;
        }
        if let Some(interest_rate) = patch.interest_rate {
            self.interest_rate = interest_rate;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

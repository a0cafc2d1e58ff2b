//! Network service collaborator.
//!
//! A real deployment fronts the stores with a request/response service:
//! every create returns the full stored record including a server-assigned
//! id, every list returns the full current collection, and failures
//! surface as [`TallybookError::Service`] — logged here and re-raised to
//! the caller, single attempt, no retry. The in-memory stores do not call
//! this layer themselves; the composition root wires the two together.
//!
//! [`MockFinanceApi`] stands in for the remote side: an in-process
//! collection per entity kind plus the fixed statistics and category
//! catalog the real backend would serve.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallybookError};
use crate::models::{
    Category, CategoryDraft, CategoryId, Debt, DebtDraft, DebtId, DebtPatch, Expense,
    ExpenseDraft, ExpenseId, ExpensePatch, IdSequence, Income, IncomeDraft, IncomeId, IncomePatch,
};

/// Aggregate figures served by the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    /// Sum of all income amounts.
    pub total_income: Decimal,
    /// Sum of all expense amounts.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_income: Decimal,
    /// Sum of remaining debt amounts.
    pub total_debt: Decimal,
}

/// Request/response surface of the finance backend.
///
/// # Errors
///
/// Every method fails with [`TallybookError::Service`] when the backend
/// reports an error; implementations log the failure before re-raising it.
pub trait FinanceApi: core::fmt::Debug + Send + Sync {
    /// Returns the full expense collection.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Creates an expense; the returned record carries the
    /// server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn create_expense(&self, draft: ExpenseDraft) -> Result<Expense>;

    /// Applies a partial update to the expense with the given id and
    /// returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails or the id is
    /// unknown to the backend.
    fn update_expense(&self, id: &ExpenseId, patch: ExpensePatch) -> Result<Expense>;

    /// Deletes the expense with the given id; `Ok(true)` when a record was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn delete_expense(&self, id: &ExpenseId) -> Result<bool>;

    /// Returns the full income collection.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn list_incomes(&self) -> Result<Vec<Income>>;

    /// Creates an income; the returned record carries the server-assigned
    /// id.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn create_income(&self, draft: IncomeDraft) -> Result<Income>;

    /// Applies a partial update to the income with the given id and
    /// returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails or the id is
    /// unknown to the backend.
    fn update_income(&self, id: &IncomeId, patch: IncomePatch) -> Result<Income>;

    /// Deletes the income with the given id; `Ok(true)` when a record was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn delete_income(&self, id: &IncomeId) -> Result<bool>;

    /// Returns the full debt collection.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn list_debts(&self) -> Result<Vec<Debt>>;

    /// Creates a debt; the returned record carries the server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn create_debt(&self, draft: DebtDraft) -> Result<Debt>;

    /// Applies a partial update to the debt with the given id and returns
    /// the updated record.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails or the id is
    /// unknown to the backend.
    fn update_debt(&self, id: &DebtId, patch: DebtPatch) -> Result<Debt>;

    /// Deletes the debt with the given id; `Ok(true)` when a record was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn delete_debt(&self, id: &DebtId) -> Result<bool>;

    /// Returns the category catalog.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Creates a category; the returned record carries the
    /// server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn create_category(&self, draft: CategoryDraft) -> Result<Category>;

    /// Fetches the aggregate statistics.
    ///
    /// # Errors
    ///
    /// Returns a service error if the backend call fails.
    fn financial_stats(&self) -> Result<FinancialStats>;
}

/// Catalog served by the mock's category endpoint (name, icon, color).
const MOCK_CATALOG: [(&str, &str, &str); 6] = [
    ("餐饮", "🍽️", "#ef4444"),
    ("交通", "🚗", "#3b82f6"),
    ("购物", "🛍️", "#8b5cf6"),
    ("娱乐", "🎬", "#ec4899"),
    ("医疗", "🏥", "#10b981"),
    ("住房", "🏠", "#f59e0b"),
];

/// Inner mutable state of the mock.
#[derive(Debug, Default)]
struct MockState {
    /// Server-side expense collection.
    expenses: Vec<Expense>,
    /// Server-side income collection.
    incomes: Vec<Income>,
    /// Server-side debt collection.
    debts: Vec<Debt>,
    /// Generator for server-assigned ids.
    ids: IdSequence,
    /// When set, every call fails with a service error.
    fail: bool,
}

/// In-process stand-in for the finance backend.
///
/// Collections start empty; creates append and echo the stored record
/// with a fresh server-assigned id, exactly the contract the stores would
/// reconcile against. `set_fail` turns every call into a logged,
/// re-raised service error to exercise caller error handling.
#[derive(Debug, Default)]
pub struct MockFinanceApi {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<MockState>,
}

impl MockFinanceApi {
    /// Creates a mock with empty collections.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.lock().fail = fail;
    }

    /// Locks the state, absorbing poisoning.
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fails the given endpoint if the failure switch is on, logging the
    /// error before raising it.
    fn check_failure(state: &MockState, endpoint: &str) -> Result<()> {
        if state.fail {
            let err = TallybookError::Service(format!("{endpoint}: backend unavailable"));
            tracing::warn!(endpoint, error = %err, "finance service call failed");
            return Err(err);
        }
        Ok(())
    }

    /// A not-found service error for the given endpoint, logged.
    fn not_found(endpoint: &str, id: &dyn core::fmt::Display) -> TallybookError {
        let err = TallybookError::Service(format!("{endpoint}: no record with id {id}"));
        tracing::warn!(endpoint, error = %err, "finance service call failed");
        err
    }
}

impl FinanceApi for MockFinanceApi {
    #[tracing::instrument(skip_all)]
    fn list_expenses(&self) -> Result<Vec<Expense>> {
        let state = self.lock();
        Self::check_failure(&state, "list_expenses")?;
        Ok(state.expenses.clone())
    }

    #[tracing::instrument(skip_all)]
    fn create_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        let mut state = self.lock();
        Self::check_failure(&state, "create_expense")?;
        let id = ExpenseId::new(state.ids.next());
        let expense = draft.into_expense(id);
        state.expenses.push(expense.clone());
        Ok(expense)
    }

    #[tracing::instrument(skip_all)]
    fn update_expense(&self, id: &ExpenseId, patch: ExpensePatch) -> Result<Expense> {
        let mut state = self.lock();
        Self::check_failure(&state, "update_expense")?;
        state
            .expenses
            .iter_mut()
            .find(|expense| expense.id == *id)
            .map(|expense| {
                expense.apply(patch);
                expense.clone()
            })
            .ok_or_else(|| Self::not_found("update_expense", id))
    }

    #[tracing::instrument(skip_all)]
    fn delete_expense(&self, id: &ExpenseId) -> Result<bool> {
        let mut state = self.lock();
        Self::check_failure(&state, "delete_expense")?;
        let before = state.expenses.len();
        state.expenses.retain(|expense| expense.id != *id);
        Ok(before != state.expenses.len())
    }

    #[tracing::instrument(skip_all)]
    fn list_incomes(&self) -> Result<Vec<Income>> {
        let state = self.lock();
        Self::check_failure(&state, "list_incomes")?;
        Ok(state.incomes.clone())
    }

    #[tracing::instrument(skip_all)]
    fn create_income(&self, draft: IncomeDraft) -> Result<Income> {
        let mut state = self.lock();
        Self::check_failure(&state, "create_income")?;
        let id = IncomeId::new(state.ids.next());
        let income = draft.into_income(id);
        state.incomes.push(income.clone());
        Ok(income)
    }

    #[tracing::instrument(skip_all)]
    fn update_income(&self, id: &IncomeId, patch: IncomePatch) -> Result<Income> {
        let mut state = self.lock();
        Self::check_failure(&state, "update_income")?;
        state
            .incomes
            .iter_mut()
            .find(|income| income.id == *id)
            .map(|income| {
                income.apply(patch);
                income.clone()
            })
            .ok_or_else(|| Self::not_found("update_income", id))
    }

    #[tracing::instrument(skip_all)]
    fn delete_income(&self, id: &IncomeId) -> Result<bool> {
        let mut state = self.lock();
        Self::check_failure(&state, "delete_income")?;
        let before = state.incomes.len();
        state.incomes.retain(|income| income.id != *id);
        Ok(before != state.incomes.len())
    }

    #[tracing::instrument(skip_all)]
    fn list_debts(&self) -> Result<Vec<Debt>> {
        let state = self.lock();
        Self::check_failure(&state, "list_debts")?;
        Ok(state.debts.clone())
    }

    #[tracing::instrument(skip_all)]
    fn create_debt(&self, draft: DebtDraft) -> Result<Debt> {
        let mut state = self.lock();
        Self::check_failure(&state, "create_debt")?;
        let id = DebtId::new(state.ids.next());
        let debt = draft.into_debt(id);
        state.debts.push(debt.clone());
        Ok(debt)
    }

    #[tracing::instrument(skip_all)]
    fn update_debt(&self, id: &DebtId, patch: DebtPatch) -> Result<Debt> {
        let mut state = self.lock();
        Self::check_failure(&state, "update_debt")?;
        state
            .debts
            .iter_mut()
            .find(|debt| debt.id == *id)
            .map(|debt| {
                debt.apply(patch);
                debt.clone()
            })
            .ok_or_else(|| Self::not_found("update_debt", id))
    }

    #[tracing::instrument(skip_all)]
    fn delete_debt(&self, id: &DebtId) -> Result<bool> {
        let mut state = self.lock();
        Self::check_failure(&state, "delete_debt")?;
        let before = state.debts.len();
        state.debts.retain(|debt| debt.id != *id);
        Ok(before != state.debts.len())
    }

    #[tracing::instrument(skip_all)]
    fn list_categories(&self) -> Result<Vec<Category>> {
        let state = self.lock();
        Self::check_failure(&state, "list_categories")?;
        Ok(MOCK_CATALOG
            .iter()
            .enumerate()
            .map(|(index, &(name, icon, color))| Category {
                id: CategoryId::new((index + 1).to_string()),
                name: name.to_owned(),
                icon: icon.to_owned(),
                color: color.to_owned(),
            })
            .collect())
    }

    #[tracing::instrument(skip_all)]
    fn create_category(&self, draft: CategoryDraft) -> Result<Category> {
        let mut state = self.lock();
        Self::check_failure(&state, "create_category")?;
        let id = CategoryId::new(state.ids.next());
        Ok(draft.into_category(id))
    }

    #[tracing::instrument(skip_all)]
    fn financial_stats(&self) -> Result<FinancialStats> {
        let state = self.lock();
        Self::check_failure(&state, "financial_stats")?;
        Ok(FinancialStats {
            total_income: Decimal::from(50_000_u32),
            total_expenses: Decimal::from(35_000_u32),
            net_income: Decimal::from(15_000_u32),
            total_debt: Decimal::from(20_000_u32),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;

    /// A minimal expense draft.
    fn coffee() -> ExpenseDraft {
        ExpenseDraft {
            amount: Decimal::from(18_u32),
            category: "餐饮".to_owned(),
            date: NaiveDate::from_ymd_opt(2023, 6, 12).unwrap(),
            description: "咖啡".to_owned(),
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn collections_start_empty() {
        let api = MockFinanceApi::new();
        assert!(api.list_expenses().unwrap().is_empty());
        assert!(api.list_incomes().unwrap().is_empty());
        assert!(api.list_debts().unwrap().is_empty());
    }

    #[test]
    fn create_returns_record_with_assigned_id() {
        let api = MockFinanceApi::new();
        let created = api.create_expense(coffee()).unwrap();
        assert!(!created.id.as_inner().is_empty());
        assert_eq!(api.list_expenses().unwrap(), vec![created]);
    }

    #[test]
    fn update_echoes_the_merged_record() {
        let api = MockFinanceApi::new();
        let created = api.create_expense(coffee()).unwrap();
        let updated = api
            .update_expense(
                &created.id,
                ExpensePatch {
                    amount: Some(Decimal::from(22_u32)),
                    ..ExpensePatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, Decimal::from(22_u32));
    }

    #[test]
    fn update_unknown_id_is_a_service_error() {
        let api = MockFinanceApi::new();
        let err = api
            .update_expense(&ExpenseId::new("missing".to_owned()), ExpensePatch::default())
            .unwrap_err();
        assert!(matches!(err, TallybookError::Service(_)));
    }

    #[test]
    fn delete_reports_whether_a_record_was_removed() {
        let api = MockFinanceApi::new();
        let created = api.create_expense(coffee()).unwrap();
        assert!(api.delete_expense(&created.id).unwrap());
        assert!(!api.delete_expense(&created.id).unwrap());
    }

    #[test]
    fn catalog_and_stats_are_fixed() {
        let api = MockFinanceApi::new();
        let catalog = api.list_categories().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.first().unwrap().name, "餐饮");
        let stats = api.financial_stats().unwrap();
        assert_eq!(stats.net_income, stats.total_income - stats.total_expenses);
        assert_eq!(stats.total_debt, Decimal::from(20_000_u32));
    }

    #[test]
    fn failure_switch_fails_every_endpoint() {
        let api = MockFinanceApi::new();
        api.set_fail(true);
        assert!(api.list_expenses().is_err());
        assert!(api.financial_stats().is_err());
        assert!(api.create_expense(coffee()).is_err());
        api.set_fail(false);
        assert!(api.list_expenses().is_ok());
    }
}

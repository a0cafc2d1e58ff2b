//! In-memory financial state container.
//!
//! [`FinanceStore`] owns the four record collections (expenses, incomes,
//! debts, categories) and exposes the derived aggregates computed from
//! them. It performs no I/O: the store is a plain value owned by the
//! application's composition root and handed to whichever component needs
//! read or write access — there is no process-wide singleton.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    Category, CategoryDraft, CategoryId, Debt, DebtDraft, DebtId, DebtPatch, Expense,
    ExpenseDraft, ExpenseId, ExpensePatch, IdSequence, Income, IncomeDraft, IncomeId, IncomePatch,
};

/// In-memory store for financial records with derived aggregates.
///
/// Mutators append, merge, or remove records; aggregates are recomputed
/// from the current collections on every read, so every reader sees values
/// consistent with the latest mutation.
///
/// Update and delete operations taking an absent id are non-erroring
/// no-ops; they return `false` so callers *can* distinguish the case, but
/// nothing forces them to.
///
/// # Examples
///
/// ```
/// use tallybook::finance::FinanceStore;
///
/// let store = FinanceStore::new();
/// assert_eq!(store.net_income(), store.total_income() - store.total_expenses());
/// ```
#[derive(Debug)]
pub struct FinanceStore {
    /// Recorded expenses, in insertion order.
    expenses: Vec<Expense>,
    /// Recorded incomes, in insertion order.
    incomes: Vec<Income>,
    /// Tracked debts, in insertion order.
    debts: Vec<Debt>,
    /// Known categories, in insertion order.
    categories: Vec<Category>,
    /// Generator for fresh record ids.
    ids: IdSequence,
}

/// Builds a seed date. Seed constants are valid calendar dates; the
/// fallback never fires.
fn seed_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Default category catalog (name, icon, color) used to pre-populate new
/// stores. Static configuration data, not computed.
const DEFAULT_CATEGORIES: [(&str, &str, &str); 7] = [
    ("住房", "🏠", "#4F46E5"),
    ("餐饮", "🍽️", "#EC4899"),
    ("交通", "🚗", "#10B981"),
    ("购物", "🛍️", "#F59E0B"),
    ("娱乐", "🎬", "#8B5CF6"),
    ("医疗", "🏥", "#EF4444"),
    ("教育", "📚", "#3B82F6"),
];

impl FinanceStore {
    /// Creates a store seeded with example records (a warm-cache stand-in
    /// until real data is loaded) and the default category catalog.
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.expenses = vec![
            Expense {
                id: ExpenseId::new("1".to_owned()),
                amount: Decimal::from(2500_u32),
                category: "住房".to_owned(),
                date: seed_date(2023, 6, 1),
                description: "房租".to_owned(),
                tags: ["必要".to_owned()].into(),
            },
            Expense {
                id: ExpenseId::new("2".to_owned()),
                amount: Decimal::from(800_u32),
                category: "餐饮".to_owned(),
                date: seed_date(2023, 6, 5),
                description: "超市购物".to_owned(),
                tags: ["日常".to_owned()].into(),
            },
            Expense {
                id: ExpenseId::new("3".to_owned()),
                amount: Decimal::from(300_u32),
                category: "交通".to_owned(),
                date: seed_date(2023, 6, 10),
                description: "地铁月卡".to_owned(),
                tags: ["必要".to_owned()].into(),
            },
        ];
        store.incomes = vec![
            Income {
                id: IncomeId::new("1".to_owned()),
                amount: Decimal::from(12_000_u32),
                source: "工资".to_owned(),
                date: seed_date(2023, 6, 1),
                description: "6月工资".to_owned(),
            },
            Income {
                id: IncomeId::new("2".to_owned()),
                amount: Decimal::from(1500_u32),
                source: "兼职".to_owned(),
                date: seed_date(2023, 6, 15),
                description: "项目奖金".to_owned(),
            },
        ];
        store.debts = vec![
            Debt {
                id: DebtId::new("1".to_owned()),
                name: "信用卡欠款".to_owned(),
                total_amount: Decimal::from(5000_u32),
                remaining_amount: Decimal::from(2500_u32),
                interest_rate: Decimal::new(5, 2),
                due_date: seed_date(2023, 7, 1),
                status: crate::models::DebtStatus::Active,
            },
            Debt {
                id: DebtId::new("2".to_owned()),
                name: "个人贷款".to_owned(),
                total_amount: Decimal::from(50_000_u32),
                remaining_amount: Decimal::from(45_000_u32),
                interest_rate: Decimal::new(3, 2),
                due_date: seed_date(2023, 7, 15),
                status: crate::models::DebtStatus::Active,
            },
        ];
        store.categories = DEFAULT_CATEGORIES
            .iter()
            .enumerate()
            .map(|(index, &(name, icon, color))| Category {
                id: CategoryId::new((index + 1).to_string()),
                name: name.to_owned(),
                icon: icon.to_owned(),
                color: color.to_owned(),
            })
            .collect();
        store
    }

    /// Creates a store with no records at all (fresh profiles, tests).
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            expenses: Vec::new(),
            incomes: Vec::new(),
            debts: Vec::new(),
            categories: Vec::new(),
            ids: IdSequence::new(),
        }
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Recorded expenses, in insertion order.
    #[inline]
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Records a new expense, assigning it a fresh id, and returns the
    /// stored record.
    ///
    /// Field ranges are not validated here; a negative amount is the
    /// caller's mistake to make.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Expense {
        let expense = draft.into_expense(ExpenseId::new(self.ids.next()));
        tracing::debug!(id = %expense.id, amount = %expense.amount, "adding expense");
        self.expenses.push(expense.clone());
        expense
    }

    /// Merges the patch into the expense with the given id, preserving the
    /// id. Returns `false` (and changes nothing) if no such expense exists.
    pub fn update_expense(&mut self, id: &ExpenseId, patch: ExpensePatch) -> bool {
        self.expenses.iter_mut().find(|expense| expense.id == *id).map_or_else(
            || {
                tracing::debug!(id = %id, "update_expense: id not found, no-op");
                false
            },
            |expense| {
                expense.apply(patch);
                true
            },
        )
    }

    /// Removes the expense with the given id. Returns `false` if no such
    /// expense exists; calling twice is the same as calling once.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != *id);
        before != self.expenses.len()
    }

    // ── Incomes ─────────────────────────────────────────────────────

    /// Recorded incomes, in insertion order.
    #[inline]
    #[must_use]
    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    /// Records a new income, assigning it a fresh id, and returns the
    /// stored record.
    pub fn add_income(&mut self, draft: IncomeDraft) -> Income {
        let income = draft.into_income(IncomeId::new(self.ids.next()));
        tracing::debug!(id = %income.id, amount = %income.amount, "adding income");
        self.incomes.push(income.clone());
        income
    }

    /// Merges the patch into the income with the given id. Returns `false`
    /// (and changes nothing) if no such income exists.
    pub fn update_income(&mut self, id: &IncomeId, patch: IncomePatch) -> bool {
        self.incomes.iter_mut().find(|income| income.id == *id).map_or_else(
            || {
                tracing::debug!(id = %id, "update_income: id not found, no-op");
                false
            },
            |income| {
                income.apply(patch);
                true
            },
        )
    }

    /// Removes the income with the given id. Returns `false` if no such
    /// income exists.
    pub fn delete_income(&mut self, id: &IncomeId) -> bool {
        let before = self.incomes.len();
        self.incomes.retain(|income| income.id != *id);
        before != self.incomes.len()
    }

    // ── Debts ───────────────────────────────────────────────────────

    /// Tracked debts, in insertion order.
    #[inline]
    #[must_use]
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// Records a new debt, assigning it a fresh id, and returns the stored
    /// record.
    pub fn add_debt(&mut self, draft: DebtDraft) -> Debt {
        let debt = draft.into_debt(DebtId::new(self.ids.next()));
        tracing::debug!(id = %debt.id, name = %debt.name, "adding debt");
        self.debts.push(debt.clone());
        debt
    }

    /// Merges the patch into the debt with the given id. Returns `false`
    /// (and changes nothing) if no such debt exists.
    ///
    /// This is also the only path for status transitions; the store never
    /// derives `overdue` or `paid` from the due date or remaining amount.
    pub fn update_debt(&mut self, id: &DebtId, patch: DebtPatch) -> bool {
        self.debts.iter_mut().find(|debt| debt.id == *id).map_or_else(
            || {
                tracing::debug!(id = %id, "update_debt: id not found, no-op");
                false
            },
            |debt| {
                debt.apply(patch);
                true
            },
        )
    }

    /// Removes the debt with the given id. Returns `false` if no such debt
    /// exists.
    pub fn delete_debt(&mut self, id: &DebtId) -> bool {
        let before = self.debts.len();
        self.debts.retain(|debt| debt.id != *id);
        before != self.debts.len()
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Known categories, in insertion order.
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Adds a new category, assigning it a fresh id, and returns the
    /// stored record. Categories are add-only.
    pub fn add_category(&mut self, draft: CategoryDraft) -> Category {
        let category = draft.into_category(CategoryId::new(self.ids.next()));
        tracing::debug!(id = %category.id, name = %category.name, "adding category");
        self.categories.push(category.clone());
        category
    }

    // ── Derived aggregates (recomputed on every read) ───────────────

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Sum of all income amounts.
    #[must_use]
    pub fn total_income(&self) -> Decimal {
        self.incomes.iter().map(|income| income.amount).sum()
    }

    /// `total_income - total_expenses`. Negative when spending exceeds
    /// income.
    #[inline]
    #[must_use]
    pub fn net_income(&self) -> Decimal {
        self.total_income() - self.total_expenses()
    }

    /// Sum of the remaining amounts of all debts.
    #[must_use]
    pub fn total_debt(&self) -> Decimal {
        self.debts.iter().map(|debt| debt.remaining_amount).sum()
    }

    /// Expense totals keyed by the expense's free-text category name.
    ///
    /// Built in a single pass over the collection. Category names with no
    /// expenses are absent from the map, not zero-valued; keys come from
    /// [`Expense::category`], so they need not match any [`Category`]
    /// record.
    #[must_use]
    pub fn expenses_by_category(&self) -> HashMap<String, Decimal> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category.clone()).or_insert(Decimal::ZERO) += expense.amount;
        }
        totals
    }
}

impl Default for FinanceStore {
    /// Equivalent to [`FinanceStore::new`] (seeded).
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

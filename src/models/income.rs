//! Income record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IncomeId;

/// A single recorded income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    /// Unique identifier within the income collection.
    pub id: IncomeId,
    /// Received amount. Non-negative by convention; not validated here.
    pub amount: Decimal,
    /// Where the money came from (salary, side job, …).
    pub source: String,
    /// Calendar date the income was received.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
}

/// An income as supplied by the caller, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDraft {
    /// Received amount.
    pub amount: Decimal,
    /// Income source.
    pub source: String,
    /// Calendar date the income was received.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
}

impl IncomeDraft {
    /// Attaches the given id, producing a full record.
    pub(crate) fn into_income(self, id: IncomeId) -> Income {
        Income {
            id,
            amount: self.amount,
            source: self.source,
            date: self.date,
            description: self.description,
        }
    }
}

/// A partial-field update for an income record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomePatch {
    /// New amount, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// New source, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// New date, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Income {
    /// Shallow-merges the patch into this record, preserving the id.
    pub(crate) fn apply(&mut self, patch: IncomePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_income() {
        let json = r#"{
            "id": "1",
            "amount": 12000,
            "source": "工资",
            "date": "2023-06-01",
            "description": "6月工资"
        }"#;
        let income: Income = serde_json::from_str(json).unwrap();
        assert_eq!(income.id, IncomeId::new("1".to_owned()));
        assert_eq!(income.amount, Decimal::from(12_000_u32));
        assert_eq!(income.source, "工资");
    }

    #[test]
    fn patch_preserves_unset_fields() {
        let mut income = Income {
            id: IncomeId::new("i-1".to_owned()),
            amount: Decimal::from(1500_u32),
            source: "兼职".to_owned(),
            date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            description: "项目奖金".to_owned(),
        };
        income.apply(IncomePatch {
            source: Some("自由职业".to_owned()),
            ..IncomePatch::default()
        });
        assert_eq!(income.source, "自由职业");
        assert_eq!(income.amount, Decimal::from(1500_u32));
        assert_eq!(income.id, IncomeId::new("i-1".to_owned()));
    }
}

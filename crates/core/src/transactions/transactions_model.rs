//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::ensure_record_amount;
use crate::constants::{MAX_DESCRIPTION_LENGTH, MAX_TRANSACTION_YEAR, MIN_TRANSACTION_YEAR};
use crate::errors::{Error, Result, ValidationError};

/// Accounting treatment of a transaction. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Internal transfer from the available balance into a goal.
    GoalContribution,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Income,
        TransactionKind::Expense,
        TransactionKind::GoalContribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::GoalContribution => "goal_contribution",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "goal_contribution" => Ok(TransactionKind::GoalContribution),
            other => Err(ValidationError::field(
                "kind",
                format!("unknown transaction kind '{}'", other),
            )
            .into()),
        }
    }
}

/// Domain model representing a recorded transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    /// Effective date chosen by the user (or the contribution date).
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_name: Option<String>,
}

/// Input model for recording an income or expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.kind == TransactionKind::GoalContribution {
            return Err(Error::ConstraintViolation(
                "goal contributions can only be recorded by contributing to a goal".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::field("amount", "must be greater than 0").into());
        }
        ensure_record_amount("amount", self.amount)?;
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()).into());
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::field(
                    "description",
                    format!("must be at most {} characters", MAX_DESCRIPTION_LENGTH),
                )
                .into());
            }
        }
        let year = self.date.year();
        if !(MIN_TRANSACTION_YEAR..=MAX_TRANSACTION_YEAR).contains(&year) {
            return Err(ValidationError::field(
                "date",
                format!(
                    "must be between {} and {}",
                    MIN_TRANSACTION_YEAR, MAX_TRANSACTION_YEAR
                ),
            )
            .into());
        }
        Ok(())
    }
}

/// Filters for transaction listing. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.map_or(true, |k| transaction.kind == k)
            && self
                .category
                .as_deref()
                .map_or(true, |c| transaction.category == c)
            && self.date_from.map_or(true, |from| transaction.date >= from)
            && self.date_to.map_or(true, |to| transaction.date <= to)
            && self.amount_min.map_or(true, |min| transaction.amount >= min)
            && self.amount_max.map_or(true, |max| transaction.amount <= max)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSortField {
    #[default]
    Date,
    Amount,
    Category,
    CreatedAt,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSort {
    pub field: TransactionSortField,
    pub order: SortOrder,
}

/// A filtered, sorted, paginated transaction listing request.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub filter: TransactionFilter,
    pub sort: TransactionSort,
    pub skip: i64,
    pub limit: i64,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        TransactionQuery {
            filter: TransactionFilter::default(),
            sort: TransactionSort::default(),
            skip: 0,
            limit: crate::constants::DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Aggregate figures over a user's transactions
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Income minus expense. Contributions are not part of either side.
    pub balance: Decimal,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub period_start: Option<NaiveDateTime>,
    pub period_end: Option<NaiveDateTime>,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_RECORD_AMOUNT;
use crate::errors::{Result, ValidationError};
use crate::transactions::{Transaction, TransactionKind};

/// `a + b`, or a typed error instead of the overflow panic.
pub fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| ValidationError::AmountOverflow(format!("{} + {}", a, b)).into())
}

/// `a - b`, or a typed error instead of the overflow panic.
pub fn checked_diff(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| ValidationError::AmountOverflow(format!("{} - {}", a, b)).into())
}

/// Rejects amounts above [`MAX_RECORD_AMOUNT`] for `field`.
pub fn ensure_record_amount(field: &str, amount: Decimal) -> Result<()> {
    let max = Decimal::from(MAX_RECORD_AMOUNT);
    if amount > max {
        return Err(ValidationError::field(field, format!("must not exceed {}", max)).into());
    }
    Ok(())
}

/// Per-kind sums over a set of transactions.
///
/// Each kind lands in exactly one bucket, so contributions never leak into
/// income or expense figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub contributions: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
    pub contribution_count: usize,
}

impl TransactionTotals {
    pub fn from_transactions<'a, I>(transactions: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .try_fold(TransactionTotals::default(), |mut totals, t| {
                match t.kind {
                    TransactionKind::Income => {
                        totals.income = checked_sum(totals.income, t.amount)?;
                        totals.income_count += 1;
                    }
                    TransactionKind::Expense => {
                        totals.expense = checked_sum(totals.expense, t.amount)?;
                        totals.expense_count += 1;
                    }
                    TransactionKind::GoalContribution => {
                        totals.contributions = checked_sum(totals.contributions, t.amount)?;
                        totals.contribution_count += 1;
                    }
                }
                Ok(totals)
            })
    }

    /// `income - expense`.
    pub fn net(&self) -> Result<Decimal> {
        checked_diff(self.income, self.expense)
    }
}

/// Dashboard view of how the available balance was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub initial_budget: Decimal,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub contribution_total: Decimal,
    pub available_balance: Decimal,
}

/// `initial_budget + income - expense - contributions`.
///
/// The result is not floored: a negative balance means the user overspent.
/// Sums that leave the `Decimal` range fail with
/// `ValidationError::AmountOverflow`.
pub fn compute_available_balance(
    initial_budget: Decimal,
    transactions: &[Transaction],
) -> Result<Decimal> {
    Ok(summarize_balance(initial_budget, transactions)?.available_balance)
}

pub fn summarize_balance(
    initial_budget: Decimal,
    transactions: &[Transaction],
) -> Result<BalanceSummary> {
    let totals = TransactionTotals::from_transactions(transactions)?;
    let available_balance = checked_diff(
        checked_sum(initial_budget, totals.net()?)?,
        totals.contributions,
    )?;
    Ok(BalanceSummary {
        initial_budget,
        income_total: totals.income,
        expense_total: totals.expense,
        contribution_total: totals.contributions,
        available_balance,
    })
}

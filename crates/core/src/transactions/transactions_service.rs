use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info};
use uuid::Uuid;

use crate::balance::TransactionTotals;
use crate::constants::{DEFAULT_CURRENCY, MAX_PAGE_LIMIT};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::Clock;

use super::transactions_model::{
    NewTransaction, SortOrder, Transaction, TransactionKind, TransactionQuery, TransactionSort,
    TransactionSortField, TransactionStats,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        TransactionService { repository, clock }
    }
}

fn compare(a: &Transaction, b: &Transaction, sort: TransactionSort) -> Ordering {
    let ordering = match sort.field {
        TransactionSortField::Date => a.date.cmp(&b.date),
        TransactionSortField::Amount => a.amount.cmp(&b.amount),
        TransactionSortField::Category => a.category.cmp(&b.category),
        TransactionSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Applies a listing query (filter, sort, page) to an already loaded set.
pub fn apply_query(
    transactions: Vec<Transaction>,
    query: &TransactionQuery,
) -> Result<Vec<Transaction>> {
    if query.skip < 0 {
        return Err(ValidationError::field("skip", "must not be negative").into());
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&query.limit) {
        return Err(ValidationError::field(
            "limit",
            format!("must be between 1 and {}", MAX_PAGE_LIMIT),
        )
        .into());
    }

    let mut matching: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| query.filter.matches(t))
        .collect();
    matching.sort_by(|a, b| compare(a, b, query.sort));

    Ok(matching
        .into_iter()
        .skip(query.skip as usize)
        .take(query.limit as usize)
        .collect())
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind: new_transaction.kind,
            amount: new_transaction.amount,
            category: new_transaction.category.trim().to_string(),
            description: new_transaction.description,
            date: new_transaction.date,
            created_at: self.clock.now(),
            currency: DEFAULT_CURRENCY.to_string(),
            goal_id: None,
            goal_name: None,
        };

        let created = self.repository.insert(transaction).await?;
        info!(
            "Recorded {} transaction {} for user {}",
            created.kind, created.id, user_id
        );
        Ok(created)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    fn list_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>> {
        let transactions = self.repository.search(user_id, &query.filter)?;
        apply_query(transactions, query)
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(user_id, transaction_id)?;
        if existing.kind == TransactionKind::GoalContribution {
            return Err(Error::ConstraintViolation(
                "goal contributions cannot be deleted".to_string(),
            ));
        }
        let deleted = self.repository.delete(user_id, transaction_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {}", transaction_id)));
        }
        debug!("Deleted transaction {} for user {}", transaction_id, user_id);
        Ok(())
    }

    fn get_transaction_stats(
        &self,
        user_id: &str,
        date_from: Option<NaiveDateTime>,
        date_to: Option<NaiveDateTime>,
    ) -> Result<TransactionStats> {
        let transactions = self.repository.list_by_user(user_id)?;
        let in_period: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| date_from.map_or(true, |from| t.date >= from))
            .filter(|t| date_to.map_or(true, |to| t.date <= to))
            .collect();

        let totals = TransactionTotals::from_transactions(in_period.iter().copied())?;
        Ok(TransactionStats {
            total_income: totals.income,
            total_expense: totals.expense,
            balance: totals.net()?,
            transaction_count: in_period.len(),
            income_count: totals.income_count,
            expense_count: totals.expense_count,
            period_start: date_from,
            period_end: date_to,
        })
    }

    fn get_categories(&self, user_id: &str, kind: Option<TransactionKind>) -> Result<Vec<String>> {
        let transactions = match kind {
            Some(kind) => self.repository.list_by_user_and_kind(user_id, kind)?,
            None => self.repository.list_by_user(user_id)?,
        };
        let categories: BTreeSet<String> =
            transactions.into_iter().map(|t| t.category).collect();
        Ok(categories.into_iter().collect())
    }
}

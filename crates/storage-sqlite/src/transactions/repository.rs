use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use gastosmart_core::errors::{Error, Result};
use gastosmart_core::transactions::{
    Transaction, TransactionFilter, TransactionKind, TransactionRepositoryTrait,
};

use super::model::{into_domain, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

/// All transactions of `user_id`, newest effective date first.
///
/// Shared with the goal store, which reads the ledger inside its own write
/// transaction when applying a contribution.
pub(crate) fn load_user_transactions(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<Transaction>> {
    let rows = transactions::table
        .filter(transactions::user_id.eq(user_id))
        .order((transactions::date.desc(), transactions::created_at.desc()))
        .select(TransactionDB::as_select())
        .load::<TransactionDB>(conn)
        .into_core()?;
    Ok(into_domain(rows)?)
}

pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    transaction: Transaction,
) -> Result<Transaction> {
    let row: TransactionDB = transaction.into();
    let saved = diesel::insert_into(transactions::table)
        .values(&row)
        .returning(TransactionDB::as_returning())
        .get_result(conn)
        .into_core()?;
    Ok(Transaction::try_from(saved)?)
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", transaction_id)))?;
        Ok(Transaction::try_from(row)?)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        load_user_transactions(&mut conn, user_id)
    }

    fn list_by_user_and_kind(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>> {
        self.search(
            user_id,
            &TransactionFilter {
                kind: Some(kind),
                ..TransactionFilter::default()
            },
        )
    }

    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::kind.eq(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(transactions::category.eq(category.clone()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::date.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::date.le(to));
        }

        let rows = query
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        // Amounts are TEXT columns; range checks happen on the parsed value.
        Ok(into_domain(rows)?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect())
    }

    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_transaction(conn, transaction))
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

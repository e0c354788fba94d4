//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use gastosmart_core::transactions::Transaction;

use crate::errors::StorageError;
use crate::utils::{decimal_to_text, parse_column, text_to_decimal};

const TABLE: &str = "transactions";

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub currency: String,
    pub goal_id: Option<String>,
    pub goal_name: Option<String>,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Transaction {
            kind: parse_column(TABLE, &db.kind)?,
            amount: text_to_decimal(TABLE, "amount", &db.amount)?,
            id: db.id,
            user_id: db.user_id,
            category: db.category,
            description: db.description,
            date: db.date,
            created_at: db.created_at,
            currency: db.currency,
            goal_id: db.goal_id,
            goal_name: db.goal_name,
        })
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        TransactionDB {
            id: domain.id,
            user_id: domain.user_id,
            kind: domain.kind.as_str().to_string(),
            amount: decimal_to_text(domain.amount),
            category: domain.category,
            description: domain.description,
            date: domain.date,
            created_at: domain.created_at,
            currency: domain.currency,
            goal_id: domain.goal_id,
            goal_name: domain.goal_name,
        }
    }
}

pub(crate) fn into_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>, StorageError> {
    rows.into_iter().map(Transaction::try_from).collect()
}

use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionKind, TransactionQuery,
    TransactionStats,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Trait for transaction repository operations.
///
/// Listings are scoped to one user and ordered by effective date, newest first.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
    fn list_by_user_and_kind(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>>;
    /// Returns every transaction of the user matching `filter`, unpaged.
    fn search(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    async fn insert(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn list_transactions(&self, user_id: &str, query: &TransactionQuery)
        -> Result<Vec<Transaction>>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
    fn get_transaction_stats(
        &self,
        user_id: &str,
        date_from: Option<NaiveDateTime>,
        date_to: Option<NaiveDateTime>,
    ) -> Result<TransactionStats>;
    fn get_categories(&self, user_id: &str, kind: Option<TransactionKind>) -> Result<Vec<String>>;
}

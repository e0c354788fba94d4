use crate::balance::BalanceSummary;
use crate::budget::budget_model::{BudgetConfig, BudgetUpdate};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// `None` when the user never configured a budget.
    fn get(&self, user_id: &str) -> Result<Option<BudgetConfig>>;
    async fn upsert(&self, config: BudgetConfig) -> Result<BudgetConfig>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, user_id: &str) -> Result<BudgetConfig>;
    async fn update_budget(&self, user_id: &str, update: BudgetUpdate) -> Result<BudgetConfig>;
    fn get_balance(&self, user_id: &str) -> Result<BalanceSummary>;
}

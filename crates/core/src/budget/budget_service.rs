use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::balance::{summarize_balance, BalanceSummary};
use crate::budget::budget_model::{BudgetConfig, BudgetUpdate};
use crate::budget::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::Clock;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        BudgetService {
            repository,
            transaction_repository,
            clock,
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, user_id: &str) -> Result<BudgetConfig> {
        Ok(self
            .repository
            .get(user_id)?
            .unwrap_or_else(|| BudgetConfig::unconfigured(user_id)))
    }

    async fn update_budget(&self, user_id: &str, update: BudgetUpdate) -> Result<BudgetConfig> {
        update.validate()?;
        let config = BudgetConfig {
            user_id: user_id.to_string(),
            initial_budget: update.initial_budget,
            budget_period: update.budget_period,
            budget_configured: true,
            updated_at: Some(self.clock.now()),
        };
        let saved = self.repository.upsert(config).await?;
        info!(
            "Budget for user {} set to {} ({})",
            user_id, saved.initial_budget, saved.budget_period
        );
        Ok(saved)
    }

    /// Recomputed from every transaction on each call.
    fn get_balance(&self, user_id: &str) -> Result<BalanceSummary> {
        let budget = self.get_budget(user_id)?;
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        summarize_balance(budget.initial_budget, &transactions)
    }
}

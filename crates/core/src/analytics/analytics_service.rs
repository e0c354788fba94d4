use std::sync::Arc;

use chrono::Datelike;

use crate::errors::Result;
use crate::goals::{GoalCategory, GoalRepositoryTrait};
use crate::transactions::{Transaction, TransactionKind, TransactionRepositoryTrait};
use crate::utils::Clock;

use super::analytics_model::{ContributionSeriesQuery, DailyAmount, MonthlyAmount};
use super::series::{build_daily_series, build_monthly_series};

/// Read-only projections over goal contributions.
pub trait AnalyticsServiceTrait: Send + Sync {
    fn monthly_contribution_series(
        &self,
        user_id: &str,
        query: &ContributionSeriesQuery,
    ) -> Result<Vec<MonthlyAmount>>;
    /// Contributions recorded under the `Ahorros` category.
    fn monthly_savings_series(&self, user_id: &str, months: u32) -> Result<Vec<MonthlyAmount>>;
    fn daily_contribution_series(
        &self,
        user_id: &str,
        goal_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<DailyAmount>>;
}

pub struct AnalyticsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        AnalyticsService {
            transaction_repository,
            goal_repository,
            clock,
        }
    }

    fn contributions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository
            .list_by_user_and_kind(user_id, TransactionKind::GoalContribution)
    }
}

impl AnalyticsServiceTrait for AnalyticsService {
    fn monthly_contribution_series(
        &self,
        user_id: &str,
        query: &ContributionSeriesQuery,
    ) -> Result<Vec<MonthlyAmount>> {
        let contributions = self.contributions(user_id)?;
        // The category recorded on the transaction is used, so contributions
        // to goals deleted since then still count.
        let category_label = query.category.map(|c| c.label());
        let matching = contributions.iter().filter(|t| {
            query
                .goal_id
                .as_deref()
                .map_or(true, |id| t.goal_id.as_deref() == Some(id))
                && category_label.map_or(true, |label| t.category == label)
        });
        build_monthly_series(matching, self.clock.today(), query.months)
    }

    fn monthly_savings_series(&self, user_id: &str, months: u32) -> Result<Vec<MonthlyAmount>> {
        let query = ContributionSeriesQuery {
            goal_id: None,
            category: Some(GoalCategory::Savings),
            months,
        };
        self.monthly_contribution_series(user_id, &query)
    }

    fn daily_contribution_series(
        &self,
        user_id: &str,
        goal_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<DailyAmount>> {
        // NotFound for goals that do not belong to the user.
        self.goal_repository.get_by_id(user_id, goal_id)?;

        let today = self.clock.today();
        let contributions = self.contributions(user_id)?;
        let matching = contributions
            .iter()
            .filter(|t| t.goal_id.as_deref() == Some(goal_id));
        build_daily_series(
            matching,
            year.unwrap_or(today.year()),
            month.unwrap_or(today.month()),
        )
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::balance::compute_available_balance;
use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result};
use crate::goals::contribution::contribute_to_goal;
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{
    ContributionOutcome, ContributionRequest, ContributionSnapshot, Goal, GoalFilter, GoalStats,
    GoalStatus, GoalUpdate, NewGoal,
};
use crate::goals::goals_traits::{
    ContributionFn, ContributionTarget, GoalRepositoryTrait, GoalServiceTrait, GoalUpdateFn,
};
use crate::utils::Clock;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        GoalService { goal_repo, clock }
    }

    fn refreshed(&self, mut goal: Goal) -> Goal {
        goal.refresh_progress(self.clock.today());
        goal
    }

    /// Builds the validation step the store runs against its own fresh reads.
    fn contribution_step(&self, request: ContributionRequest) -> ContributionFn {
        let now = self.clock.now();
        Box::new(move |snapshot: ContributionSnapshot| {
            let available =
                compute_available_balance(snapshot.initial_budget, &snapshot.transactions)?;
            contribute_to_goal(&snapshot.goal, &request, available, now)
        })
    }

    async fn contribute(
        &self,
        user_id: &str,
        target: ContributionTarget,
        request: ContributionRequest,
    ) -> Result<ContributionOutcome> {
        let amount = request.amount;
        let apply = self.contribution_step(request);
        match self.goal_repo.commit_contribution(user_id, target, apply).await {
            Ok(outcome) => {
                info!(
                    "Contributed {} to goal {} for user {} (now {} of {})",
                    amount,
                    outcome.goal.id,
                    user_id,
                    outcome.goal.current_amount,
                    outcome.goal.target_amount
                );
                Ok(outcome)
            }
            Err(e) => {
                debug!("Contribution of {} for user {} refused: {}", amount, user_id, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let now = self.clock.now();
        new_goal.validate(now.date())?;

        // A user's first goal is always the main one.
        let is_first = self.goal_repo.list_by_user(user_id)?.is_empty();

        let mut goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name.trim().to_string(),
            description: new_goal.description,
            category: new_goal.category,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount.unwrap_or(Decimal::ZERO),
            progress_percentage: Decimal::ZERO,
            target_date: new_goal.target_date,
            status: GoalStatus::Active,
            currency: DEFAULT_CURRENCY.to_string(),
            is_public: new_goal.is_public,
            is_main: new_goal.is_main || is_first,
            created_at: now,
            updated_at: now,
        };
        goal.refresh_progress(now.date());

        let created = self.goal_repo.insert(goal).await?;
        info!(
            "Created goal {} for user {} (main: {})",
            created.id, user_id, created.is_main
        );
        Ok(created)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goal_repo
            .get_by_id(user_id, goal_id)
            .map(|g| self.refreshed(g))
    }

    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>> {
        Ok(self
            .goal_repo
            .list_by_user(user_id)?
            .into_iter()
            .map(|g| self.refreshed(g))
            .filter(|g| filter.matches(g))
            .collect())
    }

    fn get_main_goal(&self, user_id: &str) -> Result<Goal> {
        self.goal_repo
            .get_main_goal(user_id)?
            .map(|g| self.refreshed(g))
            .ok_or_else(|| GoalError::NoMainGoal.into())
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<Goal> {
        let now = self.clock.now();
        update.validate(now.date())?;

        let apply: GoalUpdateFn = Box::new(move |mut goal: Goal| -> Result<Goal> {
            update.apply_to(&mut goal, now)?;
            match update.is_main {
                Some(true) => goal.is_main = true,
                Some(false) if goal.is_main => {
                    warn!(
                        "Ignoring request to unset main goal {}; designate another goal instead",
                        goal.id
                    );
                }
                _ => {}
            }
            Ok(goal)
        });

        let updated = self.goal_repo.update(user_id, goal_id, apply).await?;
        debug!("Updated goal {} for user {}", updated.id, user_id);
        Ok(updated)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let promoted = self.goal_repo.delete(user_id, goal_id).await?;
        match promoted {
            Some(goal) => info!(
                "Deleted main goal {} for user {}; promoted {}",
                goal_id, user_id, goal.id
            ),
            None => debug!("Deleted goal {} for user {}", goal_id, user_id),
        }
        Ok(())
    }

    async fn set_main_goal(&self, user_id: &str, goal_id: &str) -> Result<Vec<Goal>> {
        let goals = self.goal_repo.set_main(user_id, goal_id).await?;
        let main_count = goals.iter().filter(|g| g.is_main).count();
        if main_count != 1 {
            return Err(Error::Unexpected(format!(
                "user {} has {} main goals after designation",
                user_id, main_count
            )));
        }
        info!("Goal {} is now the main goal of user {}", goal_id, user_id);
        Ok(goals.into_iter().map(|g| self.refreshed(g)).collect())
    }

    async fn contribute_to_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        request: ContributionRequest,
    ) -> Result<ContributionOutcome> {
        self.contribute(
            user_id,
            ContributionTarget::Goal(goal_id.to_string()),
            request,
        )
        .await
    }

    async fn contribute_to_main_goal(
        &self,
        user_id: &str,
        request: ContributionRequest,
    ) -> Result<ContributionOutcome> {
        self.contribute(user_id, ContributionTarget::MainGoal, request)
            .await
    }

    fn get_goal_stats(&self, user_id: &str) -> Result<GoalStats> {
        let goals = self.list_goals(user_id, &GoalFilter::default())?;
        Ok(GoalStats::from_goals(&goals))
    }
}

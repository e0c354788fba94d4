use crate::errors::Result;
use crate::goals::goals_model::{
    ContributionOutcome, ContributionRequest, ContributionSnapshot, Goal, GoalFilter, GoalStats,
    GoalUpdate, NewGoal,
};
use async_trait::async_trait;

/// Validation step run by the store between reading a [`ContributionSnapshot`]
/// and persisting the resulting goal and transaction.
pub type ContributionFn =
    Box<dyn FnOnce(ContributionSnapshot) -> Result<ContributionOutcome> + Send>;

/// Edit applied by the store to the goal as it reads it inside the write.
pub type GoalUpdateFn = Box<dyn FnOnce(Goal) -> Result<Goal> + Send>;

/// Which goal a contribution is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionTarget {
    Goal(String),
    /// Resolved to the user's main goal inside the same unit of work.
    MainGoal,
}

/// Trait for goal repository operations.
///
/// Listings are ordered newest `created_at` first. Writing a goal with
/// `is_main` set clears the flag on the user's other goals in the same write.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn get_main_goal(&self, user_id: &str) -> Result<Option<Goal>>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>>;
    async fn insert(&self, goal: Goal) -> Result<Goal>;
    /// Reads the goal, runs `apply` on it and persists the result as one
    /// serialized unit of work, so a concurrent contribution or main-goal
    /// change is never overwritten by stale fields.
    async fn update(&self, user_id: &str, goal_id: &str, apply: GoalUpdateFn) -> Result<Goal>;
    /// Makes `goal_id` the only main goal and returns all of the user's goals.
    async fn set_main(&self, user_id: &str, goal_id: &str) -> Result<Vec<Goal>>;
    /// Deletes a goal. Fails with `GoalError::LastGoal` when it is the user's
    /// only goal; when it was main, the newest remaining goal is promoted and
    /// returned.
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;
    /// Loads the target goal, the user's budget and transactions, runs `apply`
    /// and persists its outcome, all as one serialized unit of work.
    async fn commit_contribution(
        &self,
        user_id: &str,
        target: ContributionTarget,
        apply: ContributionFn,
    ) -> Result<ContributionOutcome>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn list_goals(&self, user_id: &str, filter: &GoalFilter) -> Result<Vec<Goal>>;
    fn get_main_goal(&self, user_id: &str) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn set_main_goal(&self, user_id: &str, goal_id: &str) -> Result<Vec<Goal>>;
    async fn contribute_to_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        request: ContributionRequest,
    ) -> Result<ContributionOutcome>;
    async fn contribute_to_main_goal(
        &self,
        user_id: &str,
        request: ContributionRequest,
    ) -> Result<ContributionOutcome>;
    fn get_goal_stats(&self, user_id: &str) -> Result<GoalStats>;
}

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;

use gastosmart_core::errors::{Error, Result};
use gastosmart_core::goals::{
    ContributionFn, ContributionOutcome, ContributionSnapshot, ContributionTarget, Goal,
    GoalError, GoalRepositoryTrait, GoalUpdateFn,
};

use super::model::GoalDB;
use crate::budget::load_budget;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;
use crate::transactions::{insert_transaction, load_user_transactions};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn not_found(goal_id: &str) -> Error {
    Error::NotFound(format!("Goal {}", goal_id))
}

fn rows_to_goals(rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
    rows.into_iter()
        .map(|row| Goal::try_from(row).map_err(Error::from))
        .collect()
}

fn find_goal(conn: &mut SqliteConnection, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
    let row = goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user_id))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(Goal::try_from).transpose()?)
}

fn find_main_goal(conn: &mut SqliteConnection, user_id: &str) -> Result<Option<Goal>> {
    let row = goals::table
        .filter(goals::user_id.eq(user_id))
        .filter(goals::is_main.eq(true))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .into_core()?;
    Ok(row.map(Goal::try_from).transpose()?)
}

fn goals_of_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Goal>> {
    let rows = goals::table
        .filter(goals::user_id.eq(user_id))
        .order((goals::created_at.desc(), goals::id.desc()))
        .select(GoalDB::as_select())
        .load::<GoalDB>(conn)
        .into_core()?;
    rows_to_goals(rows)
}

/// Clears the main flag on every goal of `user_id` except `keep_id`.
fn clear_main_flag(conn: &mut SqliteConnection, user_id: &str, keep_id: &str) -> Result<usize> {
    diesel::update(
        goals::table
            .filter(goals::user_id.eq(user_id))
            .filter(goals::id.ne(keep_id))
            .filter(goals::is_main.eq(true)),
    )
    .set(goals::is_main.eq(false))
    .execute(conn)
    .into_core()
}

fn save_goal(conn: &mut SqliteConnection, goal: Goal) -> Result<Goal> {
    let row: GoalDB = goal.into();
    let saved = diesel::update(goals::table.find(&row.id))
        .set(&row)
        .returning(GoalDB::as_returning())
        .get_result(conn)
        .into_core()?;
    Ok(Goal::try_from(saved)?)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal(&mut conn, user_id, goal_id)?.ok_or_else(|| not_found(goal_id))
    }

    fn get_main_goal(&self, user_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        find_main_goal(&mut conn, user_id)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        goals_of_user(&mut conn, user_id)
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                if goal.is_main {
                    clear_main_flag(conn, &goal.user_id, &goal.id)?;
                }
                let row: GoalDB = goal.into();
                let saved = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::try_from(saved)?)
            })
            .await
    }

    async fn update(&self, user_id: &str, goal_id: &str, apply: GoalUpdateFn) -> Result<Goal> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let current = find_goal(conn, &user_id, &goal_id)?
                    .ok_or_else(|| not_found(&goal_id))?;
                let saved_amount = current.current_amount;

                let mut goal = apply(current)?;
                // Only contributions move the saved amount, and the row cannot
                // change identity.
                goal.current_amount = saved_amount;
                goal.id = goal_id.clone();
                goal.user_id = user_id.clone();

                if goal.is_main {
                    clear_main_flag(conn, &user_id, &goal_id)?;
                }
                save_goal(conn, goal)
            })
            .await
    }

    async fn set_main(&self, user_id: &str, goal_id: &str) -> Result<Vec<Goal>> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Goal>> {
                if find_goal(conn, &user_id, &goal_id)?.is_none() {
                    return Err(not_found(&goal_id));
                }
                clear_main_flag(conn, &user_id, &goal_id)?;
                diesel::update(goals::table.find(&goal_id))
                    .set(goals::is_main.eq(true))
                    .execute(conn)
                    .into_core()?;
                goals_of_user(conn, &user_id)
            })
            .await
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let user_id = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Goal>> {
                let target = find_goal(conn, &user_id, &goal_id)?
                    .ok_or_else(|| not_found(&goal_id))?;

                let owned: i64 = goals::table
                    .filter(goals::user_id.eq(&user_id))
                    .count()
                    .get_result(conn)
                    .into_core()?;
                if owned <= 1 {
                    return Err(GoalError::LastGoal.into());
                }

                diesel::delete(goals::table.find(&goal_id))
                    .execute(conn)
                    .into_core()?;

                if !target.is_main {
                    return Ok(None);
                }
                let Some(mut newest) = goals_of_user(conn, &user_id)?.into_iter().next() else {
                    return Ok(None);
                };
                newest.is_main = true;
                let promoted = save_goal(conn, newest)?;
                debug!(
                    "Promoted goal {} to main after deleting {}",
                    promoted.id, goal_id
                );
                Ok(Some(promoted))
            })
            .await
    }

    async fn commit_contribution(
        &self,
        user_id: &str,
        target: ContributionTarget,
        apply: ContributionFn,
    ) -> Result<ContributionOutcome> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContributionOutcome> {
                let goal = match &target {
                    ContributionTarget::Goal(goal_id) => {
                        find_goal(conn, &user_id, goal_id)?.ok_or_else(|| not_found(goal_id))?
                    }
                    ContributionTarget::MainGoal => {
                        find_main_goal(conn, &user_id)?.ok_or(GoalError::NoMainGoal)?
                    }
                };
                let initial_budget = load_budget(conn, &user_id)?
                    .map(|b| b.initial_budget)
                    .unwrap_or(Decimal::ZERO);
                let transactions = load_user_transactions(conn, &user_id)?;

                let outcome = apply(ContributionSnapshot {
                    goal,
                    initial_budget,
                    transactions,
                })?;

                let goal = save_goal(conn, outcome.goal)?;
                let transaction = insert_transaction(conn, outcome.transaction)?;
                Ok(ContributionOutcome { goal, transaction })
            })
            .await
    }
}

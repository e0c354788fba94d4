//! Unit tests for the goal service.

use super::*;
use crate::balance::compute_available_balance;
use crate::errors::{Error, ErrorKind, Result};
use crate::transactions::{Transaction, TransactionKind};
use crate::utils::FixedClock;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default, Clone, PartialEq, Debug)]
struct State {
    goals: Vec<Goal>,
    transactions: Vec<Transaction>,
    initial_budget: Decimal,
}

/// In-memory store. A single mutex stands in for the writer actor, so every
/// write (including a contribution) happens as one unit.
#[derive(Default)]
struct MockGoalRepository {
    state: Mutex<State>,
}

impl MockGoalRepository {
    fn snapshot(&self) -> State {
        self.state.lock().unwrap().clone()
    }

    fn with_budget(initial_budget: Decimal, transactions: Vec<Transaction>) -> Self {
        Self {
            state: Mutex::new(State {
                goals: Vec::new(),
                transactions,
                initial_budget,
            }),
        }
    }

    fn seed_goal(&self, goal: Goal) {
        self.state.lock().unwrap().goals.push(goal);
    }
}

fn sorted_newest_first(mut goals: Vec<Goal>) -> Vec<Goal> {
    goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    goals
}

fn clear_other_mains(goals: &mut [Goal], user_id: &str, keep_id: &str) {
    for g in goals.iter_mut() {
        if g.user_id == user_id && g.id != keep_id {
            g.is_main = false;
        }
    }
}

#[async_trait]
impl GoalRepositoryTrait for MockGoalRepository {
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.state
            .lock()
            .unwrap()
            .goals
            .iter()
            .find(|g| g.user_id == user_id && g.id == goal_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }

    fn get_main_goal(&self, user_id: &str) -> Result<Option<Goal>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .goals
            .iter()
            .find(|g| g.user_id == user_id && g.is_main)
            .cloned())
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let goals = self
            .state
            .lock()
            .unwrap()
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(goals))
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        if goal.is_main {
            clear_other_mains(&mut state.goals, &goal.user_id, &goal.id);
        }
        state.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update(&self, user_id: &str, goal_id: &str, apply: GoalUpdateFn) -> Result<Goal> {
        let mut state = self.state.lock().unwrap();
        let current = state
            .goals
            .iter()
            .find(|g| g.user_id == user_id && g.id == goal_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        let goal = apply(current)?;
        if goal.is_main {
            clear_other_mains(&mut state.goals, user_id, goal_id);
        }
        if let Some(slot) = state
            .goals
            .iter_mut()
            .find(|g| g.user_id == user_id && g.id == goal_id)
        {
            *slot = goal.clone();
        }
        Ok(goal)
    }

    async fn set_main(&self, user_id: &str, goal_id: &str) -> Result<Vec<Goal>> {
        let mut state = self.state.lock().unwrap();
        if !state
            .goals
            .iter()
            .any(|g| g.user_id == user_id && g.id == goal_id)
        {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        for g in state.goals.iter_mut().filter(|g| g.user_id == user_id) {
            g.is_main = g.id == goal_id;
        }
        let goals = state
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(goals))
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let mut state = self.state.lock().unwrap();
        let owned: Vec<Goal> = state
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        let target = owned
            .iter()
            .find(|g| g.id == goal_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        if owned.len() == 1 {
            return Err(GoalError::LastGoal.into());
        }
        state.goals.retain(|g| !(g.user_id == user_id && g.id == goal_id));
        if !target.is_main {
            return Ok(None);
        }
        let next_id = sorted_newest_first(
            state
                .goals
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect(),
        )
        .first()
        .map(|g| g.id.clone());
        let promoted = next_id.and_then(|id| {
            state.goals.iter_mut().find(|g| g.id == id).map(|g| {
                g.is_main = true;
                g.clone()
            })
        });
        Ok(promoted)
    }

    async fn commit_contribution(
        &self,
        user_id: &str,
        target: ContributionTarget,
        apply: ContributionFn,
    ) -> Result<ContributionOutcome> {
        let mut state = self.state.lock().unwrap();
        let goal = match &target {
            ContributionTarget::Goal(id) => state
                .goals
                .iter()
                .find(|g| g.user_id == user_id && &g.id == id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Goal {}", id)))?,
            ContributionTarget::MainGoal => state
                .goals
                .iter()
                .find(|g| g.user_id == user_id && g.is_main)
                .cloned()
                .ok_or(GoalError::NoMainGoal)?,
        };
        let snapshot = ContributionSnapshot {
            goal,
            initial_budget: state.initial_budget,
            transactions: state
                .transactions
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect(),
        };
        let outcome = apply(snapshot)?;
        if let Some(slot) = state.goals.iter_mut().find(|g| g.id == outcome.goal.id) {
            *slot = outcome.goal.clone();
        }
        state.transactions.push(outcome.transaction.clone());
        Ok(outcome)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn service(repo: Arc<MockGoalRepository>) -> GoalService {
    GoalService::new(repo, Arc::new(FixedClock::at(today())))
}

fn created(days_ago: i64) -> NaiveDateTime {
    today().and_hms_opt(8, 0, 0).unwrap() - Duration::days(days_ago)
}

fn goal(id: &str, target: Decimal, current: Decimal, is_main: bool, days_ago: i64) -> Goal {
    let mut g = Goal {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        name: format!("Meta {}", id),
        description: None,
        category: GoalCategory::Savings,
        target_amount: target,
        current_amount: current,
        progress_percentage: Decimal::ZERO,
        target_date: None,
        status: GoalStatus::Active,
        currency: "COP".to_string(),
        is_public: false,
        is_main,
        created_at: created(days_ago),
        updated_at: created(days_ago),
    };
    g.refresh_progress(today());
    g
}

fn income(amount: Decimal) -> Transaction {
    Transaction {
        id: format!("income-{}", amount),
        user_id: "user-1".to_string(),
        kind: TransactionKind::Income,
        amount,
        category: "Salario".to_string(),
        description: None,
        date: created(3),
        created_at: created(3),
        currency: "COP".to_string(),
        goal_id: None,
        goal_name: None,
    }
}

fn new_goal(name: &str, is_main: bool) -> NewGoal {
    NewGoal {
        name: name.to_string(),
        description: None,
        category: GoalCategory::Travel,
        target_amount: dec!(2000000),
        current_amount: None,
        target_date: today().checked_add_signed(Duration::days(180)),
        is_public: false,
        is_main,
    }
}

fn contribution(amount: Decimal) -> ContributionRequest {
    ContributionRequest {
        amount,
        description: None,
        contribution_date: None,
    }
}

fn main_ids(repo: &MockGoalRepository) -> Vec<String> {
    repo.snapshot()
        .goals
        .iter()
        .filter(|g| g.is_main)
        .map(|g| g.id.clone())
        .collect()
}

// ============================================================================
// Create / update
// ============================================================================

#[tokio::test]
async fn test_first_goal_becomes_main() {
    let repo = Arc::new(MockGoalRepository::default());
    let svc = service(repo.clone());

    let created = svc.create_goal("user-1", new_goal("Vacaciones", false)).await.unwrap();

    assert!(created.is_main);
    assert_eq!(created.current_amount, Decimal::ZERO);
    assert_eq!(created.status, GoalStatus::Active);
}

#[tokio::test]
async fn test_creating_main_goal_replaces_previous_main() {
    let repo = Arc::new(MockGoalRepository::default());
    let svc = service(repo.clone());

    svc.create_goal("user-1", new_goal("Vacaciones", false)).await.unwrap();
    let second = svc.create_goal("user-1", new_goal("Portátil", true)).await.unwrap();
    let third = svc.create_goal("user-1", new_goal("Curso", false)).await.unwrap();

    assert_eq!(main_ids(&repo), vec![second.id]);
    assert!(!third.is_main);
}

#[tokio::test]
async fn test_create_goal_validates_name_and_target_date() {
    let svc = service(Arc::new(MockGoalRepository::default()));

    let err = svc.create_goal("user-1", new_goal("ab", false)).await.unwrap_err();
    assert_eq!(err.field(), Some("name"));

    let mut past = new_goal("Vacaciones", false);
    past.target_date = Some(today());
    let err = svc.create_goal("user-1", past).await.unwrap_err();
    assert_eq!(err.field(), Some("target_date"));

    let mut too_far = new_goal("Vacaciones", false);
    too_far.target_date = NaiveDate::from_ymd_opt(2035, 6, 16);
    let err = svc.create_goal("user-1", too_far).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_goal_rejects_seed_above_target() {
    let svc = service(Arc::new(MockGoalRepository::default()));
    let mut input = new_goal("Vacaciones", false);
    input.current_amount = Some(dec!(2000001));

    let err = svc.create_goal("user-1", input).await.unwrap_err();

    assert_eq!(err.field(), Some("current_amount"));
}

#[tokio::test]
async fn test_update_cannot_lower_target_below_saved_amount() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("g1", dec!(1000000), dec!(400000), true, 1));
    let svc = service(repo.clone());

    let update = GoalUpdate {
        target_amount: Some(dec!(300000)),
        ..Default::default()
    };
    let err = svc.update_goal("user-1", "g1", update).await.unwrap_err();

    assert_eq!(err.code(), Some("TARGET_BELOW_CURRENT"));
    assert_eq!(repo.get_by_id("user-1", "g1").unwrap().target_amount, dec!(1000000));
}

#[tokio::test]
async fn test_update_rederives_progress() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("g1", dec!(1000000), dec!(400000), true, 1));
    let svc = service(repo.clone());

    let update = GoalUpdate {
        name: Some("  Fondo de viaje ".to_string()),
        target_amount: Some(dec!(400000)),
        ..Default::default()
    };
    let updated = svc.update_goal("user-1", "g1", update).await.unwrap();

    assert_eq!(updated.name, "Fondo de viaje");
    assert_eq!(updated.current_amount, dec!(400000));
    assert_eq!(updated.progress_percentage, dec!(100));
    assert_eq!(updated.status, GoalStatus::Completed);
}

#[tokio::test]
async fn test_create_goal_rejects_target_above_record_ceiling() {
    let svc = service(Arc::new(MockGoalRepository::default()));
    let mut input = new_goal("Vacaciones", false);
    input.target_amount = dec!(1000000000001);

    let err = svc.create_goal("user-1", input).await.unwrap_err();

    assert_eq!(err.field(), Some("target_amount"));
}

#[tokio::test]
async fn test_update_clears_description_and_target_date() {
    let repo = Arc::new(MockGoalRepository::default());
    let mut seeded = goal("g1", dec!(1000000), dec!(0), true, 1);
    seeded.description = Some("Tiquetes".to_string());
    seeded.target_date = today().checked_add_signed(Duration::days(90));
    repo.seed_goal(seeded);
    let svc = service(repo.clone());

    let untouched = svc
        .update_goal("user-1", "g1", GoalUpdate::default())
        .await
        .unwrap();
    assert_eq!(untouched.description.as_deref(), Some("Tiquetes"));
    assert!(untouched.target_date.is_some());

    let update = GoalUpdate {
        description: Some(None),
        target_date: Some(None),
        ..Default::default()
    };
    let cleared = svc.update_goal("user-1", "g1", update).await.unwrap();

    assert_eq!(cleared.description, None);
    assert_eq!(cleared.target_date, None);
}

#[test]
fn test_update_patch_fields_distinguish_null_from_absent() {
    let absent: GoalUpdate = serde_json::from_str(r#"{"name":"Viaje"}"#).unwrap();
    assert!(absent.description.is_none());
    assert!(absent.target_date.is_none());

    let cleared: GoalUpdate =
        serde_json::from_str(r#"{"description":null,"targetDate":null}"#).unwrap();
    assert_eq!(cleared.description, Some(None));
    assert_eq!(cleared.target_date, Some(None));

    let set: GoalUpdate = serde_json::from_str(r#"{"targetDate":"2026-01-31"}"#).unwrap();
    assert_eq!(set.target_date, Some(NaiveDate::from_ymd_opt(2026, 1, 31)));
}

#[tokio::test]
async fn test_update_with_is_main_moves_designation() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("g1", dec!(100), dec!(0), true, 2));
    repo.seed_goal(goal("g2", dec!(100), dec!(0), false, 1));
    let svc = service(repo.clone());

    let update = GoalUpdate {
        is_main: Some(true),
        ..Default::default()
    };
    svc.update_goal("user-1", "g2", update).await.unwrap();

    assert_eq!(main_ids(&repo), vec!["g2".to_string()]);
}

// ============================================================================
// Main goal designation and deletion
// ============================================================================

#[tokio::test]
async fn test_set_main_goal_leaves_exactly_one_main() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("a", dec!(100), dec!(0), true, 3));
    repo.seed_goal(goal("b", dec!(100), dec!(0), false, 2));
    repo.seed_goal(goal("c", dec!(100), dec!(0), false, 1));
    let svc = service(repo.clone());

    let goals = svc.set_main_goal("user-1", "b").await.unwrap();

    assert_eq!(goals.len(), 3);
    let mains: Vec<&Goal> = goals.iter().filter(|g| g.is_main).collect();
    assert_eq!(mains.len(), 1);
    assert_eq!(mains[0].id, "b");
}

#[tokio::test]
async fn test_set_main_goal_unknown_goal_is_not_found() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("a", dec!(100), dec!(0), true, 1));
    let svc = service(repo);

    let err = svc.set_main_goal("user-1", "missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_deleting_main_goal_promotes_newest_remaining() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("old", dec!(100), dec!(0), false, 10));
    repo.seed_goal(goal("main", dec!(100), dec!(0), true, 5));
    repo.seed_goal(goal("new", dec!(100), dec!(0), false, 1));
    let svc = service(repo.clone());

    svc.delete_goal("user-1", "main").await.unwrap();

    assert_eq!(main_ids(&repo), vec!["new".to_string()]);
}

#[tokio::test]
async fn test_deleting_last_goal_is_rejected() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("only", dec!(100), dec!(0), true, 1));
    let svc = service(repo.clone());

    let err = svc.delete_goal("user-1", "only").await.unwrap_err();

    assert_eq!(err.code(), Some("LAST_GOAL"));
    assert_eq!(err.kind(), ErrorKind::BusinessRule);
    assert_eq!(repo.snapshot().goals.len(), 1);
}

// ============================================================================
// Contributions
// ============================================================================

#[tokio::test]
async fn test_contribution_updates_goal_and_balance() {
    let repo = Arc::new(MockGoalRepository::with_budget(
        dec!(0),
        vec![income(dec!(2000000))],
    ));
    repo.seed_goal(goal("g1", dec!(5000000), dec!(1000000), true, 1));
    let svc = service(repo.clone());

    let outcome = svc
        .contribute_to_goal("user-1", "g1", contribution(dec!(1500000)))
        .await
        .unwrap();

    assert_eq!(outcome.goal.current_amount, dec!(2500000));
    assert_eq!(outcome.goal.progress_percentage, dec!(50));

    let state = repo.snapshot();
    assert_eq!(state.goals[0].current_amount, dec!(2500000));
    assert_eq!(state.transactions.len(), 2);
    assert_eq!(
        compute_available_balance(state.initial_budget, &state.transactions).unwrap(),
        dec!(500000)
    );
}

#[tokio::test]
async fn test_insufficient_balance_leaves_state_unchanged() {
    let repo = Arc::new(MockGoalRepository::with_budget(
        dec!(0),
        vec![income(dec!(2000000))],
    ));
    repo.seed_goal(goal("g1", dec!(5000000), dec!(1000000), true, 1));
    let svc = service(repo.clone());
    let before = repo.snapshot();

    let err = svc
        .contribute_to_goal("user-1", "g1", contribution(dec!(3000000)))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some("INSUFFICIENT_BALANCE"));
    assert_eq!(repo.snapshot(), before);
}

#[tokio::test]
async fn test_exceeds_remaining_reported_before_balance() {
    let repo = Arc::new(MockGoalRepository::with_budget(
        dec!(0),
        vec![income(dec!(2000000))],
    ));
    repo.seed_goal(goal("g1", dec!(5000000), dec!(1000000), true, 1));
    let svc = service(repo.clone());
    let before = repo.snapshot();

    let err = svc
        .contribute_to_goal("user-1", "g1", contribution(dec!(4500000)))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some("EXCEEDS_GOAL_REMAINING"));
    assert_eq!(repo.snapshot(), before);
}

#[tokio::test]
async fn test_sequential_contributions_see_each_other() {
    let repo = Arc::new(MockGoalRepository::with_budget(dec!(1000000), Vec::new()));
    repo.seed_goal(goal("g1", dec!(5000000), dec!(0), true, 1));
    let svc = service(repo.clone());

    svc.contribute_to_goal("user-1", "g1", contribution(dec!(700000)))
        .await
        .unwrap();
    let err = svc
        .contribute_to_goal("user-1", "g1", contribution(dec!(700000)))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some("INSUFFICIENT_BALANCE"));
}

#[tokio::test]
async fn test_contribute_to_main_goal() {
    let repo = Arc::new(MockGoalRepository::with_budget(dec!(1000000), Vec::new()));
    repo.seed_goal(goal("side", dec!(500000), dec!(0), false, 2));
    repo.seed_goal(goal("main", dec!(500000), dec!(0), true, 1));
    let svc = service(repo.clone());

    let outcome = svc
        .contribute_to_main_goal("user-1", contribution(dec!(100000)))
        .await
        .unwrap();

    assert_eq!(outcome.goal.id, "main");
    assert_eq!(outcome.transaction.goal_id.as_deref(), Some("main"));
}

#[tokio::test]
async fn test_contribute_to_main_goal_without_goals_is_not_found() {
    let svc = service(Arc::new(MockGoalRepository::with_budget(dec!(1000), Vec::new())));

    let err = svc
        .contribute_to_main_goal("user-1", contribution(dec!(100)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), Some("NO_MAIN_GOAL"));
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn test_overdue_goal_is_reported_failed() {
    let repo = Arc::new(MockGoalRepository::default());
    let mut overdue = goal("late", dec!(100), dec!(10), true, 40);
    overdue.target_date = today().checked_sub_signed(Duration::days(1));
    repo.seed_goal(overdue);
    let svc = service(repo);

    let fetched = svc.get_goal("user-1", "late").unwrap();

    assert_eq!(fetched.status, GoalStatus::Failed);
}

#[test]
fn test_list_goals_filters_and_orders_newest_first() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("a", dec!(100), dec!(0), true, 3));
    repo.seed_goal(goal("b", dec!(100), dec!(100), false, 2));
    repo.seed_goal(goal("c", dec!(100), dec!(0), false, 1));
    let svc = service(repo);

    let all = svc.list_goals("user-1", &GoalFilter::default()).unwrap();
    let ids: Vec<&str> = all.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);

    let active = svc
        .list_goals(
            "user-1",
            &GoalFilter {
                status: Some(GoalStatus::Active),
                category: None,
            },
        )
        .unwrap();
    assert_eq!(active.len(), 2);
}

#[test]
fn test_goal_stats() {
    let repo = Arc::new(MockGoalRepository::default());
    repo.seed_goal(goal("a", dec!(1000), dec!(500), true, 2));
    repo.seed_goal(goal("b", dec!(1000), dec!(1000), false, 1));
    let svc = service(repo);

    let stats = svc.get_goal_stats("user-1").unwrap();

    assert_eq!(stats.total_goals_count, 2);
    assert_eq!(stats.active_goals_count, 1);
    assert_eq!(stats.completed_goals_count, 1);
    assert_eq!(stats.total_saved, dec!(1500));
    assert_eq!(stats.total_target_amount, dec!(2000));
    assert_eq!(stats.average_progress, dec!(75));
}

//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::balance::ensure_record_amount;
use crate::constants::{
    MAX_DESCRIPTION_LENGTH, MAX_GOAL_NAME_LENGTH, MAX_TARGET_DATE_YEARS, MIN_GOAL_NAME_LENGTH,
};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::Transaction;

use super::goals_errors::GoalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Failed,
    Archived,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Failed => "failed",
            GoalStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "failed" => Ok(GoalStatus::Failed),
            "archived" => Ok(GoalStatus::Archived),
            other => Err(ValidationError::field("status", format!("unknown goal status '{}'", other)).into()),
        }
    }
}

/// Goal categories, serialized with the labels shown in the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalCategory {
    #[serde(rename = "Fondo de Emergencia")]
    EmergencyFund,
    #[serde(rename = "Viajes")]
    Travel,
    #[serde(rename = "Educación")]
    Education,
    #[serde(rename = "Vivienda")]
    Home,
    #[serde(rename = "Vehículo")]
    Vehicle,
    #[serde(rename = "Tecnología")]
    Technology,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Boda")]
    Wedding,
    #[serde(rename = "Jubilación")]
    Retirement,
    #[serde(rename = "Ahorros")]
    Savings,
    #[serde(rename = "Inversiones")]
    Investments,
    #[serde(rename = "Otros")]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 12] = [
        GoalCategory::EmergencyFund,
        GoalCategory::Travel,
        GoalCategory::Education,
        GoalCategory::Home,
        GoalCategory::Vehicle,
        GoalCategory::Technology,
        GoalCategory::Health,
        GoalCategory::Wedding,
        GoalCategory::Retirement,
        GoalCategory::Savings,
        GoalCategory::Investments,
        GoalCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::EmergencyFund => "Fondo de Emergencia",
            GoalCategory::Travel => "Viajes",
            GoalCategory::Education => "Educación",
            GoalCategory::Home => "Vivienda",
            GoalCategory::Vehicle => "Vehículo",
            GoalCategory::Technology => "Tecnología",
            GoalCategory::Health => "Salud",
            GoalCategory::Wedding => "Boda",
            GoalCategory::Retirement => "Jubilación",
            GoalCategory::Savings => "Ahorros",
            GoalCategory::Investments => "Inversiones",
            GoalCategory::Other => "Otros",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| {
                ValidationError::field("category", format!("unknown goal category '{}'", s)).into()
            })
    }
}

/// `min(100, current / target * 100)`, or zero for a non-positive target.
///
/// Never overflows: a reached target short-circuits to 100, and below it the
/// ratio is under one.
pub fn compute_progress(current_amount: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if current_amount >= target_amount {
        return Decimal::ONE_HUNDRED;
    }
    match current_amount.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled / target_amount,
        None => current_amount / target_amount * Decimal::ONE_HUNDRED,
    }
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress_percentage: Decimal,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub currency: String,
    pub is_public: bool,
    pub is_main: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Amount still needed to reach the target. Never negative.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Re-derives progress from the amounts and moves the status along.
    pub fn refresh_progress(&mut self, today: NaiveDate) {
        self.progress_percentage = compute_progress(self.current_amount, self.target_amount);
        if self.progress_percentage >= Decimal::ONE_HUNDRED {
            self.status = GoalStatus::Completed;
        } else if self.status == GoalStatus::Active
            && self.target_date.is_some_and(|d| d < today)
        {
            self.status = GoalStatus::Failed;
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.trim().chars().count();
    if !(MIN_GOAL_NAME_LENGTH..=MAX_GOAL_NAME_LENGTH).contains(&len) {
        return Err(ValidationError::field(
            "name",
            format!(
                "must be between {} and {} characters",
                MIN_GOAL_NAME_LENGTH, MAX_GOAL_NAME_LENGTH
            ),
        )
        .into());
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(ValidationError::field(
            "description",
            format!("must be at most {} characters", MAX_DESCRIPTION_LENGTH),
        )
        .into());
    }
    Ok(())
}

fn validate_target_amount(target_amount: Decimal) -> Result<()> {
    if target_amount <= Decimal::ZERO {
        return Err(ValidationError::field("target_amount", "must be greater than 0").into());
    }
    ensure_record_amount("target_amount", target_amount)
}

/// Target dates must be after today and within the planning horizon.
pub fn validate_target_date(target_date: NaiveDate, today: NaiveDate) -> Result<()> {
    if target_date <= today {
        return Err(ValidationError::field("target_date", "must be in the future").into());
    }
    let horizon = today
        .checked_add_months(Months::new(MAX_TARGET_DATE_YEARS as u32 * 12))
        .unwrap_or(NaiveDate::MAX);
    if target_date > horizon {
        return Err(ValidationError::field(
            "target_date",
            format!("must be within {} years", MAX_TARGET_DATE_YEARS),
        )
        .into());
    }
    Ok(())
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub target_amount: Decimal,
    /// Starting amount for goals carried over from elsewhere.
    #[serde(default)]
    pub current_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_main: bool,
}

impl NewGoal {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        validate_name(&self.name)?;
        validate_description(self.description.as_deref())?;
        validate_target_amount(self.target_amount)?;
        if let Some(seed) = self.current_amount {
            if seed < Decimal::ZERO {
                return Err(
                    ValidationError::field("current_amount", "must not be negative").into(),
                );
            }
            if seed > self.target_amount {
                return Err(ValidationError::field(
                    "current_amount",
                    "must not exceed the target amount",
                )
                .into());
            }
        }
        if let Some(target_date) = self.target_date {
            validate_target_date(target_date, today)?;
        }
        Ok(())
    }
}

/// Patch field: absent keeps the value, `null` clears it.
fn deserialize_patch<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update of a goal. There is no `current_amount`: it only moves
/// through contributions.
///
/// `description` and `target_date` are patch fields: `None` leaves them
/// alone, `Some(None)` clears them.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: Option<Option<String>>,
    pub category: Option<GoalCategory>,
    pub target_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub target_date: Option<Option<NaiveDate>>,
    pub status: Option<GoalStatus>,
    pub is_public: Option<bool>,
    pub is_main: Option<bool>,
}

impl GoalUpdate {
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_description(self.description.as_ref().and_then(|d| d.as_deref()))?;
        if let Some(target_amount) = self.target_amount {
            validate_target_amount(target_amount)?;
        }
        if let Some(Some(target_date)) = self.target_date {
            validate_target_date(target_date, today)?;
        }
        Ok(())
    }

    /// Applies the update onto `goal`. `is_main` is left to the caller since
    /// it involves the user's other goals.
    pub fn apply_to(&self, goal: &mut Goal, now: NaiveDateTime) -> Result<()> {
        if let Some(target_amount) = self.target_amount {
            if target_amount < goal.current_amount {
                return Err(GoalError::TargetBelowCurrent {
                    target: target_amount,
                    current: goal.current_amount,
                }
                .into());
            }
            goal.target_amount = target_amount;
        }
        if let Some(name) = &self.name {
            goal.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            goal.description = description.clone();
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(is_public) = self.is_public {
            goal.is_public = is_public;
        }
        goal.updated_at = now;
        goal.refresh_progress(now.date());
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilter {
    pub status: Option<GoalStatus>,
    pub category: Option<GoalCategory>,
}

impl GoalFilter {
    pub fn matches(&self, goal: &Goal) -> bool {
        self.status.map_or(true, |s| goal.status == s)
            && self.category.map_or(true, |c| goal.category == c)
    }
}

/// Aggregate figures over a user's goals
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub total_saved: Decimal,
    pub total_target_amount: Decimal,
    pub active_goals_count: usize,
    pub completed_goals_count: usize,
    pub failed_goals_count: usize,
    pub archived_goals_count: usize,
    pub total_goals_count: usize,
    pub average_progress: Decimal,
}

impl GoalStats {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let mut stats = GoalStats::default();
        let mut progress_sum = Decimal::ZERO;
        for goal in goals {
            match goal.status {
                GoalStatus::Active => stats.active_goals_count += 1,
                GoalStatus::Completed => stats.completed_goals_count += 1,
                GoalStatus::Failed => stats.failed_goals_count += 1,
                GoalStatus::Archived => stats.archived_goals_count += 1,
            }
            stats.total_saved += goal.current_amount;
            stats.total_target_amount += goal.target_amount;
            progress_sum += goal.progress_percentage;
        }
        stats.total_goals_count = goals.len();
        if !goals.is_empty() {
            stats.average_progress = progress_sum / Decimal::from(goals.len());
        }
        stats
    }
}

/// A request to move money from the available balance into a goal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRequest {
    pub amount: Decimal,
    pub description: Option<String>,
    /// Defaults to today when omitted.
    pub contribution_date: Option<NaiveDate>,
}

/// Everything a contribution needs to be validated against, read inside the
/// same unit of work that will persist the outcome.
#[derive(Debug, Clone)]
pub struct ContributionSnapshot {
    pub goal: Goal,
    pub initial_budget: Decimal,
    pub transactions: Vec<Transaction>,
}

/// Result of a successful contribution: the goal after the change and the
/// transaction recording it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionOutcome {
    pub goal: Goal,
    pub transaction: Transaction,
}

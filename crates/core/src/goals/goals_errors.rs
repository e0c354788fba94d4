use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::errors::ErrorKind;

/// Reasons a contribution is refused. Each one carries a stable code and the
/// input field it concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContributionError {
    #[error("Contribution amount must be greater than 0")]
    AmountInvalid,

    #[error("Contribution amount must not exceed {max}")]
    AmountTooLarge { max: Decimal },

    #[error("Contribution date {date} is in the future")]
    FutureContributionDate { date: NaiveDate },

    #[error("Contribution description must be at most {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("Archived goals do not accept contributions")]
    GoalArchived,

    #[error("Contribution of {requested} exceeds the remaining {remaining} for this goal")]
    ExceedsGoalRemaining {
        requested: Decimal,
        remaining: Decimal,
    },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },
}

impl ContributionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContributionError::AmountInvalid
            | ContributionError::AmountTooLarge { .. }
            | ContributionError::FutureContributionDate { .. }
            | ContributionError::DescriptionTooLong { .. } => ErrorKind::Validation,
            ContributionError::GoalArchived
            | ContributionError::ExceedsGoalRemaining { .. }
            | ContributionError::InsufficientBalance { .. } => ErrorKind::BusinessRule,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContributionError::AmountInvalid => "AMOUNT_INVALID",
            ContributionError::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            ContributionError::FutureContributionDate { .. } => "FUTURE_CONTRIBUTION_DATE",
            ContributionError::DescriptionTooLong { .. } => "DESCRIPTION_TOO_LONG",
            ContributionError::GoalArchived => "GOAL_ARCHIVED",
            ContributionError::ExceedsGoalRemaining { .. } => "EXCEEDS_GOAL_REMAINING",
            ContributionError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ContributionError::FutureContributionDate { .. } => "contribution_date",
            ContributionError::DescriptionTooLong { .. } => "description",
            ContributionError::GoalArchived => "goal_id",
            _ => "amount",
        }
    }
}

/// Goal lifecycle rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalError {
    #[error("A user must keep at least one goal")]
    LastGoal,

    #[error("User has no main goal")]
    NoMainGoal,

    #[error("Target amount {target} is below the amount already saved ({current})")]
    TargetBelowCurrent { target: Decimal, current: Decimal },
}

impl GoalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GoalError::LastGoal => ErrorKind::BusinessRule,
            GoalError::NoMainGoal => ErrorKind::NotFound,
            GoalError::TargetBelowCurrent { .. } => ErrorKind::Validation,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GoalError::LastGoal => "LAST_GOAL",
            GoalError::NoMainGoal => "NO_MAIN_GOAL",
            GoalError::TargetBelowCurrent { .. } => "TARGET_BELOW_CURRENT",
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            GoalError::TargetBelowCurrent { .. } => Some("target_amount"),
            _ => None,
        }
    }
}

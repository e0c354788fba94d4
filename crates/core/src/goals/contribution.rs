//! The goal contribution state transition.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::balance::checked_sum;
use crate::constants::{
    DEFAULT_CURRENCY, MAX_CONTRIBUTION_AMOUNT, MAX_CONTRIBUTION_DESCRIPTION_LENGTH,
};
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionKind};

use super::goals_errors::ContributionError;
use super::goals_model::{ContributionOutcome, ContributionRequest, Goal, GoalStatus};

/// Applies `request` to `goal` given a freshly computed `available_balance`.
///
/// Checks run in a fixed order and the first failure wins; in particular the
/// goal's remaining need is checked before the balance. Archived goals take
/// no contributions; failed goals still do. On success the
/// returned goal and transaction must be persisted together. The input goal
/// is never modified.
pub fn contribute_to_goal(
    goal: &Goal,
    request: &ContributionRequest,
    available_balance: Decimal,
    now: NaiveDateTime,
) -> Result<ContributionOutcome> {
    let amount = request.amount;
    if amount <= Decimal::ZERO {
        return Err(ContributionError::AmountInvalid.into());
    }
    let max = Decimal::from(MAX_CONTRIBUTION_AMOUNT);
    if amount > max {
        return Err(ContributionError::AmountTooLarge { max }.into());
    }

    let today = now.date();
    let contribution_date = request.contribution_date.unwrap_or(today);
    if contribution_date > today {
        return Err(ContributionError::FutureContributionDate {
            date: contribution_date,
        }
        .into());
    }

    if request
        .description
        .as_deref()
        .is_some_and(|d| d.chars().count() > MAX_CONTRIBUTION_DESCRIPTION_LENGTH)
    {
        return Err(ContributionError::DescriptionTooLong {
            max: MAX_CONTRIBUTION_DESCRIPTION_LENGTH,
        }
        .into());
    }

    if goal.status == GoalStatus::Archived {
        return Err(ContributionError::GoalArchived.into());
    }

    let remaining = goal.remaining();
    if amount > remaining {
        return Err(ContributionError::ExceedsGoalRemaining {
            requested: amount,
            remaining,
        }
        .into());
    }
    if amount > available_balance {
        return Err(ContributionError::InsufficientBalance {
            requested: amount,
            available: available_balance,
        }
        .into());
    }

    let mut updated = goal.clone();
    updated.current_amount = checked_sum(goal.current_amount, amount)?;
    updated.updated_at = now;
    updated.refresh_progress(today);

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Abono a meta: {}", goal.name));

    let transaction = Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: goal.user_id.clone(),
        kind: TransactionKind::GoalContribution,
        amount,
        category: goal.category.label().to_string(),
        description: Some(description),
        date: contribution_date.and_time(now.time()),
        created_at: now,
        currency: DEFAULT_CURRENCY.to_string(),
        goal_id: Some(goal.id.clone()),
        goal_name: Some(goal.name.clone()),
    };

    Ok(ContributionOutcome {
        goal: updated,
        transaction,
    })
}

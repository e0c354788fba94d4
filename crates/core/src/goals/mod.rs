//! Goals module - domain models, services, and traits.

mod contribution;
mod goals_errors;
mod goals_model;
mod goals_service;
mod goals_traits;

pub use contribution::contribute_to_goal;
pub use goals_errors::{ContributionError, GoalError};
pub use goals_model::*;
pub use goals_service::GoalService;
pub use goals_traits::{
    ContributionFn, ContributionTarget, GoalRepositoryTrait, GoalServiceTrait, GoalUpdateFn,
};

#[cfg(test)]
mod goals_service_tests;

//! User budget configuration and the balance derived from it.

mod budget_model;
mod budget_service;
mod budget_traits;

pub use budget_model::*;
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

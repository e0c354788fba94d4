//! SQLite storage implementation for per-user budget settings.

mod model;
mod repository;

pub use model::UserBudgetDB;
pub(crate) use repository::load_budget;
pub use repository::BudgetRepository;

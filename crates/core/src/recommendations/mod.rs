//! Spending-cut suggestions for users whose expenses exceed their budget.

mod recommendations_model;
mod greedy;

pub use greedy::greedy_recommendations;
pub use recommendations_model::*;

//! Income and expense records, plus the goal contributions written alongside them.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::*;
pub use transactions_service::*;
pub use transactions_traits::*;

//! Read-only financial reports over a user's income and expenses.

mod reports_calculator;
mod reports_model;
mod reports_service;

pub use reports_calculator::*;
pub use reports_model::*;
pub use reports_service::{ReportService, ReportServiceTrait};

//! Zero-filled savings analytics over goal contributions.

mod analytics_model;
mod analytics_service;
mod series;

pub use analytics_model::*;
pub use analytics_service::{AnalyticsService, AnalyticsServiceTrait};
pub use series::{build_daily_series, build_monthly_series, monthly_totals};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SERIES_MONTHS;
use crate::goals::GoalCategory;

/// One calendar month of a series. `period` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmount {
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAmount {
    pub day: u32,
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSeriesQuery {
    pub goal_id: Option<String>,
    pub category: Option<GoalCategory>,
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_months() -> u32 {
    DEFAULT_SERIES_MONTHS
}

impl Default for ContributionSeriesQuery {
    fn default() -> Self {
        ContributionSeriesQuery {
            goal_id: None,
            category: None,
            months: DEFAULT_SERIES_MONTHS,
        }
    }
}

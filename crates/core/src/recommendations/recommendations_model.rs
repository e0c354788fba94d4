use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A planned expense submitted for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub essential: bool,
    /// Largest share of the amount that may be cut, clamped to `0..=1`.
    pub max_cut_fraction: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub budget: Decimal,
    pub expenses: Vec<ExpenseInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub original_amount: Decimal,
    pub recommended_amount: Decimal,
    pub reduced_by: Decimal,
    pub reduced_by_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsReport {
    pub total_budget: Decimal,
    pub total_expenses: Decimal,
    pub overspend: Decimal,
    pub recommendations: Vec<RecommendationItem>,
}

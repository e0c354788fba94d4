use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use gastosmart_core::{
    constants::DEFAULT_TREND_MONTHS,
    reports::{
        ExpenseCategoryReport, IncomeTrendReport, MonthlySummary, SavingsEvolutionReport,
        WeeklyExpensesReport,
    },
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthParams {
    user_id: String,
    year: i32,
    month: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeParams {
    user_id: String,
    from: NaiveDate,
    to: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekParams {
    user_id: String,
    week_start: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendParams {
    user_id: String,
    months: Option<u32>,
}

async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> ApiResult<Json<MonthlySummary>> {
    let summary =
        state
            .report_service
            .monthly_summary(&params.user_id, params.year, params.month)?;
    Ok(Json(summary))
}

async fn expense_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ExpenseCategoryReport>> {
    let report =
        state
            .report_service
            .expense_category_report(&params.user_id, params.from, params.to)?;
    Ok(Json(report))
}

async fn weekly_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeekParams>,
) -> ApiResult<Json<WeeklyExpensesReport>> {
    let report = state
        .report_service
        .weekly_expenses_report(&params.user_id, params.week_start)?;
    Ok(Json(report))
}

async fn income_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendParams>,
) -> ApiResult<Json<IncomeTrendReport>> {
    let report = state.report_service.income_trend_report(
        &params.user_id,
        params.months.unwrap_or(DEFAULT_TREND_MONTHS),
    )?;
    Ok(Json(report))
}

async fn savings_evolution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendParams>,
) -> ApiResult<Json<SavingsEvolutionReport>> {
    let report = state.report_service.savings_evolution_report(
        &params.user_id,
        params.months.unwrap_or(DEFAULT_TREND_MONTHS),
    )?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/monthly-summary", get(monthly_summary))
        .route("/reports/expense-categories", get(expense_categories))
        .route("/reports/weekly-expenses", get(weekly_expenses))
        .route("/reports/income-trend", get(income_trend))
        .route("/reports/savings-evolution", get(savings_evolution))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gastosmart_core::{
    analytics::{ContributionSeriesQuery, DailyAmount, MonthlyAmount},
    constants::DEFAULT_SERIES_MONTHS,
    goals::{
        ContributionOutcome, ContributionRequest, Goal, GoalCategory, GoalFilter, GoalStats,
        GoalStatus, GoalUpdate, NewGoal,
    },
};
use serde::Deserialize;

use super::UserQuery;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    user_id: String,
    status: Option<GoalStatus>,
    category: Option<GoalCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlySeriesParams {
    user_id: String,
    goal_id: Option<String>,
    category: Option<GoalCategory>,
    months: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavingsParams {
    user_id: String,
    months: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailySeriesParams {
    user_id: String,
    year: Option<i32>,
    month: Option<u32>,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Goal>>> {
    let filter = GoalFilter {
        status: params.status,
        category: params.category,
    };
    let goals = state.goal_service.list_goals(&params.user_id, &filter)?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(new_goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create_goal(&user.user_id, new_goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<Json<Goal>> {
    Ok(Json(state.goal_service.get_goal(&user.user_id, &id)?))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_goal(&user.user_id, &id, update)
        .await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_main_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.set_main_goal(&user.user_id, &id).await?;
    Ok(Json(goals))
}

async fn contribute(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(request): Json<ContributionRequest>,
) -> ApiResult<Json<ContributionOutcome>> {
    let outcome = state
        .goal_service
        .contribute_to_goal(&user.user_id, &id, request)
        .await?;
    Ok(Json(outcome))
}

async fn contribute_to_main(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(request): Json<ContributionRequest>,
) -> ApiResult<Json<ContributionOutcome>> {
    let outcome = state
        .goal_service
        .contribute_to_main_goal(&user.user_id, request)
        .await?;
    Ok(Json(outcome))
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<Json<GoalStats>> {
    Ok(Json(state.goal_service.get_goal_stats(&user.user_id)?))
}

async fn get_categories() -> Json<Vec<GoalCategory>> {
    Json(GoalCategory::ALL.to_vec())
}

async fn monthly_contributions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlySeriesParams>,
) -> ApiResult<Json<Vec<MonthlyAmount>>> {
    let query = ContributionSeriesQuery {
        goal_id: params.goal_id,
        category: params.category,
        months: params.months.unwrap_or(DEFAULT_SERIES_MONTHS),
    };
    let series = state
        .analytics_service
        .monthly_contribution_series(&params.user_id, &query)?;
    Ok(Json(series))
}

async fn monthly_savings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SavingsParams>,
) -> ApiResult<Json<Vec<MonthlyAmount>>> {
    let series = state.analytics_service.monthly_savings_series(
        &params.user_id,
        params.months.unwrap_or(DEFAULT_SERIES_MONTHS),
    )?;
    Ok(Json(series))
}

async fn daily_contributions(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(params): Query<DailySeriesParams>,
) -> ApiResult<Json<Vec<DailyAmount>>> {
    let series = state.analytics_service.daily_contribution_series(
        &params.user_id,
        &id,
        params.year,
        params.month,
    )?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/stats", get(get_stats))
        .route("/goals/categories", get(get_categories))
        .route("/goals/contributions/monthly", get(monthly_contributions))
        .route("/goals/savings/monthly", get(monthly_savings))
        .route("/goals/main-goal/contribute", post(contribute_to_main))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contribute", post(contribute))
        .route("/goals/{id}/set-main", post(set_main_goal))
        .route("/goals/{id}/contributions/daily", get(daily_contributions))
}

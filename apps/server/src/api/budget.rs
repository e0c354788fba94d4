use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use gastosmart_core::{
    budget::{BudgetConfig, BudgetUpdate},
    BalanceSummary,
};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_budget(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetConfig>> {
    Ok(Json(state.budget_service.get_budget(&user_id)?))
}

async fn update_budget(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<BudgetConfig>> {
    let budget = state.budget_service.update_budget(&user_id, update).await?;
    Ok(Json(budget))
}

async fn get_balance(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BalanceSummary>> {
    Ok(Json(state.budget_service.get_balance(&user_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/budget", get(get_budget).put(update_budget))
        .route("/users/{user_id}/balance", get(get_balance))
}

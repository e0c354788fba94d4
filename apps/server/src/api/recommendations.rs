use std::sync::Arc;

use axum::{routing::post, Json, Router};
use gastosmart_core::recommendations::{
    greedy_recommendations, RecommendationRequest, RecommendationsReport,
};

use crate::{error::ApiResult, main_lib::AppState};

/// Stateless: nothing about the request is stored.
async fn recommend(
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<Json<RecommendationsReport>> {
    Ok(Json(greedy_recommendations(&request)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", post(recommend))
}

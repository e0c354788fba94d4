use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use gastosmart_core::{
    constants::DEFAULT_PAGE_LIMIT,
    transactions::{
        NewTransaction, SortOrder, Transaction, TransactionFilter, TransactionKind,
        TransactionQuery, TransactionSort, TransactionSortField, TransactionStats,
    },
};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::UserQuery;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    user_id: String,
    kind: Option<TransactionKind>,
    category: Option<String>,
    date_from: Option<NaiveDateTime>,
    date_to: Option<NaiveDateTime>,
    amount_min: Option<Decimal>,
    amount_max: Option<Decimal>,
    #[serde(default)]
    sort_by: TransactionSortField,
    #[serde(default)]
    sort_order: SortOrder,
    #[serde(default)]
    skip: i64,
    limit: Option<i64>,
}

impl ListParams {
    fn into_query(self) -> (String, TransactionQuery) {
        let query = TransactionQuery {
            filter: TransactionFilter {
                kind: self.kind,
                category: self.category,
                date_from: self.date_from,
                date_to: self.date_to,
                amount_min: self.amount_min,
                amount_max: self.amount_max,
            },
            sort: TransactionSort {
                field: self.sort_by,
                order: self.sort_order,
            },
            skip: self.skip,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        };
        (self.user_id, query)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsParams {
    user_id: String,
    date_from: Option<NaiveDateTime>,
    date_to: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryParams {
    user_id: String,
    kind: Option<TransactionKind>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let (user_id, query) = params.into_query();
    let transactions = state
        .transaction_service
        .list_transactions(&user_id, &query)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let created = state
        .transaction_service
        .create_transaction(&user.user_id, new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .get_transaction(&user.user_id, &id)?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(user): Query<UserQuery>,
) -> ApiResult<StatusCode> {
    state
        .transaction_service
        .delete_transaction(&user.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<TransactionStats>> {
    let stats = state.transaction_service.get_transaction_stats(
        &params.user_id,
        params.date_from,
        params.date_to,
    )?;
    Ok(Json(stats))
}

async fn get_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<Json<Vec<String>>> {
    let categories = state
        .transaction_service
        .get_categories(&params.user_id, params.kind)?;
    Ok(Json(categories))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/stats", get(get_stats))
        .route("/transactions/categories", get(get_categories))
        .route(
            "/transactions/{id}",
            get(get_transaction).delete(delete_transaction),
        )
}

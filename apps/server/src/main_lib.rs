use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use gastosmart_core::{
    analytics::{AnalyticsService, AnalyticsServiceTrait},
    budget::{BudgetService, BudgetServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    reports::{ReportService, ReportServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    utils::{Clock, SystemClock},
};
use gastosmart_storage_sqlite::{
    budget::BudgetRepository, db, goals::GoalRepository, transactions::TransactionRepository,
};

use crate::config::Config;

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("GS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    build_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Wires every repository and service over one pool and one writer actor.
pub async fn build_state_with_clock(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer));

    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        transaction_repo.clone(),
        clock.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo.clone(),
        clock.clone(),
    ));
    let goal_service = Arc::new(GoalService::new(goal_repo.clone(), clock.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(
        transaction_repo.clone(),
        goal_repo,
        clock.clone(),
    ));
    let report_service = Arc::new(ReportService::new(transaction_repo, clock));

    Ok(Arc::new(AppState {
        budget_service,
        transaction_service,
        goal_service,
        analytics_service,
        report_service,
    }))
}

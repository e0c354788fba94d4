use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use gastosmart_core::utils::FixedClock;
use gastosmart_server::{api::app_router, build_state_with_clock, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
    };
    let clock = Arc::new(FixedClock::at(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()));
    let state = build_state_with_clock(&config, clock).await.unwrap();
    (app_router(state, &config).unwrap(), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn healthz_works() {
    let (app, _tmp) = build_test_router().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn contribution_flow_updates_goal_and_balance() {
    let (app, _tmp) = build_test_router().await;

    let (status, budget) = send(
        &app,
        Method::PUT,
        "/api/v1/users/ana/budget",
        Some(json!({ "initialBudget": 2000000, "budgetPeriod": "mensual" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budget["budgetConfigured"], true);

    let (status, goal) = send(
        &app,
        Method::POST,
        "/api/v1/goals?userId=ana",
        Some(json!({
            "name": "Viaje a Cartagena",
            "category": "Viajes",
            "targetAmount": 5000000,
            "currentAmount": 1000000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["isMain"], true);
    let goal_id = goal["id"].as_str().unwrap().to_string();

    let (status, outcome) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goals/{goal_id}/contribute?userId=ana"),
        Some(json!({ "amount": 1500000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["goal"]["currentAmount"].as_f64(), Some(2500000.0));
    assert_eq!(outcome["goal"]["progressPercentage"].as_f64(), Some(50.0));
    assert_eq!(outcome["transaction"]["kind"], "goal_contribution");

    let (status, balance) = send(&app, Method::GET, "/api/v1/users/ana/balance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["availableBalance"].as_f64(), Some(500000.0));

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/goals/main-goal/contribute?userId=ana",
        Some(json!({ "amount": 1000000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["errorCode"], "INSUFFICIENT_BALANCE");
    assert_eq!(error["field"], "amount");

    let (status, series) = send(
        &app,
        Method::GET,
        "/api/v1/goals/contributions/monthly?userId=ana&months=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let series = series.as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[2]["period"], "2025-07");
    assert_eq!(series[2]["amount"].as_f64(), Some(1500000.0));
}

#[tokio::test]
async fn goal_rules_surface_as_typed_errors() {
    let (app, _tmp) = build_test_router().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/goals/main-goal/contribute?userId=leo",
        Some(json!({ "amount": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["errorCode"], "NO_MAIN_GOAL");

    let (_, goal) = send(
        &app,
        Method::POST,
        "/api/v1/goals?userId=leo",
        Some(json!({ "name": "Fondo", "category": "Fondo de Emergencia", "targetAmount": 900000 })),
    )
    .await;
    let goal_id = goal["id"].as_str().unwrap().to_string();

    let (status, error) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{goal_id}?userId=leo"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["errorCode"], "LAST_GOAL");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/goals/{goal_id}?userId=someone-else"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transactions_and_reports() {
    let (app, _tmp) = build_test_router().await;

    for (kind, amount, category) in [
        ("income", 3000000, "Salario"),
        ("expense", 200000, "Comida"),
        ("expense", 100000, "Transporte"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/transactions?userId=eva",
            Some(json!({
                "kind": kind,
                "amount": amount,
                "category": category,
                "date": "2025-07-10T09:00:00"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/transactions?userId=eva",
        Some(json!({
            "kind": "goal_contribution",
            "amount": 1000,
            "category": "Viajes",
            "date": "2025-07-10T09:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["message"].as_str().is_some());

    let (status, expenses) = send(
        &app,
        Method::GET,
        "/api/v1/transactions?userId=eva&kind=expense&sortBy=amount&sortOrder=asc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let expenses = expenses.as_array().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0]["category"], "Transporte");

    let (status, summary) = send(
        &app,
        Method::GET,
        "/api/v1/reports/monthly-summary?userId=eva&year=2025&month=7",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalIncome"].as_f64(), Some(3000000.0));
    assert_eq!(summary["totalExpenses"].as_f64(), Some(300000.0));
    assert_eq!(summary["balance"].as_f64(), Some(2700000.0));

    let (status, evolution) = send(
        &app,
        Method::GET,
        "/api/v1/reports/savings-evolution?userId=eva&months=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let months = evolution["monthlyData"].as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["period"], "2025-06");
    assert_eq!(months[0]["monthlySavings"].as_f64(), Some(0.0));
    assert_eq!(months[1]["monthlySavings"].as_f64(), Some(2700000.0));
    assert_eq!(evolution["totalSavings"].as_f64(), Some(2700000.0));

    let (status, categories) = send(
        &app,
        Method::GET,
        "/api/v1/transactions/categories?userId=eva&kind=expense",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories, json!(["Comida", "Transporte"]));
}

#[tokio::test]
async fn recommendations_cut_non_essentials() {
    let (app, _tmp) = build_test_router().await;

    let (status, report) = send(
        &app,
        Method::POST,
        "/api/v1/recommendations",
        Some(json!({
            "budget": 1000,
            "expenses": [
                { "name": "Arriendo", "amount": 800, "essential": true },
                { "name": "Salidas", "amount": 400, "essential": false }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["overspend"].as_f64(), Some(200.0));
    assert_eq!(report["recommendations"].as_array().unwrap().len(), 1);
}

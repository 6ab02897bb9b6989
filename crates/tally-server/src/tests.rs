//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tally_core::models::{Category, NewBudget, NewTransaction};
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, None, ServerConfig::default())
}

fn setup_seeded_app() -> Router {
    let db = Database::in_memory().unwrap();
    for (amount, date, description, category) in [
        (100.0, "2024-02-10", "Groceries", Category::FoodDining),
        (150.0, "2024-03-03", "Groceries", Category::FoodDining),
        (50.0, "2024-03-05", "Train", Category::Transportation),
    ] {
        db.create_transaction(&NewTransaction {
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            category,
        })
        .unwrap();
    }
    db.create_budget(&NewBudget {
        category: Category::FoodDining,
        amount: 100.0,
    })
    .unwrap();
    db.create_budget(&NewBudget {
        category: Category::Transportation,
        amount: 200.0,
    })
    .unwrap();
    create_router(db, None, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

// ========== Basic API Tests ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_categories() {
    let response = get(setup_test_app(), "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 9);
    assert_eq!(categories[0], "Food & Dining");
}

#[tokio::test]
async fn test_security_headers() {
    let response = get(setup_test_app(), "/api/health").await;
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_create_transaction() {
    let app = setup_test_app();

    let response = send_json(
        app.clone(),
        "POST",
        "/api/transactions",
        serde_json::json!({
            "amount": "42.50",
            "date": "2024-03-10",
            "description": "  Dinner  ",
            "category": "Food & Dining"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["amount"], 42.5);
    assert_eq!(json["description"], "Dinner");
    assert_eq!(json["category"], "Food & Dining");
    assert_eq!(json["date"], "2024-03-10");

    let id = json["id"].as_i64().unwrap();
    let response = get(app, &format!("/api/transactions/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_transaction_validation() {
    let app = setup_test_app();

    let cases = [
        serde_json::json!({ "amount": 0, "date": "2024-03-10", "description": "x", "category": "Other" }),
        serde_json::json!({ "amount": -5, "date": "2024-03-10", "description": "x", "category": "Other" }),
        serde_json::json!({ "amount": "abc", "date": "2024-03-10", "description": "x", "category": "Other" }),
        serde_json::json!({ "amount": 5, "date": "2024-02-30", "description": "x", "category": "Other" }),
        serde_json::json!({ "amount": 5, "date": "2024-03-10", "description": "   ", "category": "Other" }),
        serde_json::json!({ "amount": 5, "date": "2024-03-10", "description": "x", "category": "Groceries" }),
        serde_json::json!({ "amount": 5, "date": "2024-03-10" }),
    ];

    for body in cases {
        let response = send_json(app.clone(), "POST", "/api/transactions", body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
        let json = get_body_json(response).await;
        assert!(json["error"].is_string());
    }

    let response = get(app, "/api/transactions").await;
    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_json_body() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_list_transactions_with_filters() {
    let app = setup_seeded_app();

    let response = get(app.clone(), "/api/transactions").await;
    let json = get_body_json(response).await;
    let all = json.as_array().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["description"], "Train");

    let response = get(app.clone(), "/api/transactions?search=grocer").await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = get(app.clone(), "/api/transactions?category=transportation").await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = get(app.clone(), "/api/transactions?limit=1").await;
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = get(app, "/api/transactions?category=nope").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_transaction() {
    let app = setup_seeded_app();

    let response = send_json(
        app.clone(),
        "PUT",
        "/api/transactions/1",
        serde_json::json!({
            "amount": 99.99,
            "date": "2024-02-11",
            "description": "Big shop",
            "category": "Shopping"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);

    let json = get_body_json(get(app.clone(), "/api/transactions/1").await).await;
    assert_eq!(json["category"], "Shopping");
    assert_eq!(json["amount"], 99.99);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/transactions/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_transaction_returns_404() {
    let app = setup_test_app();

    let response = send_json(
        app.clone(),
        "PUT",
        "/api/transactions/999",
        serde_json::json!({
            "amount": 1,
            "date": "2024-01-01",
            "description": "x",
            "category": "Other"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_create_budget_and_duplicate() {
    let app = setup_test_app();
    let body = serde_json::json!({ "category": "Travel", "amount": 300 });

    let response = send_json(app.clone(), "POST", "/api/budgets", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Travel");
    assert_eq!(json["amount"], 300.0);

    let response = send_json(app.clone(), "POST", "/api/budgets", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = get_body_json(get(app, "/api/budgets").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_budget_validation() {
    let app = setup_test_app();

    let response = send_json(
        app.clone(),
        "POST",
        "/api/budgets",
        serde_json::json!({ "category": "Travel", "amount": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        app,
        "POST",
        "/api/budgets",
        serde_json::json!({ "category": "Pets", "amount": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_budget() {
    let app = setup_seeded_app();

    let response = send_json(
        app.clone(),
        "PUT",
        "/api/budgets/1",
        serde_json::json!({ "category": "Food & Dining", "amount": "250" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(get(app.clone(), "/api/budgets/1").await).await;
    assert_eq!(json["amount"], 250.0);

    // Category is fixed once created
    let response = send_json(
        app.clone(),
        "PUT",
        "/api/budgets/1",
        serde_json::json!({ "category": "Travel", "amount": 250 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        app,
        "PUT",
        "/api/budgets/999",
        serde_json::json!({ "amount": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_budget() {
    let app = setup_seeded_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/budgets/2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/budgets/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Analytics API Tests ==========

#[tokio::test]
async fn test_dashboard() {
    let response = get(setup_seeded_app(), "/api/analytics/dashboard?date=2024-03-15").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "2024-03");
    assert_eq!(json["total_expenses"], 200.0);
    assert_eq!(json["total_budget"], 300.0);
    assert_eq!(json["remaining_budget"], 100.0);
    assert_eq!(json["over_budget"], false);
    assert_eq!(json["transaction_count"], 2);
    assert_eq!(json["recent_transactions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_reference_date() {
    let response = get(setup_seeded_app(), "/api/analytics/dashboard?date=15-03-2024").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_monthly_series() {
    let response = get(setup_seeded_app(), "/api/analytics/monthly").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let series = json.as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["month"], "2024-02");
    assert_eq!(series[0]["label"], "Feb 2024");
    assert_eq!(series[1]["amount"], 200.0);
}

#[tokio::test]
async fn test_category_breakdown() {
    let response = get(setup_seeded_app(), "/api/analytics/categories?date=2024-03-15").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total"], 200.0);
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);

    let food = categories
        .iter()
        .find(|c| c["category"] == "Food & Dining")
        .unwrap();
    assert_eq!(food["amount"], 150.0);
    assert_eq!(food["percentage"], 75.0);
}

#[tokio::test]
async fn test_budget_status() {
    let response = get(setup_seeded_app(), "/api/analytics/budgets?date=2024-03-15").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let statuses = json["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 2);

    let food = statuses
        .iter()
        .find(|s| s["category"] == "Food & Dining")
        .unwrap();
    assert_eq!(food["spent"], 150.0);
    assert_eq!(food["remaining"], 0.0);
    assert_eq!(food["percent_used"], 150.0);
    assert_eq!(food["tier"], "over");

    assert_eq!(json["comparison"].as_array().unwrap().len(), 2);
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_insights() {
    let response = get(setup_seeded_app(), "/api/insights?date=2024-03-15").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json["insights"].as_array().unwrap();
    let kinds: Vec<_> = insights.iter().map(|i| i["kind"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        vec![
            "month_over_month",
            "over_budget",
            "top_categories",
            "projected_overspending",
            "good_budget_management",
        ]
    );
    assert_eq!(insights[0]["severity"], "warning");
    assert_eq!(
        insights[0]["description"],
        "You've spent 100.0% more this month compared to last month ($100.00)."
    );
    assert_eq!(json["summary"]["transaction_count"], 2);
}

#[tokio::test]
async fn test_insights_empty_database() {
    let response = get(setup_test_app(), "/api/insights?date=2024-03-15").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["insights"].as_array().unwrap().is_empty());
}

// ========== Export API Tests ==========

#[tokio::test]
async fn test_export_csv() {
    let response = get(setup_seeded_app(), "/api/export/transactions?format=csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,date,description,category,amount"));
    assert_eq!(lines.count(), 3);
}

#[tokio::test]
async fn test_export_json_and_bad_format() {
    let app = setup_seeded_app();

    let response = get(app.clone(), "/api/export/transactions?format=json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);

    let response = get(app, "/api/export/transactions?format=xml").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins("http://localhost:3000, https://tally.example ,,"),
        vec!["http://localhost:3000", "https://tally.example"]
    );
    assert!(parse_origins("").is_empty());
}

#[tokio::test]
async fn test_static_dir_served_as_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Tally</h1>").unwrap();

    let db = Database::in_memory().unwrap();
    let app = create_router(db, dir.path().to_str(), ServerConfig::default());

    let response = get(app.clone(), "/index.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>Tally</h1>");

    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_only_configured_origins() {
    let config = ServerConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
    };
    let app = create_router(Database::in_memory().unwrap(), None, config);

    let request = |origin: &str| {
        Request::builder()
            .uri("/api/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(request("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );

    let response = app.oneshot(request("http://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    let response = get(setup_test_app(), "/api/health").await;
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

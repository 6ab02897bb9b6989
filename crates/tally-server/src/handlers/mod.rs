//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod budgets;
pub mod export;
pub mod insights;
pub mod transactions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use budgets::*;
pub use export::*;
pub use insights::*;
pub use transactions::*;

use axum::{extract::Request, Json};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{AppError, MAX_BODY_SIZE};
use tally_core::models::Category;

/// Query parameter naming the reference date for month-relative views
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// YYYY-MM-DD; defaults to today
    pub date: Option<String>,
}

impl DateQuery {
    /// The reference date, falling back to the local calendar date
    pub fn reference_date(&self) -> Result<NaiveDate, AppError> {
        match self.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| AppError::bad_request("Invalid 'date' format (use YYYY-MM-DD)")),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

/// A money amount sent either as a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn parse(&self) -> Result<f64, AppError> {
        match self {
            AmountInput::Number(n) => Ok(*n),
            AmountInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::bad_request("Amount must be a number")),
        }
    }
}

/// Read and deserialize a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))
}

/// Parse a category name sent by a client
pub(crate) fn parse_category(s: &str) -> Result<Category, AppError> {
    s.parse()
        .map_err(|_| AppError::bad_request(&format!("Invalid category: {}", s)))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/categories - The fixed category list, in display order
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

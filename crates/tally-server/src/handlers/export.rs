//! Export handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use serde::Deserialize;
use tracing::info;

use super::parse_category;
use crate::{AppError, AppState};
use tally_core::db::TransactionFilter;
use tally_core::export::{transactions_to_string, ExportFormat};

/// Query parameters for transaction export
#[derive(Debug, Deserialize)]
pub struct TransactionExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
    /// Only this category
    pub category: Option<String>,
}

fn default_format() -> String {
    "csv".to_string()
}

/// GET /api/export/transactions - Export transactions to CSV or JSON
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionExportQuery>,
) -> Result<Response<Body>, AppError> {
    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|_| AppError::bad_request("Invalid format. Use 'csv' or 'json'"))?;

    let filter = TransactionFilter {
        category: params.category.as_deref().map(parse_category).transpose()?,
        ..Default::default()
    };

    let transactions = state.db.search_transactions(&filter)?;
    let body = transactions_to_string(&transactions, format)?;
    info!("Exported {} transactions to {}", transactions.len(), format);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"transactions.{}\"", format.as_str()),
        )
        .body(Body::from(body))
        .map_err(|e| AppError::internal(&e.to_string()))
}

//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::{parse_category, read_json, AmountInput};
use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use tally_core::db::TransactionFilter;
use tally_core::models::{NewTransaction, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Search query (matches description or category)
    pub search: Option<String>,
    /// Only this category
    pub category: Option<String>,
    pub limit: Option<i64>,
}

/// Request body for creating or replacing a transaction
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: Option<AmountInput>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl TransactionRequest {
    fn into_new_transaction(self) -> Result<NewTransaction, AppError> {
        let (Some(amount), Some(date), Some(description), Some(category)) =
            (self.amount, self.date, self.description, self.category)
        else {
            return Err(AppError::bad_request("Missing required fields"));
        };

        let tx = NewTransaction {
            amount: amount.parse()?,
            date: NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?,
            description,
            category: parse_category(&category)?,
        };
        tx.validate().map_err(AppError::from_core)
    }
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let category = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
        .map(parse_category)
        .transpose()?;

    let filter = TransactionFilter {
        search: params.search,
        category,
        // Input validation: clamp limit
        limit: params.limit.map(|l| l.clamp(1, MAX_PAGE_LIMIT)),
    };

    let transactions = state.db.search_transactions(&filter)?;
    Ok(Json(transactions))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;
    Ok(Json(tx))
}

/// POST /api/transactions - Record a new transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let req: TransactionRequest = read_json(request).await?;
    let new_tx = req.into_new_transaction()?;

    let tx = state.db.create_transaction(&new_tx)?;
    info!(id = tx.id, category = %tx.category, "Created transaction");

    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT /api/transactions/:id - Replace every field of a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: TransactionRequest = read_json(request).await?;
    let new_tx = req.into_new_transaction()?;

    if !state.db.update_transaction(id, &new_tx)? {
        return Err(AppError::not_found(&format!("Transaction {} not found", id)));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_transaction(id)? {
        return Err(AppError::not_found(&format!("Transaction {} not found", id)));
    }

    info!(id, "Deleted transaction");
    Ok(Json(SuccessResponse { success: true }))
}

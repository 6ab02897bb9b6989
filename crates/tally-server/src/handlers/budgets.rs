//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::{parse_category, read_json, AmountInput};
use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{validate_amount, Budget, NewBudget};

/// Request body for creating a budget
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<AmountInput>,
}

/// Request body for updating a budget
///
/// `category` may be repeated but must match the stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<AmountInput>,
}

/// GET /api/budgets - List budgets ordered by category
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(state.db.list_budgets()?))
}

/// GET /api/budgets/:id - Get a single budget
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Budget>, AppError> {
    let budget = state
        .db
        .get_budget(id)?
        .ok_or_else(|| AppError::not_found(&format!("Budget {} not found", id)))?;
    Ok(Json(budget))
}

/// POST /api/budgets - Create a budget (one per category)
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Budget>), AppError> {
    let req: CreateBudgetRequest = read_json(request).await?;
    let (Some(category), Some(amount)) = (req.category, req.amount) else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    let new_budget = NewBudget {
        category: parse_category(&category)?,
        amount: amount.parse()?,
    }
    .validate()
    .map_err(AppError::from_core)?;

    let budget = state
        .db
        .create_budget(&new_budget)
        .map_err(AppError::from_core)?;
    info!(id = budget.id, category = %budget.category, "Created budget");

    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budgets/:id - Change a budget's monthly amount
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let req: UpdateBudgetRequest = read_json(request).await?;
    let amount = req
        .amount
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?
        .parse()?;
    validate_amount(amount).map_err(AppError::from_core)?;

    let existing = state
        .db
        .get_budget(id)?
        .ok_or_else(|| AppError::not_found(&format!("Budget {} not found", id)))?;

    if let Some(category) = req.category.as_deref() {
        if parse_category(category)? != existing.category {
            return Err(AppError::bad_request("Budget category cannot be changed"));
        }
    }

    if !state.db.update_budget(id, amount)? {
        return Err(AppError::not_found(&format!("Budget {} not found", id)));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_budget(id)? {
        return Err(AppError::not_found(&format!("Budget {} not found", id)));
    }

    info!(id, "Deleted budget");
    Ok(Json(SuccessResponse { success: true }))
}

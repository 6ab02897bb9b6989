//! Analytics handlers
//!
//! Every request reads a fresh snapshot of transactions and budgets and runs
//! the aggregation for the requested reference date.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use super::DateQuery;
use crate::{AppError, AppState};
use tally_core::analytics::{
    budget_comparison, category_breakdown, compute_budget_status, filter_by_month,
    group_by_month, total_amount, BudgetComparison, BudgetStatus, CategoryShare,
    DashboardSummary, MonthKey, MonthlyTotal,
};

#[derive(Serialize)]
pub struct CategoryBreakdownResponse {
    pub month: MonthKey,
    pub total: f64,
    pub categories: Vec<CategoryShare>,
}

#[derive(Serialize)]
pub struct BudgetStatusResponse {
    pub month: MonthKey,
    pub statuses: Vec<BudgetStatus>,
    pub comparison: Vec<BudgetComparison>,
}

/// GET /api/analytics/dashboard - Headline figures for the reference month
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let reference = params.reference_date()?;
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    Ok(Json(DashboardSummary::build(
        &transactions,
        &budgets,
        reference,
    )))
}

/// GET /api/analytics/monthly - Spending per month, most recent six, oldest first
pub async fn get_monthly_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MonthlyTotal>>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(group_by_month(&transactions)))
}

/// GET /api/analytics/categories - Category shares for the reference month
pub async fn get_category_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<CategoryBreakdownResponse>, AppError> {
    let month = MonthKey::from_date(params.reference_date()?);
    let transactions = state.db.list_transactions()?;
    let month_transactions = filter_by_month(&transactions, month);

    let categories = category_breakdown(&month_transactions);
    debug!(month = %month, categories = categories.len(), "Category breakdown");

    Ok(Json(CategoryBreakdownResponse {
        month,
        total: total_amount(&month_transactions),
        categories,
    }))
}

/// GET /api/analytics/budgets - Budget status and comparison for the reference month
pub async fn get_budget_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<BudgetStatusResponse>, AppError> {
    let month = MonthKey::from_date(params.reference_date()?);
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    let statuses = compute_budget_status(&filter_by_month(&transactions, month), &budgets);
    let comparison = budget_comparison(&statuses);

    Ok(Json(BudgetStatusResponse {
        month,
        statuses,
        comparison,
    }))
}

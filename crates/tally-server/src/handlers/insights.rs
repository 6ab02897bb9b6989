//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::DateQuery;
use crate::{AppError, AppState};
use tally_core::analytics::{Insight, MonthKey, MonthlySummary, SpendingAnalysis};

#[derive(Serialize)]
pub struct InsightsResponse {
    pub month: MonthKey,
    /// Empty when there is not enough data
    pub insights: Vec<Insight>,
    pub summary: MonthlySummary,
}

/// GET /api/insights - Spending insights for the reference month
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DateQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let reference = params.reference_date()?;
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    let analysis = SpendingAnalysis::build(&transactions, &budgets, reference)
        .map_err(AppError::from_core)?;

    Ok(Json(InsightsResponse {
        month: analysis.current_month,
        insights: analysis.insights,
        summary: analysis.summary,
    }))
}

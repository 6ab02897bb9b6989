//! Bundled views for one reference date
//!
//! [`SpendingAnalysis`] runs the whole aggregation pipeline for a month so the
//! server and CLI render the same numbers. [`DashboardSummary`] is the smaller
//! set of headline figures shown on the dashboard.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{
    compute_budget_status, daily_average, filter_by_month, group_by_category, group_by_month,
    projected_monthly_total, total_amount,
};
use super::insights::{generate_insights, InsightInputs};
use super::types::{BudgetStatus, CategoryTotals, Insight, MonthKey, MonthlyTotal};
use crate::error::Result;
use crate::models::{Budget, Transaction};

/// Number of transactions listed on the dashboard
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// Spending figures for the month containing the reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub total: f64,
    pub transaction_count: usize,
    /// Zero when the month has no transactions
    pub average_transaction: f64,
    /// Per elapsed day, counting the reference day
    pub daily_average: f64,
    /// Daily average times days in the month (linear extrapolation)
    pub projected_total: f64,
    pub day_of_month: u32,
    pub days_in_month: u32,
}

impl MonthlySummary {
    pub fn build(month_transactions: &[Transaction], reference_date: NaiveDate) -> Result<Self> {
        let month = MonthKey::from_date(reference_date);
        let day_of_month = reference_date.day();
        let days_in_month = month.days_in_month();

        let total = total_amount(month_transactions);
        let count = month_transactions.len();
        let average_transaction = if count > 0 {
            total / count as f64
        } else {
            0.0
        };
        let daily = daily_average(month_transactions, day_of_month)?;

        Ok(Self {
            month,
            total,
            transaction_count: count,
            average_transaction,
            daily_average: daily,
            projected_total: projected_monthly_total(daily, days_in_month),
            day_of_month,
            days_in_month,
        })
    }
}

/// Every derived view for one reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub reference_date: NaiveDate,
    pub current_month: MonthKey,
    pub previous_month: MonthKey,
    pub current_month_total: f64,
    pub previous_month_total: f64,
    /// Current month only
    pub category_totals: CategoryTotals,
    /// Current month only
    pub budget_statuses: Vec<BudgetStatus>,
    /// Most recent months across the whole history
    pub monthly_series: Vec<MonthlyTotal>,
    pub summary: MonthlySummary,
    pub insights: Vec<Insight>,
}

impl SpendingAnalysis {
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        reference_date: NaiveDate,
    ) -> Result<Self> {
        let current_month = MonthKey::from_date(reference_date);
        let previous_month = current_month.previous();

        let current = filter_by_month(transactions, current_month);
        let previous = filter_by_month(transactions, previous_month);

        let current_month_total = total_amount(&current);
        let previous_month_total = total_amount(&previous);
        let category_totals = group_by_category(&current);
        let budget_statuses = compute_budget_status(&current, budgets);
        let summary = MonthlySummary::build(&current, reference_date)?;

        let insights = generate_insights(&InsightInputs {
            current_month_total,
            previous_month_total,
            category_totals: &category_totals,
            budget_statuses: &budget_statuses,
            projected_total: summary.projected_total,
        });

        debug!(
            month = %current_month,
            current = current_month_total,
            previous = previous_month_total,
            insights = insights.len(),
            "Built spending analysis"
        );

        Ok(Self {
            reference_date,
            current_month,
            previous_month,
            current_month_total,
            previous_month_total,
            category_totals,
            budget_statuses,
            monthly_series: group_by_month(transactions),
            summary,
            insights,
        })
    }
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub month: MonthKey,
    /// Spent in the reference month
    pub total_expenses: f64,
    /// Sum of every monthly budget
    pub total_budget: f64,
    /// `total_budget - total_expenses`; negative when over
    pub remaining_budget: f64,
    pub over_budget: bool,
    pub transaction_count: usize,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        reference_date: NaiveDate,
    ) -> Self {
        let month = MonthKey::from_date(reference_date);
        let current = filter_by_month(transactions, month);

        let total_expenses = total_amount(&current);
        let total_budget: f64 = budgets.iter().map(|b| b.amount).sum();
        let remaining_budget = total_budget - total_expenses;

        let mut recent = transactions.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_TRANSACTION_COUNT);

        Self {
            month,
            total_expenses,
            total_budget,
            remaining_budget,
            over_budget: remaining_budget < 0.0,
            transaction_count: current.len(),
            recent_transactions: recent,
        }
    }
}

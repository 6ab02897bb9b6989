//! Spending analytics
//!
//! Turns flat snapshots of transactions and budgets into the views the
//! dashboard shows. Nothing in here touches the database or the clock: callers
//! fetch the snapshots and pass an explicit reference date.
//!
//! ## Pieces
//!
//! - [`aggregate`] - category totals, monthly series, budget status, projections
//! - [`insights`] - ordered rules that turn aggregates into observations
//! - [`summary`] - [`SpendingAnalysis`] and [`DashboardSummary`] bundles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::{Database, SpendingAnalysis};
//!
//! let transactions = db.list_transactions()?;
//! let budgets = db.list_budgets()?;
//! let analysis = SpendingAnalysis::build(&transactions, &budgets, today)?;
//! for insight in &analysis.insights {
//!     println!("{}: {}", insight.title, insight.description);
//! }
//! ```

pub mod aggregate;
pub mod insights;
pub mod summary;
pub mod types;

pub use aggregate::{
    budget_comparison, category_breakdown, compute_budget_status, daily_average,
    filter_by_month, group_by_category, group_by_month, group_by_month_all,
    projected_monthly_total, total_amount, BudgetComparison, CategoryShare, MONTHLY_WINDOW,
};
pub use insights::{generate_insights, InsightInputs};
pub use summary::{DashboardSummary, MonthlySummary, SpendingAnalysis};
pub use types::{
    BudgetStatus, BudgetTier, CategoryAmount, CategoryTotals, Insight, InsightKind, MonthKey,
    MonthlyTotal, Severity,
};

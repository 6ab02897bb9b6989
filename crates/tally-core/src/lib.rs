//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance dashboard:
//! - Domain models (transactions, budgets, the fixed category set)
//! - Database access and migrations (the record store)
//! - Spending analytics: category totals, monthly series, budget status,
//!   projections and rule-based insights
//! - Transaction export (CSV, JSON)

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use analytics::{
    BudgetStatus, BudgetTier, CategoryTotals, DashboardSummary, Insight, InsightKind, MonthKey,
    MonthlySummary, MonthlyTotal, Severity, SpendingAnalysis,
};
pub use db::Database;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{Budget, Category, NewBudget, NewTransaction, Transaction};

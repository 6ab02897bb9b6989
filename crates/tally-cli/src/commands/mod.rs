//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget commands (list, add, edit, delete)
//! - `core` - Init, categories and shared utilities (open_db, resolve_date)
//! - `export` - Transaction export
//! - `insights` - Spending insights
//! - `reports` - Dashboard and report commands
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (list, add, edit, delete)

pub mod budgets;
pub mod core;
pub mod export;
pub mod insights;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use export::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar for budget usage, capped at full width
pub fn usage_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

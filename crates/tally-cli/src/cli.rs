//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track spending against your budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal finance dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List the spending categories
    Categories,

    /// Manage transactions (list, add, edit, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (list, add, edit, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show dashboard summary for a month
    Dashboard {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Show spending insights for a month
    Insights {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Only export this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Filter by description or category text
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Record a new expense
    Add {
        /// Amount spent (positive)
        #[arg(short, long)]
        amount: f64,

        /// What the money was spent on
        #[arg(short, long)]
        description: String,

        /// Category (name or short form, e.g. "food")
        #[arg(short, long)]
        category: String,

        /// Transaction date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Replace a transaction's fields (unspecified fields are kept)
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List,

    /// Create a monthly budget for a category
    Add {
        /// Category (name or short form, e.g. "travel")
        #[arg(short, long)]
        category: String,

        /// Monthly cap (positive)
        #[arg(short, long)]
        amount: f64,
    },

    /// Change a budget's monthly amount
    Edit {
        /// Budget ID
        id: i64,

        /// New monthly cap (positive)
        #[arg(short, long)]
        amount: f64,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending per month (most recent six unless --all)
    Monthly {
        /// Show the full history
        #[arg(long)]
        all: bool,
    },

    /// Category breakdown for a month
    Categories {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Budget versus actual for a month
    Budgets {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

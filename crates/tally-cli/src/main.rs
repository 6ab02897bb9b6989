//! Tally CLI - Personal finance dashboard
//!
//! Usage:
//!   tally init                       Initialize database
//!   tally transactions add ...       Record an expense
//!   tally budgets add ...            Set a monthly budget
//!   tally insights --date 2024-03-15 Show spending insights
//!   tally serve --port 3000          Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt, static_dir.as_deref())
                .await
        }
        Commands::Categories => commands::cmd_categories(),
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, 20, None, None),
                Some(TransactionsAction::List {
                    limit,
                    search,
                    category,
                }) => commands::cmd_transactions_list(
                    &db,
                    limit,
                    search.as_deref(),
                    category.as_deref(),
                ),
                Some(TransactionsAction::Add {
                    amount,
                    description,
                    category,
                    date,
                }) => commands::cmd_transactions_add(
                    &db,
                    amount,
                    &description,
                    &category,
                    date.as_deref(),
                ),
                Some(TransactionsAction::Edit {
                    id,
                    amount,
                    description,
                    category,
                    date,
                }) => commands::cmd_transactions_edit(
                    &db,
                    id,
                    amount,
                    description.as_deref(),
                    category.as_deref(),
                    date.as_deref(),
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db),
                Some(BudgetsAction::Add { category, amount }) => {
                    commands::cmd_budgets_add(&db, &category, amount)
                }
                Some(BudgetsAction::Edit { id, amount }) => {
                    commands::cmd_budgets_edit(&db, id, amount)
                }
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, id),
            }
        }
        Commands::Dashboard { date } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let reference = commands::resolve_date(date.as_deref())?;
            commands::cmd_dashboard(&db, reference)
        }
        Commands::Report { report } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match report {
                ReportType::Monthly { all } => commands::cmd_report_monthly(&db, all),
                ReportType::Categories { date } => {
                    let reference = commands::resolve_date(date.as_deref())?;
                    commands::cmd_report_categories(&db, reference)
                }
                ReportType::Budgets { date } => {
                    let reference = commands::resolve_date(date.as_deref())?;
                    commands::cmd_report_budgets(&db, reference)
                }
            }
        }
        Commands::Insights { date, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let reference = commands::resolve_date(date.as_deref())?;
            commands::cmd_insights(&db, reference, json)
        }
        Commands::Export {
            output,
            format,
            category,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, output.as_deref(), &format, category.as_deref())
        }
    }
}

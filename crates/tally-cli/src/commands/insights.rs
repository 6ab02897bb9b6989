//! Insight command implementation

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::analytics::{Severity, SpendingAnalysis};
use tally_core::db::Database;

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️ ",
        Severity::Positive => "🟢",
        Severity::Warning => "🟡",
        Severity::Danger => "🔴",
    }
}

pub fn cmd_insights(db: &Database, reference: NaiveDate, json: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let budgets = db.list_budgets()?;
    let analysis = SpendingAnalysis::build(&transactions, &budgets, reference)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.insights)?);
        return Ok(());
    }

    println!();
    println!("💡 Spending Insights ({})", analysis.current_month.label());
    println!("   ─────────────────────────────────────────────────────────────");

    if analysis.insights.is_empty() {
        println!("   Not enough data yet. Record some transactions and budgets first.");
        return Ok(());
    }

    for insight in &analysis.insights {
        println!(
            "   {} {}",
            severity_icon(insight.severity),
            insight.title
        );
        println!("      {}", insight.description);
    }

    let summary = &analysis.summary;
    println!();
    println!(
        "   This month: ${:.2} over {} transactions (${:.2}/day, projected ${:.2})",
        summary.total, summary.transaction_count, summary.daily_average, summary.projected_total
    );

    Ok(())
}

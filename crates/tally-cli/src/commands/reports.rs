//! Dashboard and report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::analytics::{
    category_breakdown, compute_budget_status, filter_by_month, group_by_month,
    group_by_month_all, total_amount, BudgetTier, DashboardSummary, MonthKey,
};
use tally_core::db::Database;

use super::{truncate, usage_bar};

pub fn cmd_dashboard(db: &Database, reference: NaiveDate) -> Result<()> {
    let transactions = db.list_transactions()?;
    let budgets = db.list_budgets()?;
    let summary = DashboardSummary::build(&transactions, &budgets, reference);

    println!();
    println!("📊 Tally Dashboard ({})", summary.month.label());
    println!("   ─────────────────────────────────────────");
    println!("   Total expenses:   ${:.2}", summary.total_expenses);
    println!("   Total budget:     ${:.2}", summary.total_budget);
    if summary.over_budget {
        println!(
            "   Remaining:        \x1b[31m-${:.2}\x1b[0m (over budget)",
            summary.remaining_budget.abs()
        );
    } else {
        println!(
            "   Remaining:        \x1b[32m${:.2}\x1b[0m",
            summary.remaining_budget
        );
    }
    println!("   Transactions:     {}", summary.transaction_count);

    if !summary.recent_transactions.is_empty() {
        println!();
        println!("📝 Recent Transactions");
        for tx in &summary.recent_transactions {
            println!(
                "   {} │ {:>10} │ {}",
                tx.date,
                format!("${:.2}", tx.amount),
                truncate(&tx.description, 35)
            );
        }
    }

    Ok(())
}

pub fn cmd_report_monthly(db: &Database, all: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let series = if all {
        group_by_month_all(&transactions)
    } else {
        group_by_month(&transactions)
    };

    println!();
    println!("📈 Monthly Spending");
    println!("   ─────────────────────────────────────────");

    if series.is_empty() {
        println!("   No spending recorded yet.");
        return Ok(());
    }

    let max = series.iter().map(|m| m.amount).fold(0.0_f64, f64::max);
    for month in &series {
        let percent = if max > 0.0 {
            month.amount / max * 100.0
        } else {
            0.0
        };
        println!(
            "   {:8} │ {:>10} │ {}",
            month.label,
            format!("${:.2}", month.amount),
            usage_bar(percent, 20)
        );
    }

    Ok(())
}

pub fn cmd_report_categories(db: &Database, reference: NaiveDate) -> Result<()> {
    let month = MonthKey::from_date(reference);
    let transactions = filter_by_month(&db.list_transactions()?, month);
    let mut shares = category_breakdown(&transactions);
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    println!();
    println!("🏷️  Spending by Category ({})", month.label());
    println!("   ─────────────────────────────────────────────────────");

    if shares.is_empty() {
        println!("   No spending found in this month.");
        return Ok(());
    }

    println!("   Total: ${:.2}", total_amount(&transactions));
    println!();
    println!("   {:20} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    for share in &shares {
        println!(
            "   {:20} │ {:>10} │ {:>5.1}%",
            share.category.as_str(),
            format!("${:.2}", share.amount),
            share.percentage
        );
    }

    Ok(())
}

pub fn cmd_report_budgets(db: &Database, reference: NaiveDate) -> Result<()> {
    let month = MonthKey::from_date(reference);
    let budgets = db.list_budgets()?;
    let transactions = filter_by_month(&db.list_transactions()?, month);
    let statuses = compute_budget_status(&transactions, &budgets);

    println!();
    println!("💰 Budget Status ({})", month.label());
    println!("   ─────────────────────────────────────────────────────────────");

    if statuses.is_empty() {
        println!("   No budgets set.");
        return Ok(());
    }

    for status in &statuses {
        let icon = match status.tier {
            BudgetTier::Good => "✅",
            BudgetTier::Warning => "⚠️ ",
            BudgetTier::Over => "🔴",
            BudgetTier::Invalid => "❓",
        };
        println!(
            "   {} {:20} {} {:>6.1}%  ${:.2} of ${:.2} (${:.2} left)",
            icon,
            status.category.as_str(),
            usage_bar(status.percent_used, 20),
            status.percent_used,
            status.spent,
            status.budgeted,
            status.remaining
        );
    }

    Ok(())
}

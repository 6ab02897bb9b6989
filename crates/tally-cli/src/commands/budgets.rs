//! Budget command implementations

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::models::{validate_amount, NewBudget};

use super::parse_category;

pub fn cmd_budgets_list(db: &Database) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set. Create one with:");
        println!("  tally budgets add --category food --amount 400");
        return Ok(());
    }

    let total: f64 = budgets.iter().map(|b| b.amount).sum();

    println!();
    println!("💰 Monthly Budgets");
    println!("   ─────────────────────────────────────────");

    for budget in &budgets {
        println!(
            "   [{:>3}] {:20} │ {:>10}",
            budget.id,
            budget.category.as_str(),
            format!("${:.2}", budget.amount)
        );
    }

    println!("   ─────────────────────────────────────────");
    println!("         {:20} │ {:>10}", "Total", format!("${:.2}", total));

    Ok(())
}

pub fn cmd_budgets_add(db: &Database, category: &str, amount: f64) -> Result<()> {
    let new_budget = NewBudget {
        category: parse_category(category)?,
        amount,
    }
    .validate()?;

    let budget = db
        .create_budget(&new_budget)
        .context("Failed to create budget")?;

    println!(
        "✅ Created budget {}: {} ${:.2}/month",
        budget.id, budget.category, budget.amount
    );

    Ok(())
}

pub fn cmd_budgets_edit(db: &Database, id: i64, amount: f64) -> Result<()> {
    validate_amount(amount)?;

    let budget = db
        .get_budget(id)?
        .ok_or_else(|| anyhow::anyhow!("Budget {} not found", id))?;

    db.update_budget(id, amount)?;

    println!(
        "✅ Updated {} budget: ${:.2} → ${:.2}/month",
        budget.category, budget.amount, amount
    );

    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: i64) -> Result<()> {
    let budget = db
        .get_budget(id)?
        .ok_or_else(|| anyhow::anyhow!("Budget {} not found", id))?;

    db.delete_budget(id)?;

    println!("🗑️  Deleted {} budget", budget.category);

    Ok(())
}

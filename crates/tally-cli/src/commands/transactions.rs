//! Transaction command implementations

use anyhow::{Context, Result};
use tally_core::db::{Database, TransactionFilter};
use tally_core::models::{NewTransaction, Transaction};

use super::{parse_category, resolve_date, truncate};

fn print_transaction_row(tx: &Transaction) {
    println!(
        "   [{:>4}] {} │ {:>10} │ {:17} │ {}",
        tx.id,
        tx.date,
        format!("${:.2}", tx.amount),
        tx.category.as_str(),
        truncate(&tx.description, 35)
    );
}

pub fn cmd_transactions_list(
    db: &Database,
    limit: i64,
    search: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let filter = TransactionFilter {
        search: search.map(String::from),
        category: category.map(parse_category).transpose()?,
        limit: Some(limit.max(1)),
    };
    let transactions = db.search_transactions(&filter)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions add --amount 12.50 --description Lunch --category food");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        print_transaction_row(tx);
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    amount: f64,
    description: &str,
    category: &str,
    date: Option<&str>,
) -> Result<()> {
    let new_tx = NewTransaction {
        amount,
        date: resolve_date(date)?,
        description: description.to_string(),
        category: parse_category(category)?,
    }
    .validate()?;

    let tx = db
        .create_transaction(&new_tx)
        .context("Failed to save transaction")?;

    println!("✅ Recorded transaction {}:", tx.id);
    print_transaction_row(&tx);

    Ok(())
}

pub fn cmd_transactions_edit(
    db: &Database,
    id: i64,
    amount: Option<f64>,
    description: Option<&str>,
    category: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let existing = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    // The store replaces every field, so fill gaps from the current record
    let new_tx = NewTransaction {
        amount: amount.unwrap_or(existing.amount),
        date: match date {
            Some(d) => resolve_date(Some(d))?,
            None => existing.date,
        },
        description: description
            .map(String::from)
            .unwrap_or(existing.description),
        category: match category {
            Some(c) => parse_category(c)?,
            None => existing.category,
        },
    }
    .validate()?;

    db.update_transaction(id, &new_tx)?;

    let updated = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;
    println!("✅ Updated transaction {}:", id);
    print_transaction_row(&updated);

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(id)?;

    println!("🗑️  Deleted transaction {}:", id);
    print_transaction_row(&tx);

    Ok(())
}

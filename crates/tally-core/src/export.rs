//! Transaction export
//!
//! Supports:
//! - CSV with a fixed `id,date,description,category,amount` header
//! - Pretty-printed JSON array of full transaction records

use std::io::Write;

use serde::Serialize;

use crate::db::{Database, TransactionFilter};
use crate::error::Result;
use crate::models::Transaction;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type for HTTP responses
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown export format: {} (expected csv or json)", s)),
        }
    }
}

/// One CSV line
#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    date: String,
    description: &'a str,
    category: &'a str,
    amount: String,
}

/// Write transactions to `writer` in the given format
pub fn write_transactions<W: Write>(
    transactions: &[Transaction],
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for tx in transactions {
                csv_writer.serialize(CsvRow {
                    id: tx.id,
                    date: tx.date.to_string(),
                    description: &tx.description,
                    category: tx.category.as_str(),
                    amount: format!("{:.2}", tx.amount),
                })?;
            }
            // An empty export still gets a header
            if transactions.is_empty() {
                csv_writer.write_record(["id", "date", "description", "category", "amount"])?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, transactions)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Render transactions as a string in the given format
pub fn transactions_to_string(transactions: &[Transaction], format: ExportFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_transactions(transactions, format, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Database {
    /// Export transactions matching a filter, newest first
    pub fn export_transactions<W: Write>(
        &self,
        filter: &TransactionFilter,
        format: ExportFormat,
        writer: W,
    ) -> Result<usize> {
        let transactions = self.search_transactions(filter)?;
        write_transactions(&transactions, format, writer)?;
        Ok(transactions.len())
    }
}

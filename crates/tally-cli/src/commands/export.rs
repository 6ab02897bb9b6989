//! Export command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::{Database, TransactionFilter};
use tally_core::export::ExportFormat;

use super::parse_category;

pub fn cmd_export(
    db: &Database,
    output: Option<&Path>,
    format: &str,
    category: Option<&str>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let filter = TransactionFilter {
        category: category.map(parse_category).transpose()?,
        ..Default::default()
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let count = db.export_transactions(&filter, format, file)?;
            println!(
                "✅ Exported {} transactions to {} ({})",
                count,
                path.display(),
                format
            );
        }
        None => {
            db.export_transactions(&filter, format, std::io::stdout().lock())?;
        }
    }

    Ok(())
}

use anyhow::Context;
use once_cell::sync::OnceCell;
use std::path::Path;

use crate::dashboards::d400_sales_explorer::aggregator::MeasureTotals;
use crate::domain::a001_sales_record::SalesTable;
use crate::shared::format::{format_compact, format_number};

static SALES_TABLE: OnceCell<SalesTable> = OnceCell::new();

/// Load the sales CSV once at startup. The table is read-only afterwards.
pub fn initialize_sales_table(path: &Path) -> anyhow::Result<&'static SalesTable> {
    if let Some(table) = SALES_TABLE.get() {
        tracing::warn!("Sales table already loaded, ignoring {}", path.display());
        return Ok(table);
    }

    tracing::info!("Loading sales data from {}", path.display());
    let table = SalesTable::from_csv_path(path)
        .with_context(|| format!("failed to load sales data from {}", path.display()))?;

    let totals = MeasureTotals::from_records(table.records());
    tracing::info!(
        "Loaded {} records: {} segments, {} sub-categories, periods {} .. {}, ${} total",
        format_number(table.len()),
        table.segments().len(),
        table.sub_categories().len(),
        table.min_period(),
        table.max_period(),
        format_compact(totals.dollars),
    );

    Ok(SALES_TABLE.get_or_init(|| table))
}

/// `None` until `initialize_sales_table` has succeeded.
pub fn get_sales_table() -> Option<&'static SalesTable> {
    SALES_TABLE.get()
}

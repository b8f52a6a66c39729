pub mod clean;
pub mod extract;
pub mod outcome;
pub mod run;
pub mod validate;

// Re-export command functions for convenience
pub use clean::clean;
pub use extract::extract;
pub use outcome::outcome;
pub use run::run;
pub use validate::validate;

use anyhow::{Context, Result};
use std::path::Path;

use potd_pipeline::config::Config;
use potd_pipeline::error::Error;
use potd_pipeline::models::StageStats;
use potd_pipeline::pipeline::report_fatal;
use potd_pipeline::table::Table;

/// Apply command-line overrides to the run configuration
pub fn apply_run_overrides(config: &mut Config, workers: Option<usize>, limit: Option<usize>) {
    if let Some(workers) = workers {
        config.pipeline.workers = workers.max(1);
    }
    if limit.is_some() {
        config.pipeline.limit = limit;
    }
}

pub(crate) fn load_table(path: &Path) -> Result<Table> {
    Table::load_csv(path).with_context(|| format!("Failed to load table: {}", path.display()))
}

pub(crate) fn save_table(table: &Table, path: &Path) -> Result<()> {
    table
        .save_csv(path)
        .with_context(|| format!("Failed to save table: {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.len(), "Saved table");
    Ok(())
}

/// Log a stage failure at error level before it aborts the run
pub(crate) fn fatal<E: Into<Error>>(stage: &str) -> impl FnOnce(E) -> anyhow::Error + '_ {
    move |err| {
        anyhow::Error::new(report_fatal(stage, err.into())).context(format!("{stage} stage aborted"))
    }
}

pub(crate) fn print_stats(stage: &str, stats: &StageStats) {
    println!("{stage}:");
    println!("  Rows in:  {}", stats.rows_in);
    println!("  Rows out: {}", stats.rows_out);
    if stats.dropped() > 0 {
        println!("  Dropped:  {}", stats.dropped());
    }
    if stats.fallbacks > 0 {
        println!("  Fallback records: {}", stats.fallbacks);
    }
}

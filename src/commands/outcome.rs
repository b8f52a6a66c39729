use anyhow::Result;
use std::path::Path;

use potd_pipeline::config::Config;
use potd_pipeline::outcome::OutcomeClassifier;
use potd_pipeline::pipeline::outcome_stage;
use potd_pipeline::table::{columns, Table};

use super::{fatal, load_table, print_stats, save_table};

pub fn outcome(config: &Config, input: &Path, output: &Path) -> Result<()> {
    println!("Classifying outcomes from: {}", input.display());
    println!("================================");

    let table = load_table(input)?;
    let table = outcome_table(config, table)?;

    save_table(&table, output)?;
    println!("\nOutput: {}", output.display());
    Ok(())
}

pub(crate) fn outcome_table(config: &Config, table: Table) -> Result<Table> {
    let classifier = OutcomeClassifier::with_glyphs(config.glyphs.clone());
    let (table, stats) =
        outcome_stage(table, &classifier, config.pipeline.limit).map_err(fatal("outcome"))?;

    print_stats("Outcome", &stats);
    print_outcome_counts(&table);
    Ok(table)
}

fn print_outcome_counts(table: &Table) {
    let Ok(results) = table.column(columns::RESULT) else {
        return;
    };
    let count = |label: &str| results.iter().filter(|r| **r == label).count();

    println!("  Win:  {}", count("Win"));
    println!("  Loss: {}", count("Loss"));
    println!("  Push: {}", count("Push"));
}

use anyhow::{Context, Result};
use std::path::Path;

use potd_pipeline::config::Config;
use potd_pipeline::pipeline::{clean_stage, validate_stage};

use super::extract::{extract_table, save_extracted};
use super::outcome::outcome_table;
use super::{fatal, load_table, print_stats, save_table};

/// Run every stage in order, writing each stage's table into `out_dir`
pub async fn run(config: &Config, input: &Path, out_dir: &Path) -> Result<()> {
    println!("Running pick pipeline on: {}", input.display());
    println!("================================");

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let raw = load_table(input)?;

    let (cleaned, stats) = clean_stage(raw, config.cleaning.min_comment_length, &config.glyphs)
        .map_err(fatal("clean"))?;
    print_stats("Clean", &stats);
    save_table(&cleaned, &out_dir.join("cleaned.csv"))?;

    let identified = extract_table(config, cleaned).await?;
    save_extracted(&identified, &out_dir.join("identified.csv"))?;

    let (validated, stats) = validate_stage(identified).map_err(fatal("validate"))?;
    print_stats("Validate", &stats);
    save_table(&validated, &out_dir.join("validated.csv"))?;

    let results = outcome_table(config, validated)?;
    save_table(&results, &out_dir.join("results.csv"))?;

    println!("\nOutputs written to: {}", out_dir.display());
    Ok(())
}

use anyhow::Result;
use std::path::Path;

use potd_pipeline::config::Config;
use potd_pipeline::pipeline::clean_stage;

use super::{fatal, load_table, print_stats, save_table};

pub fn clean(config: &Config, input: &Path, output: &Path, jsonl: bool) -> Result<()> {
    println!("Cleaning comments from: {}", input.display());
    println!("================================");

    let table = load_table(input)?;
    let (table, stats) = clean_stage(table, config.cleaning.min_comment_length, &config.glyphs)
        .map_err(fatal("clean"))?;

    save_table(&table, output)?;
    if jsonl {
        let path = output.with_extension("jsonl");
        table.save_jsonl(&path)?;
        tracing::info!(path = %path.display(), "Saved JSONL copy");
    }

    print_stats("Clean", &stats);
    println!("\nOutput: {}", output.display());
    Ok(())
}

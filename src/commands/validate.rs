use anyhow::Result;
use std::path::Path;

use potd_pipeline::pipeline::validate_stage;

use super::{fatal, load_table, print_stats, save_table};

pub fn validate(input: &Path, output: &Path) -> Result<()> {
    println!("Validating picks from: {}", input.display());
    println!("================================");

    let table = load_table(input)?;
    let (table, stats) = validate_stage(table).map_err(fatal("validate"))?;

    save_table(&table, output)?;
    print_stats("Validate", &stats);
    println!("\nOutput: {}", output.display());
    Ok(())
}

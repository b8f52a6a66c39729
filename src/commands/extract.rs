use anyhow::Result;
use std::path::Path;

use potd_pipeline::config::Config;
use potd_pipeline::llm::LlmClient;
use potd_pipeline::pipeline::extract_stage;
use potd_pipeline::table::Table;

use super::{fatal, load_table, print_stats, save_table};

pub async fn extract(config: &Config, input: &Path, output: &Path) -> Result<()> {
    println!("Extracting picks from: {}", input.display());
    println!("================================");

    let table = load_table(input)?;
    let table = extract_table(config, table).await?;

    save_extracted(&table, output)?;
    println!("\nOutput: {}", output.display());
    Ok(())
}

/// Run the extraction stage against the configured backend
pub(crate) async fn extract_table(config: &Config, table: Table) -> Result<Table> {
    let client = LlmClient::with_config(config.llm.clone()).map_err(fatal("extract"))?;

    if client.is_available().await {
        tracing::info!(endpoint = %config.llm.endpoint, model = %config.llm.model, "LLM backend reachable");
    } else {
        // Every record will fall back, but the run still completes
        tracing::warn!(
            endpoint = %config.llm.endpoint,
            "LLM backend not reachable, extraction will produce fallback records"
        );
    }

    println!("Model:   {}", config.llm.model);
    println!("Workers: {}", config.pipeline.workers);
    if let Some(limit) = config.pipeline.limit {
        println!("Limit:   {limit}");
    }

    let (table, stats) = extract_stage(table, &client, config.pipeline.clone())
        .await
        .map_err(fatal("extract"))?;

    print_stats("Extract", &stats);
    Ok(table)
}

/// Persist the extracted table as CSV plus JSON and JSONL copies
pub(crate) fn save_extracted(table: &Table, output: &Path) -> Result<()> {
    save_table(table, output)?;

    let json = output.with_extension("json");
    table.save_json(&json)?;
    let jsonl = output.with_extension("jsonl");
    table.save_jsonl(&jsonl)?;
    tracing::info!(json = %json.display(), jsonl = %jsonl.display(), "Saved JSON copies");
    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use potd_pipeline::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "potd",
    version,
    about = "Extract structured betting picks from forum comments and track their outcomes",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file; environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw comment scrape
    Clean {
        /// Raw scrape CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Cleaned CSV output
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a JSONL copy next to the CSV
        #[arg(long, default_value = "false")]
        jsonl: bool,
    },

    /// Extract picks from cleaned comments with the language model
    Extract {
        /// Cleaned CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV; JSON and JSONL copies are written alongside
        #[arg(short, long)]
        output: PathBuf,

        /// Concurrent extractions
        #[arg(short, long)]
        workers: Option<usize>,

        /// Process only the first N comments
        #[arg(short, long)]
        limit: Option<usize>,

        /// Model identifier
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Drop unusable picks and normalize odds and units
    Validate {
        /// Extracted CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Validated CSV output
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Classify reported outcomes and link previous-pick results
    Outcome {
        /// Chronological comment CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Annotated CSV output
        #[arg(short, long)]
        output: PathBuf,

        /// Process only the first N rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run every stage, persisting each stage's table
    Run {
        /// Raw scrape CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for stage outputs
        #[arg(long)]
        out_dir: PathBuf,

        /// Concurrent extractions
        #[arg(short, long)]
        workers: Option<usize>,

        /// Process only the first N comments
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
        config.validate()?;
    }
    if config.logging.format == "json" {
        // Keep stderr line-delimited JSON
        config.pipeline.show_progress = false;
    }

    // Initialize tracing/logging
    setup_tracing(&config, cli.verbose)?;

    tracing::info!("potd pipeline starting");

    match cli.command {
        Commands::Clean {
            input,
            output,
            jsonl,
        } => {
            tracing::info!(input = %input.display(), output = %output.display(), "Starting clean command");
            commands::clean(&config, &input, &output, jsonl)?;
        }

        Commands::Extract {
            input,
            output,
            workers,
            limit,
            model,
        } => {
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                workers = ?workers,
                limit = ?limit,
                "Starting extract command"
            );
            commands::apply_run_overrides(&mut config, workers, limit);
            if let Some(model) = model {
                config.llm.model = model;
            }
            commands::extract(&config, &input, &output).await?;
        }

        Commands::Validate { input, output } => {
            tracing::info!(input = %input.display(), output = %output.display(), "Starting validate command");
            commands::validate(&input, &output)?;
        }

        Commands::Outcome {
            input,
            output,
            limit,
        } => {
            tracing::info!(input = %input.display(), output = %output.display(), "Starting outcome command");
            commands::apply_run_overrides(&mut config, None, limit);
            commands::outcome(&config, &input, &output)?;
        }

        Commands::Run {
            input,
            out_dir,
            workers,
            limit,
        } => {
            tracing::info!(input = %input.display(), out_dir = %out_dir.display(), "Starting run command");
            commands::apply_run_overrides(&mut config, workers, limit);
            commands::run(&config, &input, &out_dir).await?;
        }
    }

    tracing::info!("potd pipeline completed successfully");
    Ok(())
}

fn setup_tracing(config: &Config, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("potd_pipeline=debug,potd=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level))
    };

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

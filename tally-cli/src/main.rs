use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally::aggregations::AggregationPolicy;
use tally::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Tally CLI - bucket aggregation over record files")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.tally/config.toml)
    #[arg(long, env = "TALLY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a widget request's bucket pipeline and print labels and series as JSON
    Run {
        /// Records file (JSON array or .jsonl)
        #[arg(short, long)]
        records: PathBuf,

        /// Request file with buckets and metrics (.json or .toml)
        #[arg(short = 'q', long)]
        request: PathBuf,

        /// Print the full pipeline result including bucket members
        #[arg(long)]
        full: bool,
    },

    /// Compute a KPI value and trend for one metric
    Kpi {
        /// Records file (JSON array or .jsonl)
        #[arg(short, long)]
        records: PathBuf,

        /// Metric field
        #[arg(short, long)]
        field: String,

        /// Aggregation: sum, average, min, max, count, none
        #[arg(short, long, default_value = "sum")]
        aggregation: String,

        /// Date field used to order records for the trend
        #[arg(long)]
        date_field: Option<String>,
    },

    /// Check a request file for configuration errors
    Validate {
        /// Request file (.json or .toml)
        #[arg(short = 'q', long)]
        request: PathBuf,
    },
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let json = config.logging.format == "json";

    match &config.logging.file {
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        None => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_or_create(path)?,
        None => Config::load()?,
    };
    init_logging(&config)?;

    let options = config.engine.options()?;
    tracing::debug!(locale = %config.engine.locale, "Engine options loaded");

    match cli.command {
        Commands::Run {
            records,
            request,
            full,
        } => {
            commands::run_pipeline(&records, &request, options, full)?;
        }
        Commands::Kpi {
            records,
            field,
            aggregation,
            date_field,
        } => {
            let policy = AggregationPolicy::parse(&aggregation);
            commands::run_kpi(&records, &field, policy, date_field.as_deref())?;
        }
        Commands::Validate { request } => {
            commands::run_validate(&request)?;
        }
    }

    Ok(())
}

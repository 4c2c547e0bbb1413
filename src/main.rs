//! CLI entry point for the quote matrix tool.
//!
//! Provides subcommands for processing scraped flight and shipping quote
//! documents into regional cost matrices and composing them into the dense
//! view served to the dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use quote_matrix::cache::MatrixCache;
use quote_matrix::currency::CostDomain;
use quote_matrix::fetch::{BasicClient, fetch_bytes};
use quote_matrix::matrix::{self, builder::build_legacy_matrix, evidence::EvidenceSampler, generator};
use quote_matrix::output::{append_legacy_csv, log_run_summary, write_json};
use quote_matrix::parser::{parse_flight_document, parse_shipping_document};
use quote_matrix::quotes::Quote;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "quote_matrix")]
#[command(about = "Aggregates scraped price quotes into a regional cost matrix", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a flight quote document into a processed matrix
    ProcessFlights {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file for the full evidence-backed matrix
        #[arg(short, long, default_value = "flight_matrix.json")]
        output: String,

        /// JSON file for the flattened average-only matrix
        #[arg(long, default_value = "flight_matrix_legacy.json")]
        legacy_output: String,

        /// Optional CSV file to append legacy rows to
        #[arg(long)]
        legacy_csv: Option<String>,

        /// Seed for reproducible evidence selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Process a shipping rate document into a processed matrix
    ProcessShipping {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file for the full evidence-backed matrix
        #[arg(short, long, default_value = "shipping_matrix.json")]
        output: String,

        /// JSON file for the flattened average-only matrix
        #[arg(long, default_value = "shipping_matrix_legacy.json")]
        legacy_output: String,

        /// Optional CSV file to append legacy rows to
        #[arg(long)]
        legacy_csv: Option<String>,

        /// Seed for reproducible evidence selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compose flight and shipping documents into the dense cost matrix view
    Compose {
        /// Flight quote document (path or URL)
        #[arg(long)]
        flights: String,

        /// Shipping quote document (path or URL)
        #[arg(long)]
        shipping: String,

        /// JSON file for the composed response
        #[arg(short, long, default_value = "cost_matrix.json")]
        output: String,

        /// Seed for reproducible evidence selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quote_matrix.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quote_matrix.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ProcessFlights {
            source,
            output,
            legacy_output,
            legacy_csv,
            seed,
        } => {
            let bytes = fetcher(&source).await?;
            let doc = parse_flight_document(&bytes)?;
            let quotes: Vec<Quote> = doc.flight_quotes.into_iter().map(Quote::from).collect();
            info!(
                total = doc.total_quotes,
                parsed = quotes.len(),
                "Flight quote document loaded"
            );

            let mut sampler = make_sampler(seed);
            let (matrix, drops) =
                matrix::process_quotes(&quotes, CostDomain::Flights, &mut sampler);
            let legacy = build_legacy_matrix(&matrix);

            log_run_summary(&matrix, &drops, quotes.len());
            write_json(&output, &matrix)?;
            write_json(&legacy_output, &legacy)?;
            if let Some(path) = legacy_csv {
                append_legacy_csv(&path, &legacy)?;
            }
        }
        Commands::ProcessShipping {
            source,
            output,
            legacy_output,
            legacy_csv,
            seed,
        } => {
            let bytes = fetcher(&source).await?;
            let records = parse_shipping_document(&bytes)?;
            let quotes: Vec<Quote> = records.into_iter().map(Quote::from).collect();
            info!(parsed = quotes.len(), "Shipping quote document loaded");

            let mut sampler = make_sampler(seed);
            let (matrix, drops) =
                matrix::process_quotes(&quotes, CostDomain::Shipping, &mut sampler);
            let legacy = build_legacy_matrix(&matrix);

            log_run_summary(&matrix, &drops, quotes.len());
            write_json(&output, &matrix)?;
            write_json(&legacy_output, &legacy)?;
            if let Some(path) = legacy_csv {
                append_legacy_csv(&path, &legacy)?;
            }
        }
        Commands::Compose {
            flights,
            shipping,
            output,
            seed,
        } => {
            let cache = MatrixCache::new();
            let response = cache
                .get_or_load(|| async {
                    let flight_bytes = fetcher(&flights).await?;
                    let shipping_bytes = fetcher(&shipping).await?;

                    let flight_doc = parse_flight_document(&flight_bytes)?;
                    let shipping_records = parse_shipping_document(&shipping_bytes)?;

                    let flight_quotes: Vec<Quote> =
                        flight_doc.flight_quotes.into_iter().map(Quote::from).collect();
                    let shipping_quotes: Vec<Quote> =
                        shipping_records.into_iter().map(Quote::from).collect();

                    let mut sampler = make_sampler(seed);
                    let (flight_matrix, flight_drops) = matrix::process_quotes(
                        &flight_quotes,
                        CostDomain::Flights,
                        &mut sampler,
                    );
                    let (shipping_matrix, shipping_drops) = matrix::process_quotes(
                        &shipping_quotes,
                        CostDomain::Shipping,
                        &mut sampler,
                    );

                    log_run_summary(&flight_matrix, &flight_drops, flight_quotes.len());
                    log_run_summary(&shipping_matrix, &shipping_drops, shipping_quotes.len());

                    Ok(generator::generate_cost_matrix(&flight_matrix, &shipping_matrix))
                })
                .await?;

            write_json(&output, response.as_ref())?;
        }
    }

    Ok(())
}

fn make_sampler(seed: Option<u64>) -> EvidenceSampler {
    match seed {
        Some(seed) => EvidenceSampler::with_seed(seed),
        None => EvidenceSampler::new(),
    }
}

/// Loads a quote document from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    Ok(bytes)
}

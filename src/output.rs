//! Output formatting and persistence for processed matrices.
//!
//! Supports pretty-printed JSON export, legacy CSV append, and a per-run
//! summary logged for operators.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::matrix::types::{DropStats, LegacyMatrix, ProcessedMatrix};

/// Writes a serializable output as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body)?;
    info!(path, "Wrote JSON output");
    Ok(())
}

#[derive(Serialize)]
struct LegacyRow<'a> {
    origin: &'a str,
    destination: &'a str,
    category: &'a str,
    average_usd: i64,
}

/// Appends the legacy matrix as CSV rows (origin, destination, category,
/// average_usd).
///
/// Creates the file with headers if it does not already exist.
pub fn append_legacy_csv(path: &str, legacy: &LegacyMatrix) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending legacy CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for (origin, dests) in &legacy.cells {
        for (destination, cats) in dests {
            for (category, average_usd) in cats {
                writer.serialize(LegacyRow {
                    origin: origin.label(),
                    destination: destination.label(),
                    category: category.label(),
                    average_usd: *average_usd,
                })?;
            }
        }
    }
    writer.flush()?;

    Ok(())
}

/// Logs a summary of one processing run: bucket coverage, evidence and
/// screenshot counts, price range, and rows dropped before aggregation.
pub fn log_run_summary(matrix: &ProcessedMatrix, drops: &DropStats, total_quotes: usize) {
    let mut samples = 0usize;
    let mut evidence = 0usize;
    let mut screenshot_evidence = 0usize;
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;

    for dests in matrix.cells.values() {
        for cats in dests.values() {
            for result in cats.values() {
                samples += result.sample_count;
                evidence += result.evidence.len();
                screenshot_evidence += result
                    .evidence
                    .iter()
                    .filter(|e| e.screenshot_url.is_some())
                    .count();
                min_price = min_price.min(result.min_price);
                max_price = max_price.max(result.max_price);
            }
        }
    }

    info!(
        total_quotes,
        surviving = samples,
        buckets = matrix.bucket_count(),
        evidence,
        screenshot_evidence,
        "Processing run summary"
    );

    if samples > 0 {
        info!(min_price, max_price, "Normalized price range");
    }

    if drops.total() > 0 {
        info!(
            unmapped_origin = drops.unmapped_origin,
            unmapped_destination = drops.unmapped_destination,
            unmapped_category = drops.unmapped_category,
            missing_price = drops.missing_price,
            "Rows dropped before aggregation"
        );
    }
}

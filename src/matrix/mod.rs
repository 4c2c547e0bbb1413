//! Quote aggregation into the regional cost matrix.
//!
//! This module buckets normalized quotes by (origin region, destination
//! region, category), computes per-bucket statistics with bounded evidence
//! samples, and folds the results into the nested matrix structures served
//! to the display layer.

pub mod aggregate;
pub mod builder;
pub mod evidence;
pub mod generator;
pub mod types;

use tracing::info;

use crate::currency::CostDomain;
use crate::quotes::Quote;

use evidence::EvidenceSampler;
use types::{DropStats, ProcessedMatrix};

/// Runs the full aggregation pipeline over an in-memory quote list.
///
/// Returns the processed matrix and the per-reason counts of rows dropped
/// before aggregation.
#[tracing::instrument(skip(quotes, sampler), fields(quotes = quotes.len(), domain = ?domain))]
pub fn process_quotes(
    quotes: &[Quote],
    domain: CostDomain,
    sampler: &mut EvidenceSampler,
) -> (ProcessedMatrix, DropStats) {
    let (results, drops) = aggregate::aggregate_quotes(quotes, domain, sampler);
    let buckets = results.len();
    let matrix = builder::build_matrix(results);

    info!(
        buckets,
        surviving = quotes.len() - drops.total(),
        dropped = drops.total(),
        "Aggregation complete"
    );

    (matrix, drops)
}

//! Data types used by the aggregation pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapping::{Category, Region};
use crate::quotes::Quote;

/// Composite key identifying one cell of the matrix. At most one
/// [`AggregationResult`] exists per key within a processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub origin: Region,
    pub destination: Region,
    pub category: Category,
}

/// A quote that survived mapping, with its price converted to USD.
#[derive(Debug, Clone)]
pub struct NormalizedQuote {
    pub quote: Quote,
    pub raw_price: f64,
    pub price_usd: f64,
}

/// One audit sample attached to an aggregation result. Carries the raw
/// price alongside the normalized one so a viewer can cross-check the
/// conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceQuote {
    pub origin_city: String,
    pub destination_city: String,
    /// Airline code for flights, carrier/container type for shipping.
    pub label: String,
    pub raw_price: f64,
    pub raw_currency: String,
    pub price_usd: f64,
    pub captured_at: String,
    pub source: String,
    pub screenshot_url: Option<String>,
    pub link: String,
}

impl From<&NormalizedQuote> for EvidenceQuote {
    fn from(m: &NormalizedQuote) -> Self {
        EvidenceQuote {
            origin_city: m.quote.origin_city.clone(),
            destination_city: m.quote.destination_city.clone(),
            label: m.quote.label.clone(),
            raw_price: m.raw_price,
            raw_currency: m.quote.currency.clone(),
            price_usd: m.price_usd,
            captured_at: m.quote.captured_at.clone(),
            source: m.quote.source.clone(),
            screenshot_url: m.quote.screenshot_url.clone(),
            link: m.quote.link.clone(),
        }
    }
}

/// Statistics and evidence for one non-empty bucket.
///
/// Invariant: `min_price <= average_price_usd <= max_price` whenever
/// `sample_count > 0`, and results are never built for empty buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Rounded to the nearest whole USD.
    pub average_price_usd: i64,
    pub min_price: f64,
    pub max_price: f64,
    /// Total quotes in the bucket, independent of evidence length.
    pub sample_count: usize,
    /// 0..=10 quotes, screenshot-backed entries first.
    pub evidence: Vec<EvidenceQuote>,
}

/// Nested origin → destination → category map shared by all matrix shapes.
pub type MatrixCells<T> = BTreeMap<Region, BTreeMap<Region, BTreeMap<Category, T>>>;

/// The full evidence-backed matrix for one cost domain, built fresh per
/// processing run.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessedMatrix {
    pub generated_at: DateTime<Utc>,
    pub cells: MatrixCells<AggregationResult>,
}

impl ProcessedMatrix {
    pub fn get(
        &self,
        origin: Region,
        destination: Region,
        category: Category,
    ) -> Option<&AggregationResult> {
        self.cells.get(&origin)?.get(&destination)?.get(&category)
    }

    /// Number of non-empty buckets in the matrix.
    pub fn bucket_count(&self) -> usize {
        self.cells
            .values()
            .flat_map(|dests| dests.values())
            .map(|cats| cats.len())
            .sum()
    }
}

/// Flattened average-only view for consumers that need no evidence or min/max.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LegacyMatrix {
    pub cells: MatrixCells<i64>,
}

impl LegacyMatrix {
    pub fn get(&self, origin: Region, destination: Region, category: Category) -> Option<i64> {
        self.cells
            .get(&origin)?
            .get(&destination)?
            .get(&category)
            .copied()
    }
}

/// Rows excluded before aggregation, by reason. Individual drops are silent;
/// these counts are logged once per run so operators can see volume lost to
/// unsupported labels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropStats {
    pub unmapped_origin: usize,
    pub unmapped_destination: usize,
    pub unmapped_category: usize,
    pub missing_price: usize,
}

impl DropStats {
    pub fn total(&self) -> usize {
        self.unmapped_origin + self.unmapped_destination + self.unmapped_category
            + self.missing_price
    }
}

/// Sentinel cell value meaning "no evidence-backed data exists", never an
/// actual zero cost.
pub const NO_DATA: f64 = 0.0;

/// Dense per-cost-type view covering every region pair and category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CostMatrixView {
    pub cells: MatrixCells<f64>,
}

impl CostMatrixView {
    pub fn get(&self, origin: Region, destination: Region, category: Category) -> f64 {
        self.cells
            .get(&origin)
            .and_then(|dests| dests.get(&destination))
            .and_then(|cats| cats.get(&category))
            .copied()
            .unwrap_or(NO_DATA)
    }

    /// Whether the cell holds real data rather than the no-data sentinel.
    pub fn has_data(&self, origin: Region, destination: Region, category: Category) -> bool {
        self.get(origin, destination, category) != NO_DATA
    }
}

/// Composition of all cost types consumed by the display layer, keyed by
/// cost type name ("flights", "shipping", "accommodation").
#[derive(Debug, Serialize, Deserialize)]
pub struct CostMatrixResponse {
    pub generated_at: DateTime<Utc>,
    pub costs: BTreeMap<String, CostMatrixView>,
}

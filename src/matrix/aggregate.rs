//! Buckets normalized quotes and computes per-bucket statistics.

use std::collections::{BTreeMap, HashMap};

use crate::currency::{CostDomain, to_usd};
use crate::mapping::{map_category, map_region};
use crate::quotes::Quote;

use super::evidence::EvidenceSampler;
use super::types::{AggregationResult, BucketKey, DropStats, NormalizedQuote};

/// Partitions quotes into buckets by (origin, destination, category) and
/// summarizes each one.
///
/// Quotes whose region or category labels fail to map, or which carry no
/// price, are excluded and counted in [`DropStats`]. Buckets are only
/// created by inserting a surviving quote, so empty buckets never exist.
pub fn aggregate_quotes(
    quotes: &[Quote],
    domain: CostDomain,
    sampler: &mut EvidenceSampler,
) -> (HashMap<BucketKey, AggregationResult>, DropStats) {
    let mut drops = DropStats::default();
    // Ordered so evidence sampling consumes the RNG in a stable sequence;
    // a fixed seed then reproduces the whole run.
    let mut buckets: BTreeMap<BucketKey, Vec<NormalizedQuote>> = BTreeMap::new();

    for quote in quotes {
        let Some(raw_price) = quote.price else {
            drops.missing_price += 1;
            continue;
        };
        let Some(origin) = map_region(&quote.origin_region) else {
            drops.unmapped_origin += 1;
            continue;
        };
        let Some(destination) = map_region(&quote.destination_region) else {
            drops.unmapped_destination += 1;
            continue;
        };
        let Some(category) = map_category(&quote.category, domain) else {
            drops.unmapped_category += 1;
            continue;
        };

        let price_usd = to_usd(raw_price, &quote.currency, domain);
        buckets
            .entry(BucketKey {
                origin,
                destination,
                category,
            })
            .or_default()
            .push(NormalizedQuote {
                quote: quote.clone(),
                raw_price,
                price_usd,
            });
    }

    let mut results = HashMap::with_capacity(buckets.len());
    for (key, members) in buckets {
        results.insert(key, summarize_bucket(&members, sampler));
    }

    (results, drops)
}

/// Summarizes one non-empty bucket: count, rounded mean, min, max, evidence.
fn summarize_bucket(
    members: &[NormalizedQuote],
    sampler: &mut EvidenceSampler,
) -> AggregationResult {
    let prices: Vec<f64> = members.iter().map(|m| m.price_usd).collect();

    AggregationResult {
        average_price_usd: mean(&prices).round() as i64,
        min_price: prices.iter().copied().fold(f64::INFINITY, f64::min),
        max_price: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        sample_count: members.len(),
        evidence: sampler.sample(members),
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

//! Folds per-bucket results into the nested matrix structures.
//!
//! Building is a pure function of the aggregation results; no currency or
//! category logic happens here.

use std::collections::HashMap;

use chrono::Utc;

use super::types::{AggregationResult, BucketKey, LegacyMatrix, MatrixCells, ProcessedMatrix};

/// Builds the nested origin → destination → category matrix.
pub fn build_matrix(results: HashMap<BucketKey, AggregationResult>) -> ProcessedMatrix {
    let mut cells: MatrixCells<AggregationResult> = MatrixCells::new();

    for (key, result) in results {
        cells
            .entry(key.origin)
            .or_default()
            .entry(key.destination)
            .or_default()
            .insert(key.category, result);
    }

    ProcessedMatrix {
        generated_at: Utc::now(),
        cells,
    }
}

/// Flattens a processed matrix into the average-only legacy view.
pub fn build_legacy_matrix(matrix: &ProcessedMatrix) -> LegacyMatrix {
    let mut legacy = LegacyMatrix::default();

    for (origin, dests) in &matrix.cells {
        for (destination, cats) in dests {
            for (category, result) in cats {
                legacy
                    .cells
                    .entry(*origin)
                    .or_default()
                    .entry(*destination)
                    .or_default()
                    .insert(*category, result.average_price_usd);
            }
        }
    }

    legacy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Category, Region};

    fn result(average: i64, count: usize) -> AggregationResult {
        AggregationResult {
            average_price_usd: average,
            min_price: average as f64 - 50.0,
            max_price: average as f64 + 50.0,
            sample_count: count,
            evidence: vec![],
        }
    }

    fn key(origin: Region, destination: Region, category: Category) -> BucketKey {
        BucketKey {
            origin,
            destination,
            category,
        }
    }

    #[test]
    fn test_build_matrix_nests_by_key() {
        let mut results = HashMap::new();
        results.insert(
            key(Region::NorthAmerica, Region::Emea, Category::Single),
            result(400, 3),
        );
        results.insert(
            key(Region::NorthAmerica, Region::Emea, Category::Couple),
            result(750, 2),
        );
        results.insert(
            key(Region::Apac, Region::India, Category::Single),
            result(250, 1),
        );

        let matrix = build_matrix(results);

        assert_eq!(matrix.bucket_count(), 3);
        assert_eq!(
            matrix
                .get(Region::NorthAmerica, Region::Emea, Category::Single)
                .unwrap()
                .average_price_usd,
            400
        );
        assert!(
            matrix
                .get(Region::Emea, Region::NorthAmerica, Category::Single)
                .is_none()
        );
    }

    #[test]
    fn test_build_matrix_empty_results() {
        let matrix = build_matrix(HashMap::new());
        assert_eq!(matrix.bucket_count(), 0);
        assert!(matrix.cells.is_empty());
    }

    #[test]
    fn test_legacy_matrix_keeps_only_averages() {
        let mut results = HashMap::new();
        results.insert(
            key(Region::NorthAmerica, Region::Emea, Category::Single),
            result(400, 3),
        );
        let matrix = build_matrix(results);

        let legacy = build_legacy_matrix(&matrix);

        assert_eq!(
            legacy.get(Region::NorthAmerica, Region::Emea, Category::Single),
            Some(400)
        );
        assert_eq!(
            legacy.get(Region::NorthAmerica, Region::Emea, Category::Couple),
            None
        );
    }

    #[test]
    fn test_legacy_matrix_covers_every_bucket() {
        let mut results = HashMap::new();
        for (i, origin) in Region::ALL.iter().enumerate() {
            results.insert(
                key(*origin, Region::Emea, Category::Single),
                result(100 * (i as i64 + 1), 1),
            );
        }
        let matrix = build_matrix(results);

        let legacy = build_legacy_matrix(&matrix);

        for origin in Region::ALL {
            assert!(legacy.get(origin, Region::Emea, Category::Single).is_some());
        }
    }
}

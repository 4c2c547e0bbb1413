//! Dense cost-matrix composition for the display layer.
//!
//! Produces a view with a value for every (origin, destination, category)
//! triple, whether or not a bucket exists. Cells with no backing data hold
//! the zero sentinel, which downstream renders as "No Data", never as a
//! free price.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::mapping::{CONTAINER_CATEGORIES, Category, FLIGHT_CATEGORIES, Region};

use super::types::{CostMatrixResponse, CostMatrixView, MatrixCells, NO_DATA, ProcessedMatrix};

/// Static nightly accommodation cost per destination region, in USD.
/// Not evidence-backed; feeds only the placeholder cost type.
static ACCOMMODATION_BASE_USD: &[(Region, f64)] = &[
    (Region::NorthAmerica, 180.0),
    (Region::Latam, 90.0),
    (Region::Emea, 150.0),
    (Region::Apac, 120.0),
    (Region::India, 60.0),
];

/// Family-size multiplier applied to the placeholder base cost.
fn occupancy_multiplier(category: Category) -> f64 {
    match category {
        Category::Single => 1.0,
        Category::Couple => 1.4,
        Category::CouplePlusOne => 1.7,
        Category::CouplePlusTwo => 2.0,
        Category::Container20 | Category::Container40 => 1.0,
    }
}

/// Where a cost type's cell values come from.
pub enum CostSource<'a> {
    /// Evidence-backed averages from a processed matrix.
    Aggregated(&'a ProcessedMatrix),
    /// Static per-region table scaled by the occupancy multiplier.
    Placeholder,
}

/// Produces a dense view over every region pair and category.
pub fn dense_view(
    regions: &[Region],
    categories: &[Category],
    source: &CostSource<'_>,
) -> CostMatrixView {
    let mut cells: MatrixCells<f64> = MatrixCells::new();

    for &origin in regions {
        for &destination in regions {
            for &category in categories {
                let value = match source {
                    CostSource::Aggregated(matrix) => matrix
                        .get(origin, destination, category)
                        .map(|r| r.average_price_usd as f64)
                        .unwrap_or(NO_DATA),
                    CostSource::Placeholder => placeholder_cost(destination, category),
                };

                cells
                    .entry(origin)
                    .or_default()
                    .entry(destination)
                    .or_default()
                    .insert(category, value);
            }
        }
    }

    CostMatrixView { cells }
}

fn placeholder_cost(destination: Region, category: Category) -> f64 {
    let base = ACCOMMODATION_BASE_USD
        .iter()
        .find(|(region, _)| *region == destination)
        .map(|(_, cost)| *cost)
        .unwrap_or(NO_DATA);

    (base * occupancy_multiplier(category)).round()
}

/// Composes the flight, shipping, and accommodation views into the single
/// response consumed by the display layer.
pub fn generate_cost_matrix(
    flights: &ProcessedMatrix,
    shipping: &ProcessedMatrix,
) -> CostMatrixResponse {
    let mut costs = BTreeMap::new();
    costs.insert(
        "flights".to_string(),
        dense_view(&Region::ALL, &FLIGHT_CATEGORIES, &CostSource::Aggregated(flights)),
    );
    costs.insert(
        "shipping".to_string(),
        dense_view(
            &Region::ALL,
            &CONTAINER_CATEGORIES,
            &CostSource::Aggregated(shipping),
        ),
    );
    // Accommodation has no scraped matrix behind it; every cell comes from
    // the static table.
    costs.insert(
        "accommodation".to_string(),
        dense_view(&Region::ALL, &FLIGHT_CATEGORIES, &CostSource::Placeholder),
    );

    CostMatrixResponse {
        generated_at: Utc::now(),
        costs,
    }
}

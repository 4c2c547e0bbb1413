//! End-to-end pipeline tests over fixture documents: parse the scraped
//! JSON, normalize into quotes, aggregate into the matrix, and compose the
//! dense view.

use quote_matrix::currency::CostDomain;
use quote_matrix::mapping::{CONTAINER_CATEGORIES, Category, FLIGHT_CATEGORIES, Region};
use quote_matrix::matrix::builder::build_legacy_matrix;
use quote_matrix::matrix::evidence::EvidenceSampler;
use quote_matrix::matrix::generator::generate_cost_matrix;
use quote_matrix::matrix::process_quotes;
use quote_matrix::matrix::types::{DropStats, NO_DATA, ProcessedMatrix};
use quote_matrix::parser::{parse_flight_document, parse_shipping_document};
use quote_matrix::quotes::Quote;

const FLIGHT_DOC: &[u8] = include_bytes!("fixtures/flight_quotes.json");
const SHIPPING_DOC: &[u8] = include_bytes!("fixtures/shipping_rates.json");

fn process_flight_fixture() -> (ProcessedMatrix, DropStats, usize) {
    let doc = parse_flight_document(FLIGHT_DOC).unwrap();
    let quotes: Vec<Quote> = doc.flight_quotes.into_iter().map(Quote::from).collect();
    let total = quotes.len();

    let mut sampler = EvidenceSampler::with_seed(7);
    let (matrix, drops) = process_quotes(&quotes, CostDomain::Flights, &mut sampler);
    (matrix, drops, total)
}

fn process_shipping_fixture() -> (ProcessedMatrix, DropStats, usize) {
    let records = parse_shipping_document(SHIPPING_DOC).unwrap();
    let quotes: Vec<Quote> = records.into_iter().map(Quote::from).collect();
    let total = quotes.len();

    let mut sampler = EvidenceSampler::with_seed(7);
    let (matrix, drops) = process_quotes(&quotes, CostDomain::Shipping, &mut sampler);
    (matrix, drops, total)
}

#[test]
fn test_flight_document_aggregates_into_usd_buckets() {
    let (matrix, _, total) = process_flight_fixture();
    assert_eq!(total, 8);

    // Three NYC→LAX quotes: 200 USD, 300 USD, 400 EUR (436 USD at 1.09)
    let result = matrix
        .get(Region::NorthAmerica, Region::NorthAmerica, Category::Single)
        .unwrap();
    assert_eq!(result.sample_count, 3);
    assert_eq!(result.average_price_usd, 312);
    assert_eq!(result.min_price, 200.0);
    assert_eq!(result.max_price, 436.0);
    assert_eq!(result.evidence.len(), 3);

    let screenshots = result
        .evidence
        .iter()
        .filter(|e| e.screenshot_url.is_some())
        .count();
    assert_eq!(screenshots, 2);
}

#[test]
fn test_asia_anz_and_apac_labels_land_in_one_bucket() {
    let (matrix, _, _) = process_flight_fixture();

    // Tokyo (ASIA), Sydney (ANZ), and Singapore (APAC) quotes all fold
    // into the same destination bucket.
    let result = matrix
        .get(Region::Emea, Region::Apac, Category::Single)
        .unwrap();
    assert_eq!(result.sample_count, 3);
    assert_eq!(result.average_price_usd, 900);
    assert_eq!(result.min_price, 800.0);
    assert_eq!(result.max_price, 1000.0);
}

#[test]
fn test_unmapped_destination_region_is_dropped_and_counted() {
    let (matrix, drops, total) = process_flight_fixture();

    assert_eq!(drops.unmapped_destination, 1);
    assert_eq!(drops.total(), 1);

    let surviving: usize = matrix
        .cells
        .values()
        .flat_map(|dests| dests.values())
        .flat_map(|cats| cats.values())
        .map(|r| r.sample_count)
        .sum();
    assert_eq!(surviving, total - 1);
}

#[test]
fn test_passenger_config_alias_folds_into_couple_bucket() {
    let (matrix, _, _) = process_flight_fixture();

    // "2A_0C_0I" at 600 EUR → 654 USD
    let result = matrix
        .get(Region::Emea, Region::Emea, Category::Couple)
        .unwrap();
    assert_eq!(result.sample_count, 1);
    assert_eq!(result.average_price_usd, 654);
    assert_eq!(result.evidence[0].raw_price, 600.0);
    assert_eq!(result.evidence[0].raw_currency, "EUR");
    assert_eq!(result.evidence[0].price_usd, 654.0);
}

#[test]
fn test_shipping_document_aggregates_by_container_size() {
    let (matrix, drops, _) = process_shipping_fixture();

    // ASIA and APAC origin labels share one bucket: 2150 and 1850 USD
    let st20 = matrix
        .get(Region::Apac, Region::NorthAmerica, Category::Container20)
        .unwrap();
    assert_eq!(st20.sample_count, 2);
    assert_eq!(st20.average_price_usd, 2000);
    assert_eq!(st20.min_price, 1850.0);
    assert_eq!(st20.max_price, 2150.0);

    // 1600 EUR rounds to whole dollars: 1744
    let st40 = matrix
        .get(Region::Emea, Region::Apac, Category::Container40)
        .unwrap();
    assert_eq!(st40.sample_count, 1);
    assert_eq!(st40.average_price_usd, 1744);
    assert_eq!(st40.evidence[0].label, "CMA CGM");

    // The Hamburg record carries no price and never reaches a bucket
    assert_eq!(drops.missing_price, 1);
}

#[test]
fn test_legacy_matrix_keeps_only_averages() {
    let (matrix, _, _) = process_flight_fixture();
    let legacy = build_legacy_matrix(&matrix);

    assert_eq!(
        legacy.get(Region::NorthAmerica, Region::NorthAmerica, Category::Single),
        Some(312)
    );
    assert_eq!(
        legacy.get(Region::Emea, Region::Apac, Category::Single),
        Some(900)
    );
    assert_eq!(
        legacy.get(Region::Emea, Region::Emea, Category::Couple),
        Some(654)
    );
    // Buckets that never existed stay absent rather than zeroed
    assert_eq!(
        legacy.get(Region::India, Region::Latam, Category::Single),
        None
    );
}

#[test]
fn test_composed_matrix_is_dense_with_zero_sentinel() {
    let (flights, _, _) = process_flight_fixture();
    let (shipping, _, _) = process_shipping_fixture();

    let response = generate_cost_matrix(&flights, &shipping);
    assert_eq!(response.costs.len(), 3);

    let flight_view = &response.costs["flights"];
    assert_eq!(
        flight_view.get(Region::NorthAmerica, Region::NorthAmerica, Category::Single),
        312.0
    );

    let shipping_view = &response.costs["shipping"];
    assert_eq!(
        shipping_view.get(Region::Apac, Region::NorthAmerica, Category::Container20),
        2000.0
    );
    // No 40ft quotes exist for this lane; the cell is present but sentinel
    assert_eq!(
        shipping_view.get(Region::India, Region::Latam, Category::Container40),
        NO_DATA
    );
    assert!(!shipping_view.has_data(Region::India, Region::Latam, Category::Container40));

    // Every triple is materialized in both scraped views
    for origin in Region::ALL {
        for destination in Region::ALL {
            for category in FLIGHT_CATEGORIES {
                assert!(
                    flight_view.cells[&origin][&destination].contains_key(&category)
                );
            }
            for category in CONTAINER_CATEGORIES {
                assert!(
                    shipping_view.cells[&origin][&destination].contains_key(&category)
                );
            }
        }
    }

    // Accommodation comes from the static table and is always populated
    let accommodation = &response.costs["accommodation"];
    for origin in Region::ALL {
        for destination in Region::ALL {
            for category in FLIGHT_CATEGORIES {
                assert!(accommodation.has_data(origin, destination, category));
            }
        }
    }
}

#[test]
fn test_matrix_invariants_hold_for_every_bucket() {
    for (matrix, _, _) in [process_flight_fixture(), process_shipping_fixture()] {
        for dests in matrix.cells.values() {
            for cats in dests.values() {
                for result in cats.values() {
                    assert!(result.sample_count > 0);
                    let avg = result.average_price_usd as f64;
                    assert!(result.min_price <= avg + 0.5);
                    assert!(avg <= result.max_price + 0.5);
                    assert!(result.evidence.len() <= result.sample_count.min(10));
                }
            }
        }
    }
}

#[test]
fn test_same_seed_selects_identical_evidence() {
    let (first, _, _) = process_flight_fixture();
    let (second, _, _) = process_flight_fixture();

    let a = first
        .get(Region::NorthAmerica, Region::NorthAmerica, Category::Single)
        .unwrap();
    let b = second
        .get(Region::NorthAmerica, Region::NorthAmerica, Category::Single)
        .unwrap();

    let labels_a: Vec<&str> = a.evidence.iter().map(|e| e.label.as_str()).collect();
    let labels_b: Vec<&str> = b.evidence.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels_a, labels_b);
}

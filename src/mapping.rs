//! Canonical regions and quote categories, with raw-label fold tables.
//!
//! Providers emit a wider set of labels than the matrix supports; raw labels
//! fold into the canonical enums below, and anything that does not map drops
//! the quote from aggregation entirely. The drop is deliberate: unsupported
//! geographies must not pollute the statistics.

use serde::{Deserialize, Serialize};

use crate::currency::CostDomain;

/// Coarse geographic grouping used as the origin/destination axes of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "NORTH_AMERICA")]
    NorthAmerica,
    #[serde(rename = "LATAM")]
    Latam,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "APAC")]
    Apac,
    #[serde(rename = "INDIA")]
    India,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::NorthAmerica,
        Region::Latam,
        Region::Emea,
        Region::Apac,
        Region::India,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "NORTH_AMERICA",
            Region::Latam => "LATAM",
            Region::Emea => "EMEA",
            Region::Apac => "APAC",
            Region::India => "INDIA",
        }
    }
}

/// Passenger configuration (flights) or container size (shipping); the third
/// axis of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Single")]
    Single,
    #[serde(rename = "Couple")]
    Couple,
    #[serde(rename = "Couple+1")]
    CouplePlusOne,
    #[serde(rename = "Couple+2")]
    CouplePlusTwo,
    #[serde(rename = "20ft")]
    Container20,
    #[serde(rename = "40ft")]
    Container40,
}

/// Passenger configurations, in matrix column order.
pub const FLIGHT_CATEGORIES: [Category; 4] = [
    Category::Single,
    Category::Couple,
    Category::CouplePlusOne,
    Category::CouplePlusTwo,
];

/// Container sizes, in matrix column order.
pub const CONTAINER_CATEGORIES: [Category; 2] = [Category::Container20, Category::Container40];

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Single => "Single",
            Category::Couple => "Couple",
            Category::CouplePlusOne => "Couple+1",
            Category::CouplePlusTwo => "Couple+2",
            Category::Container20 => "20ft",
            Category::Container40 => "40ft",
        }
    }
}

/// Folds a raw provider region label into its canonical region.
///
/// Canonical labels map to themselves, so re-mapping is idempotent.
pub fn map_region(raw: &str) -> Option<Region> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "NORTH_AMERICA" | "NORTH AMERICA" | "NA" => Some(Region::NorthAmerica),
        "LATAM" | "SOUTH_AMERICA" | "SOUTH AMERICA" => Some(Region::Latam),
        "EMEA" | "EUROPE" => Some(Region::Emea),
        "APAC" | "ASIA" | "ANZ" => Some(Region::Apac),
        "INDIA" => Some(Region::India),
        _ => None,
    }
}

/// Folds a raw passenger configuration label into its canonical category.
pub fn map_flight_category(raw: &str) -> Option<Category> {
    match raw.trim() {
        "Single" | "1A_0C_0I" => Some(Category::Single),
        "Couple" | "2A_0C_0I" => Some(Category::Couple),
        "Couple+1" | "2A_1C_0I" => Some(Category::CouplePlusOne),
        "Couple+2" | "2A_2C_0I" => Some(Category::CouplePlusTwo),
        _ => None,
    }
}

/// Folds a raw container code into its canonical category.
pub fn map_container(raw: &str) -> Option<Category> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "ST20" | "20FT" => Some(Category::Container20),
        "ST40" | "40FT" => Some(Category::Container40),
        _ => None,
    }
}

/// Maps a raw category label within the given pricing domain.
pub fn map_category(raw: &str, domain: CostDomain) -> Option<Category> {
    match domain {
        CostDomain::Flights => map_flight_category(raw),
        CostDomain::Shipping => map_container(raw),
    }
}

//! Raw quote document shapes produced by the external collection pipeline.
//!
//! Quotes are immutable once scraped; this crate only reads them. The two
//! provider families (flight fares and shipping container rates) arrive in
//! different document layouts and are folded into the common [`Quote`]
//! record before aggregation.

use serde::{Deserialize, Serialize};

/// Container document for one flight scraping run.
#[derive(Debug, Deserialize)]
pub struct FlightQuoteDocument {
    pub total_quotes: usize,
    pub flight_quotes: Vec<FlightQuote>,
}

/// A single scraped flight fare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightQuote {
    pub departure_city: String,
    pub destination_city: String,
    pub origin_city_region: String,
    pub destination_city_region: String,
    #[serde(default)]
    pub airline_code: String,
    pub price: f64,
    pub currency: String,
    /// Passenger configuration label, e.g. "Single" or "2A_1C_0I".
    pub passenger_type: String,
    #[serde(default)]
    pub scraping_datetime: String,
    pub source: String,
    #[serde(default)]
    pub screenshot_url: Option<String>,
    #[serde(default)]
    pub booking_url: String,
}

/// A single scraped container rate. Shipping documents are a bare array of
/// these records; `price_of_shipping` is null when the provider returned no
/// rates for the lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub city_of_origin: String,
    #[serde(default)]
    pub country_of_origin: String,
    pub city_of_destination: String,
    #[serde(default)]
    pub country_of_destination: String,
    pub origin_region: String,
    pub destination_region: String,
    pub price_of_shipping: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Container code, e.g. "ST20" or "ST40".
    pub container_type: String,
    pub provider: String,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub datetime_of_scraping: String,
    #[serde(default)]
    pub screenshot_url: Option<String>,
    #[serde(default)]
    pub website_link: Option<String>,
}

/// Provider-agnostic view of a single quote, as consumed by the aggregator.
#[derive(Debug, Clone)]
pub struct Quote {
    pub origin_city: String,
    pub destination_city: String,
    /// Raw region labels; canonical mapping happens during aggregation.
    pub origin_region: String,
    pub destination_region: String,
    /// Raw category label: passenger configuration or container code.
    pub category: String,
    /// Category-specific display label: airline code or container type.
    pub label: String,
    /// Missing for shipping lanes where the provider returned no rates.
    pub price: Option<f64>,
    pub currency: String,
    pub captured_at: String,
    pub source: String,
    pub screenshot_url: Option<String>,
    pub link: String,
}

impl From<FlightQuote> for Quote {
    fn from(q: FlightQuote) -> Self {
        Quote {
            origin_city: q.departure_city,
            destination_city: q.destination_city,
            origin_region: q.origin_city_region,
            destination_region: q.destination_city_region,
            category: q.passenger_type,
            label: q.airline_code,
            price: Some(q.price),
            currency: q.currency,
            captured_at: q.scraping_datetime,
            source: q.source,
            screenshot_url: q.screenshot_url,
            link: q.booking_url,
        }
    }
}

impl From<ShippingQuote> for Quote {
    fn from(q: ShippingQuote) -> Self {
        Quote {
            origin_city: q.city_of_origin,
            destination_city: q.city_of_destination,
            origin_region: q.origin_region,
            destination_region: q.destination_region,
            label: q.carrier.unwrap_or_else(|| q.container_type.clone()),
            category: q.container_type,
            price: q.price_of_shipping,
            currency: q.currency.unwrap_or_else(|| "USD".to_string()),
            captured_at: q.datetime_of_scraping,
            source: q.provider,
            screenshot_url: q.screenshot_url,
            link: q.website_link.unwrap_or_default(),
        }
    }
}

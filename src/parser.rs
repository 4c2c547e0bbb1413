//! JSON decoders for raw quote documents.

use anyhow::{Context, Result};

use crate::quotes::{FlightQuoteDocument, ShippingQuote};

/// Decodes a flight quote document from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid flight quote document.
pub fn parse_flight_document(bytes: &[u8]) -> Result<FlightQuoteDocument> {
    serde_json::from_slice(bytes).context("failed to decode flight quote document")
}

/// Decodes a shipping rate document (a bare array of quote records) from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid shipping quote array.
pub fn parse_shipping_document(bytes: &[u8]) -> Result<Vec<ShippingQuote>> {
    serde_json::from_slice(bytes).context("failed to decode shipping quote document")
}

//! Currency normalization to USD.

use tracing::warn;

/// Fixed currency → USD multipliers for the handful of currencies providers
/// quote in. Anything else is assumed to already be USD.
static USD_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 1.09),
    ("GBP", 1.27),
    ("CHF", 1.12),
    ("AUD", 0.66),
    ("CAD", 0.73),
    ("SGD", 0.74),
    ("AED", 0.27),
    ("INR", 0.012),
];

/// Which pricing domain a quote belongs to. Controls the rounding policy:
/// flight prices keep cents, shipping prices round to whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostDomain {
    Flights,
    Shipping,
}

impl CostDomain {
    pub fn round(self, amount: f64) -> f64 {
        match self {
            CostDomain::Flights => (amount * 100.0).round() / 100.0,
            CostDomain::Shipping => amount.round(),
        }
    }
}

/// Converts `amount` in `currency` to USD using the fixed rate table.
///
/// Unknown currency codes degrade to an identity rate with a warning rather
/// than failing the batch.
pub fn to_usd(amount: f64, currency: &str, domain: CostDomain) -> f64 {
    let rate = match USD_RATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency))
    {
        Some((_, rate)) => *rate,
        None => {
            warn!(currency, "Unknown currency code, assuming USD");
            1.0
        }
    };

    domain.round(amount * rate)
}

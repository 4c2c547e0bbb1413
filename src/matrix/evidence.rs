//! Screenshot-prioritized evidence sampling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::types::{EvidenceQuote, NormalizedQuote};

/// Hard cap on evidence attached to one bucket.
const MAX_EVIDENCE: usize = 10;
/// Slots reserved for screenshot-backed quotes before the fill step.
const SCREENSHOT_SLOTS: usize = 7;

/// Draws bounded, screenshot-prioritized samples from a bucket.
///
/// Selection is random per invocation: re-running on identical input does
/// not guarantee identical membership. The RNG is owned and seedable so
/// tests and the `--seed` flag can pin the selection while production seeds
/// from entropy.
#[derive(Debug)]
pub struct EvidenceSampler {
    rng: StdRng,
}

impl EvidenceSampler {
    /// Entropy-seeded sampler for production use.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic sampler for reproducible selection.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects up to ten quotes: a random draw of up to seven carrying a
    /// screenshot, the remaining slots filled from the non-screenshot pool.
    pub fn sample(&mut self, members: &[NormalizedQuote]) -> Vec<EvidenceQuote> {
        let (with_shot, without_shot): (Vec<&NormalizedQuote>, Vec<&NormalizedQuote>) = members
            .iter()
            .partition(|m| m.quote.screenshot_url.is_some());

        let shot_take = with_shot.len().min(SCREENSHOT_SLOTS);
        let fill_take = (MAX_EVIDENCE - shot_take).min(without_shot.len());

        let mut picked: Vec<&NormalizedQuote> = with_shot
            .choose_multiple(&mut self.rng, shot_take)
            .copied()
            .collect();
        picked.extend(
            without_shot
                .choose_multiple(&mut self.rng, fill_take)
                .copied(),
        );
        picked.truncate(MAX_EVIDENCE);

        picked.into_iter().map(EvidenceQuote::from).collect()
    }
}

impl Default for EvidenceSampler {
    fn default() -> Self {
        Self::new()
    }
}

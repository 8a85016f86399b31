//! Synthetic quotes for when the live endpoint fails during market hours.
//!
//! The generator walks the last known price by a bounded random step and
//! derives the rest of the quote from it, so the ticker keeps moving
//! instead of freezing. Simulated quotes are flagged with
//! [`Provenance::Simulated`] but are not stale.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Provenance, Quote};
use crate::records::default_quote;

/// Largest absolute price step per simulated tick.
pub const MAX_PRICE_STEP: f64 = 100.0;

/// Day range half-width as a fraction of price.
const RANGE_FRACTION: f64 = 0.004;

/// Random-walk quote generator.
#[derive(Debug)]
pub struct QuoteSimulator {
    rng: StdRng,
}

impl QuoteSimulator {
    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Synthesizes the next quote from `last`, or from the built-in
    /// last-session record when nothing has been seen yet.
    ///
    /// `change` and `change_percent` are computed from the new price and
    /// the previous close of `last`.
    pub fn next_quote(&mut self, last: Option<&Quote>, now: DateTime<Utc>) -> Quote {
        let fallback;
        let base = match last {
            Some(quote) => quote,
            None => {
                fallback = default_quote();
                &fallback
            }
        };

        let step = self.rng.gen_range(-MAX_PRICE_STEP..=MAX_PRICE_STEP);
        let price = (base.price + step).max(0.0);
        let previous_close = base.previous_close;

        let spread = price * RANGE_FRACTION;
        let day_high = price + self.rng.gen_range(0.0..=spread);
        let day_low = price - self.rng.gen_range(0.0..=spread);
        let open = (previous_close + self.rng.gen_range(-spread..=spread)).clamp(day_low, day_high);

        let change = price - previous_close;
        let change_percent = if previous_close == 0.0 {
            0.0
        } else {
            change / previous_close * 100.0
        };

        Quote {
            price,
            change,
            change_percent,
            day_high,
            day_low,
            open,
            previous_close,
            is_stale: false,
            observed_at: now,
            provenance: Provenance::Simulated,
        }
    }
}

impl Default for QuoteSimulator {
    fn default() -> Self {
        Self::new()
    }
}

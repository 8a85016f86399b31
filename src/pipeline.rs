//! Per-tick quote selection.
//!
//! [`QuotePipeline`] owns every piece of mutable ticker state: the price
//! history, the last emitted quote, the simulator, and the record store.
//! Each [`tick`](QuotePipeline::tick) checks the calendar, takes the live
//! or the closed-market branch, applies at most one fallback, and always
//! produces a quote.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::calendar::MarketCalendar;
use crate::history::PriceHistory;
use crate::models::Quote;
use crate::records::HistoricalRecordStore;
use crate::simulation::QuoteSimulator;
use crate::sources::{HistoricalQuoteSource, LiveQuoteSource};
use crate::store::KeyValueStore;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Everything a presenter needs after one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub quote: Quote,
    /// Price history after appending `quote.price`, oldest first.
    pub history: Vec<f64>,
    pub market_open: bool,
}

/// Fetch-and-fallback orchestrator.
pub struct QuotePipeline<L, H, S, C = SystemClock> {
    calendar: MarketCalendar,
    live: L,
    records: HistoricalRecordStore<H, S>,
    simulator: QuoteSimulator,
    history: PriceHistory,
    last_quote: Option<Quote>,
    clock: C,
}

impl<L, H, S> QuotePipeline<L, H, S, SystemClock>
where
    L: LiveQuoteSource,
    H: HistoricalQuoteSource,
    S: KeyValueStore,
{
    /// Creates a pipeline on wall-clock time with an entropy-seeded simulator.
    #[must_use]
    pub fn new(
        calendar: MarketCalendar,
        live: L,
        records: HistoricalRecordStore<H, S>,
        history_capacity: usize,
    ) -> Self {
        Self::with_parts(
            calendar,
            live,
            records,
            PriceHistory::new(history_capacity),
            QuoteSimulator::new(),
            SystemClock,
        )
    }
}

impl<L, H, S, C> QuotePipeline<L, H, S, C>
where
    L: LiveQuoteSource,
    H: HistoricalQuoteSource,
    S: KeyValueStore,
    C: Clock,
{
    /// Creates a pipeline from explicit parts.
    #[must_use]
    pub fn with_parts(
        calendar: MarketCalendar,
        live: L,
        records: HistoricalRecordStore<H, S>,
        history: PriceHistory,
        simulator: QuoteSimulator,
        clock: C,
    ) -> Self {
        Self {
            calendar,
            live,
            records,
            simulator,
            history,
            last_quote: None,
            clock,
        }
    }

    /// Runs one fetch-and-fallback cycle.
    pub async fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let (quote, market_open) = if self.calendar.is_open(now) {
            self.open_market_quote(now).await
        } else {
            (self.closed_market_quote().await, false)
        };

        self.history.push(quote.price);
        self.last_quote = Some(quote.clone());
        debug!(
            price = quote.price,
            provenance = quote.provenance.label(),
            market_open,
            "Tick complete"
        );

        TickOutcome {
            quote,
            history: self.history.snapshot(),
            market_open,
        }
    }

    /// Live quote, or a simulated one if the live fetch fails. The clock is
    /// re-read after a failure: once the session has ended the tick
    /// resolves through the closed-market branch instead.
    async fn open_market_quote(&mut self, now: DateTime<Utc>) -> (Quote, bool) {
        match self.live.fetch_live().await {
            Ok(mut quote) => {
                quote.is_stale = false;
                (quote, true)
            }
            Err(e) => {
                if self.calendar.is_open(self.clock.now()) {
                    warn!(error = %e, "Live quote failed, simulating");
                    let quote = self.simulator.next_quote(self.last_quote.as_ref(), now);
                    (quote, true)
                } else {
                    info!(error = %e, "Live quote failed after market close");
                    (self.closed_market_quote().await, false)
                }
            }
        }
    }

    async fn closed_market_quote(&self) -> Quote {
        let mut quote = self.records.get_last_session().await.quote;
        quote.is_stale = true;
        quote
    }

    pub fn last_quote(&self) -> Option<&Quote> {
        self.last_quote.as_ref()
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }
}

//! Application state for the TUI.

use std::time::Duration;

use chrono_tz::Tz;

use crate::models::Quote;
use crate::presenter::Presenter;

/// Central display state, updated only through [`Presenter`] calls and
/// key handling.
pub struct App {
    // -- Instrument --
    /// Symbol shown in the header.
    pub symbol: String,
    /// Exchange timezone used for timestamps.
    pub timezone: Tz,
    /// Configured refresh period, shown in the key help line.
    pub refresh_interval: Duration,

    // -- Quote State --
    /// Most recent quote, if any tick has completed.
    pub quote: Option<Quote>,
    /// Price history, oldest first.
    pub history: Vec<f64>,
    /// Market status from the last tick.
    pub market_open: bool,
    /// Number of ticks rendered.
    pub tick_count: u64,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an empty App for `symbol`.
    pub fn new(symbol: impl Into<String>, timezone: Tz, refresh_interval: Duration) -> Self {
        Self {
            symbol: symbol.into(),
            timezone,
            refresh_interval,
            quote: None,
            history: Vec::new(),
            market_open: false,
            tick_count: 0,
            should_quit: false,
        }
    }

    /// Lowest and highest price in the history, padded so a flat series
    /// still gets a visible band.
    pub fn history_bounds(&self) -> Option<(f64, f64)> {
        let (min, max) = self
            .history
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, &p| match acc {
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
                None => Some((p, p)),
            })?;
        let pad = ((max - min) * 0.1).max(max.abs() * 0.0005).max(1.0);
        Some((min - pad, max + pad))
    }

    /// Observation time of the current quote in exchange time.
    pub fn observed_label(&self) -> Option<String> {
        self.quote.as_ref().map(|q| {
            q.observed_at
                .with_timezone(&self.timezone)
                .format("%H:%M:%S")
                .to_string()
        })
    }
}

impl Presenter for App {
    fn render(&mut self, quote: &Quote) {
        self.quote = Some(quote.clone());
        self.tick_count += 1;
    }

    fn render_history(&mut self, prices: &[f64]) {
        self.history.clear();
        self.history.extend_from_slice(prices);
    }

    fn render_market_status(&mut self, open: bool) {
        self.market_open = open;
    }
}

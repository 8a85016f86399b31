//! Display surface fed by the pipeline.

use tracing::info;

use crate::models::Quote;
use crate::pipeline::TickOutcome;

/// Receives every tick. Calls are idempotent and return nothing.
pub trait Presenter {
    fn render(&mut self, quote: &Quote);
    fn render_history(&mut self, prices: &[f64]);
    fn render_market_status(&mut self, open: bool);
}

impl TickOutcome {
    /// Forwards this outcome to a presenter: status, quote, then history.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        presenter.render_market_status(self.market_open);
        presenter.render(&self.quote);
        presenter.render_history(&self.history);
    }
}

/// Headless presenter that writes one log line per tick.
#[derive(Debug, Default)]
pub struct LogPresenter {
    symbol: String,
    market_open: Option<bool>,
}

impl LogPresenter {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            market_open: None,
        }
    }
}

impl Presenter for LogPresenter {
    fn render(&mut self, quote: &Quote) {
        info!(
            symbol = %self.symbol,
            price = quote.price,
            change = quote.change,
            change_pct = quote.change_percent,
            high = quote.day_high,
            low = quote.day_low,
            stale = quote.is_stale,
            source = quote.provenance.label(),
            "Quote"
        );
    }

    fn render_history(&mut self, prices: &[f64]) {
        tracing::debug!(points = prices.len(), "History");
    }

    fn render_market_status(&mut self, open: bool) {
        if self.market_open != Some(open) {
            info!(symbol = %self.symbol, open, "Market status changed");
            self.market_open = Some(open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::default_quote;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        history_len: usize,
        open: Option<bool>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, _quote: &Quote) {
            self.calls.push("render");
        }

        fn render_history(&mut self, prices: &[f64]) {
            self.calls.push("history");
            self.history_len = prices.len();
        }

        fn render_market_status(&mut self, open: bool) {
            self.calls.push("status");
            self.open = Some(open);
        }
    }

    #[test]
    fn present_calls_all_three_surfaces() {
        let outcome = TickOutcome {
            quote: default_quote(),
            history: vec![1.0, 2.0, 3.0],
            market_open: false,
        };
        let mut recorder = Recorder::default();
        outcome.present(&mut recorder);

        assert_eq!(recorder.calls, vec!["status", "render", "history"]);
        assert_eq!(recorder.history_len, 3);
        assert_eq!(recorder.open, Some(false));
    }

    #[test]
    fn log_presenter_tracks_status_transitions() {
        let mut presenter = LogPresenter::new("^NSEI");
        presenter.render_market_status(true);
        presenter.render_market_status(true);
        assert_eq!(presenter.market_open, Some(true));
        presenter.render_market_status(false);
        assert_eq!(presenter.market_open, Some(false));
    }
}

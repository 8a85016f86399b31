use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which stage of the pipeline produced a quote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    /// Fetched from the live quote endpoint.
    Live,
    /// Synthesized because the live endpoint failed during market hours.
    Simulated,
    /// Read back from the local last-session record.
    #[default]
    Cached,
    /// Fetched from the remote historical lookup.
    Remote,
    /// The built-in constant record.
    Fallback,
}

impl Provenance {
    /// Returns a short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Live => "LIVE",
            Provenance::Simulated => "SIM",
            Provenance::Cached => "CACHE",
            Provenance::Remote => "HIST",
            Provenance::Fallback => "DEFAULT",
        }
    }
}

/// One normalized snapshot of the tracked instrument.
///
/// `change` and `change_percent` are carried as received. Only
/// simulated quotes guarantee `change == price - previous_close`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub open: f64,
    pub previous_close: f64,
    /// True when the quote describes a prior session.
    pub is_stale: bool,
    #[serde(default = "Utc::now")]
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Quote {
    /// Closing price of the quoted session, known only for stale quotes.
    pub fn close(&self) -> Option<f64> {
        self.is_stale.then_some(self.price)
    }

    /// Returns `true` if the quote is up on the previous close.
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// The last-session record kept in the local store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRecord {
    #[serde(flatten)]
    pub quote: Quote,
    pub is_last_trading_day: bool,
}

impl CachedRecord {
    /// Wraps a quote as a stale last-session record.
    pub fn new(mut quote: Quote) -> Self {
        quote.is_stale = true;
        Self {
            quote,
            is_last_trading_day: true,
        }
    }
}

/// Numeric fields of a historical lookup, any of which may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoricalFields {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
}

//! Wire types for the Yahoo Finance `quoteSummary` endpoint.
//!
//! Numeric values arrive wrapped as `{"raw": 24280.5, "fmt": "24,280.50"}`;
//! an empty object `{}` stands for a value the upstream does not have.

use chrono::Utc;
use serde::Deserialize;

use super::quote::{HistoricalFields, Provenance, Quote};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub summary_detail: Option<SummaryDetailModule>,
}

/// A `{raw: number}` wrapper.
#[derive(Debug, Default, Deserialize)]
pub struct RawNumber {
    #[serde(default)]
    pub raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub regular_market_price: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_change: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_change_percent: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_day_high: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_day_low: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_open: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_previous_close: Option<RawNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetailModule {
    #[serde(default)]
    pub day_high: Option<RawNumber>,
    #[serde(default)]
    pub day_low: Option<RawNumber>,
    #[serde(default)]
    pub open: Option<RawNumber>,
    #[serde(default)]
    pub previous_close: Option<RawNumber>,
    #[serde(default)]
    pub regular_market_previous_close: Option<RawNumber>,
}

fn raw(field: &Option<RawNumber>) -> Option<f64> {
    field.as_ref().and_then(|n| n.raw).filter(|v| v.is_finite())
}

impl QuoteSummaryResponse {
    /// Returns the first result entry, or a descriptive error.
    pub fn into_first_result(self) -> crate::Result<QuoteSummaryResult> {
        if let Some(error) = self.quote_summary.error
            && !error.is_null()
        {
            return Err(crate::TickerError::MalformedPayload(format!(
                "upstream reported error: {error}"
            )));
        }
        self.quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                crate::TickerError::MalformedPayload("quoteSummary.result is empty".to_string())
            })
    }
}

impl PriceModule {
    /// Builds a live quote, requiring every `regularMarket*` field.
    pub fn into_live_quote(self) -> crate::Result<Quote> {
        let require = |field: &Option<RawNumber>, name: &str| {
            raw(field).ok_or_else(|| {
                crate::TickerError::MalformedPayload(format!("missing price.{name}"))
            })
        };

        Ok(Quote {
            price: require(&self.regular_market_price, "regularMarketPrice")?,
            change: require(&self.regular_market_change, "regularMarketChange")?,
            change_percent: require(
                &self.regular_market_change_percent,
                "regularMarketChangePercent",
            )?,
            day_high: require(&self.regular_market_day_high, "regularMarketDayHigh")?,
            day_low: require(&self.regular_market_day_low, "regularMarketDayLow")?,
            open: require(&self.regular_market_open, "regularMarketOpen")?,
            previous_close: require(
                &self.regular_market_previous_close,
                "regularMarketPreviousClose",
            )?,
            is_stale: false,
            observed_at: Utc::now(),
            provenance: Provenance::Live,
        })
    }
}

impl QuoteSummaryResult {
    /// Collects whatever historical fields are present. The `price`
    /// module wins over `summaryDetail` when both carry a value.
    pub fn into_historical_fields(self) -> HistoricalFields {
        let price = self.price.unwrap_or_default();
        let detail = self.summary_detail.unwrap_or_default();

        HistoricalFields {
            price: raw(&price.regular_market_price),
            change: raw(&price.regular_market_change),
            change_percent: raw(&price.regular_market_change_percent),
            day_high: raw(&price.regular_market_day_high).or_else(|| raw(&detail.day_high)),
            day_low: raw(&price.regular_market_day_low).or_else(|| raw(&detail.day_low)),
            open: raw(&price.regular_market_open).or_else(|| raw(&detail.open)),
            previous_close: raw(&price.regular_market_previous_close)
                .or_else(|| raw(&detail.regular_market_previous_close))
                .or_else(|| raw(&detail.previous_close)),
        }
    }
}

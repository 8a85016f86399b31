//! Yahoo Finance `quoteSummary` client.
//!
//! The live path requests only the `price` module; the historical path
//! adds `summaryDetail` so the day range and previous close can still be
//! filled when the price module is sparse outside market hours.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{HistoricalQuoteSource, LiveQuoteSource};
use crate::Result;
use crate::config::ProviderConfig;
use crate::models::quote_summary::QuoteSummaryResponse;
use crate::models::{HistoricalFields, Quote};

const LIVE_MODULES: &str = "price";
const HISTORICAL_MODULES: &str = "price,summaryDetail";

/// Browser-like agent; the endpoint rejects requests without one.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) tickline/0.1";

/// HTTP client for one instrument.
#[derive(Debug, Clone)]
pub struct YahooQuoteClient {
    http: Client,
    base_url: String,
    symbol: String,
}

impl YahooQuoteClient {
    /// Builds a client from provider settings.
    ///
    /// # Errors
    ///
    /// Returns [`TickerError::Transport`](crate::TickerError::Transport)
    /// if the HTTP client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            symbol: config.symbol.clone(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn url(&self) -> String {
        format!(
            "{}/v10/finance/quoteSummary/{}",
            self.base_url,
            self.symbol.replace('^', "%5E")
        )
    }

    async fn fetch_summary(&self, modules: &str) -> Result<QuoteSummaryResponse> {
        let response = self
            .http
            .get(self.url())
            .query(&[("modules", modules)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(symbol = %self.symbol, modules, bytes = body.len(), "Received quoteSummary");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LiveQuoteSource for YahooQuoteClient {
    async fn fetch_live(&self) -> Result<Quote> {
        let result = self.fetch_summary(LIVE_MODULES).await?.into_first_result()?;
        let price = result.price.ok_or_else(|| {
            crate::TickerError::MalformedPayload("missing price module".to_string())
        })?;
        price.into_live_quote()
    }
}

#[async_trait]
impl HistoricalQuoteSource for YahooQuoteClient {
    async fn fetch_historical(&self) -> Result<HistoricalFields> {
        let result = self
            .fetch_summary(HISTORICAL_MODULES)
            .await?
            .into_first_result()?;
        Ok(result.into_historical_fields())
    }
}

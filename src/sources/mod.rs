//! Remote quote sources.
//!
//! The pipeline talks to two kinds of upstream: a live source used while
//! the market is open and a historical source consulted when the local
//! last-session record is missing. Both report failures as plain `Err`
//! values; the caller decides the fallback.

pub mod yahoo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::models::{HistoricalFields, Quote};

pub use yahoo::YahooQuoteClient;

/// Produces a quote for the current session.
#[async_trait]
pub trait LiveQuoteSource: Send + Sync {
    /// Fetches the current quote with a single request and no retry.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// payload missing any required field.
    async fn fetch_live(&self) -> Result<Quote>;
}

/// Looks up the most recent completed session.
#[async_trait]
pub trait HistoricalQuoteSource: Send + Sync {
    /// Fetches whatever fields the upstream has for the last session.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparsable body.
    async fn fetch_historical(&self) -> Result<HistoricalFields>;
}

#[async_trait]
impl<T: LiveQuoteSource + ?Sized> LiveQuoteSource for Arc<T> {
    async fn fetch_live(&self) -> Result<Quote> {
        (**self).fetch_live().await
    }
}

#[async_trait]
impl<T: HistoricalQuoteSource + ?Sized> HistoricalQuoteSource for Arc<T> {
    async fn fetch_historical(&self) -> Result<HistoricalFields> {
        (**self).fetch_historical().await
    }
}

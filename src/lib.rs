//! Terminal index ticker.
//!
//! Polls a single index quote on a fixed interval and shows it with a
//! short price history. While the market is open quotes come from the
//! live endpoint (simulated if it fails); while closed the last session
//! is served from a local record, a remote historical lookup, or a
//! built-in default, in that order.

pub mod calendar;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod pipeline;
pub mod presenter;
pub mod records;
pub mod service;
pub mod simulation;
pub mod sources;
pub mod store;
pub mod tui;

pub use error::{Result, TickerError};

//! Quote data types and upstream wire formats.

pub mod quote;
pub mod quote_summary;

pub use quote::{CachedRecord, HistoricalFields, Provenance, Quote};

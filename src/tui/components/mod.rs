//! Reusable UI components.

pub mod price_chart;
pub mod quote_panel;
pub mod status_bar;

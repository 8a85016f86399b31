//! Terminal User Interface for the ticker.
//!
//! Provides a Ratatui-based presenter showing the current quote, market
//! status, and a line chart of recent prices.

pub mod app;
pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

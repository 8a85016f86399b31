//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app::App;
use super::components::{price_chart, quote_panel, status_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Ticker header
            Constraint::Length(5), // Quote details
            Constraint::Min(8),    // Chart
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    status_bar::render(frame, layout[0], app);
    quote_panel::render_header(frame, layout[1], app);
    quote_panel::render_details(frame, layout[2], app);
    price_chart::render(frame, layout[3], app);
    render_keybindings(frame, layout[4], app);
}

fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled(" r", key),
        Span::raw(" refresh  "),
        Span::styled("q", key),
        Span::raw(" quit  "),
        Span::styled(
            format!("auto every {}s", app.refresh_interval.as_secs_f64()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Provenance;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (status_label, status_color) = if app.market_open {
        (" Market Open ", Color::Green)
    } else {
        (" Market Closed ", Color::Red)
    };

    // Degraded sources get a highlighted badge.
    let source_span = match app.quote.as_ref().map(|q| q.provenance) {
        Some(Provenance::Live) => Span::styled(" LIVE ", Style::default().fg(Color::Green)),
        Some(provenance @ (Provenance::Simulated | Provenance::Fallback)) => Span::styled(
            format!(" {} ", provenance.label()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Some(provenance) => Span::styled(
            format!(" {} ", provenance.label()),
            Style::default().fg(Color::Cyan),
        ),
        None => Span::styled(" waiting ", Style::default().fg(Color::DarkGray)),
    };

    let updated = app
        .observed_label()
        .map(|t| format!(" {t} "))
        .unwrap_or_default();

    let tick_info = format!(" #{} ", app.tick_count);

    let line = Line::from(vec![
        Span::styled(status_label, Style::default().fg(status_color)),
        Span::raw("│"),
        source_span,
        Span::raw("│"),
        Span::styled(updated, Style::default().fg(Color::White)),
        Span::raw(format!(
            "{:>width$}",
            tick_info,
            width = area.width.saturating_sub(40) as usize
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

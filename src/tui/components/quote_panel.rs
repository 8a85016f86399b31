//! Quote header and detail panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::Quote;
use crate::tui::app::App;

fn change_color(quote: &Quote) -> Color {
    if quote.is_up() { Color::Green } else { Color::Red }
}

/// Renders the one-line ticker header with price and change.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let symbol = Span::styled(
        format!(" {} ", app.symbol),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let content = if let Some(q) = &app.quote {
        let color = change_color(q);
        let arrow = if q.is_up() { "▲" } else { "▼" };

        let mut spans = vec![
            symbol,
            Span::styled(arrow, Style::default().fg(color)),
            Span::styled(
                format!(" {:.2} ", q.price),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:+.2} ({:+.2}%)", q.change, q.change_percent),
                Style::default().fg(color),
            ),
        ];
        if q.is_stale {
            spans.push(Span::styled(
                "  last session",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    } else {
        Line::from(vec![
            symbol,
            Span::styled(" -- ", Style::default().fg(Color::DarkGray)),
        ])
    };

    let para = Paragraph::new(content).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the day range, open and closes.
pub fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Session ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(q) = &app.quote else {
        let para = Paragraph::new("No data")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut first = vec![
        Span::styled(" High ", label),
        Span::styled(format!("{:<12.2}", q.day_high), value),
        Span::styled("Low ", label),
        Span::styled(format!("{:<12.2}", q.day_low), value),
    ];
    let mut second = vec![
        Span::styled(" Open ", label),
        Span::styled(format!("{:<12.2}", q.open), value),
        Span::styled("Prev Close ", label),
        Span::styled(format!("{:<12.2}", q.previous_close), value),
    ];
    if let Some(close) = q.close() {
        second.push(Span::styled("Close ", label));
        second.push(Span::styled(format!("{close:.2}"), value));
    }

    // Position of price within the day range.
    let range = q.day_high - q.day_low;
    if range > 0.0 {
        let pct = ((q.price - q.day_low) / range * 100.0).clamp(0.0, 100.0);
        first.push(Span::styled("Range ", label));
        first.push(Span::styled(format!("{pct:.0}%"), Style::default().fg(change_color(q))));
    }

    let para = Paragraph::new(vec![Line::from(first), Line::from(second)]).block(block);
    frame.render_widget(para, area);
}

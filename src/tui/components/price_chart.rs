//! Line chart of the recent price history.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::tui::app::App;

/// Renders the history as a braille line chart.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Chart [Line] last {} ", app.history.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some((min_price, max_price)) = app.history_bounds() else {
        let para = Paragraph::new("No data")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let points: Vec<(f64, f64)> = app
        .history
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();

    let color = match app.quote.as_ref() {
        Some(q) if q.is_up() => Color::Green,
        Some(_) => Color::Red,
        None => Color::White,
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let mid = (min_price + max_price) / 2.0;

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([min_price, max_price])
                .labels(vec![
                    Span::raw(format!("{min_price:.2}")),
                    Span::raw(format!("{mid:.2}")),
                    Span::raw(format!("{max_price:.2}")),
                ]),
        );

    frame.render_widget(chart, area);
}

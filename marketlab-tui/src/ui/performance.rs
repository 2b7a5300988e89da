//! Performance view — symbol selector beside cumulative-return curves.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState};
use ratatui::Frame;

use crate::app::App;
use crate::ui::render_view_error;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(20)])
        .split(area);

    render_selector(f, chunks[0], app);

    match &app.curves {
        Ok(curves) => render_chart(f, chunks[1], app, curves),
        Err(error) => render_view_error(f, chunks[1], app, error),
    }
}

fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let items: Vec<ListItem> = app
        .symbols
        .iter()
        .map(|symbol| {
            let (mark, color) = if app.selected.contains(symbol) {
                ("[x] ", theme.positive)
            } else {
                ("[ ] ", theme.text_secondary)
            };
            ListItem::new(format!("{mark}{symbol}")).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(theme.muted))
                .title(" Symbols ")
                .title_style(Style::default().fg(theme.accent)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    app: &App,
    curves: &[marketlab_core::views::SymbolCurve],
) {
    let theme = &app.theme;

    let Some(origin) = curves
        .iter()
        .filter_map(|c| c.points.first().map(|p| p.0))
        .min()
    else {
        return;
    };
    let last_date = curves
        .iter()
        .filter_map(|c| c.points.last().map(|p| p.0))
        .max()
        .unwrap_or(origin);

    // Day offsets on x, percentage points on y. The point vectors must
    // outlive the datasets borrowing them.
    let series: Vec<(String, Vec<(f64, f64)>)> = curves
        .iter()
        .filter(|c| !c.points.is_empty())
        .map(|c| {
            let points = c
                .points
                .iter()
                .map(|(date, cum)| {
                    (
                        date.signed_duration_since(origin).num_days() as f64,
                        cum * 100.0,
                    )
                })
                .collect();
            (c.symbol.clone(), points)
        })
        .collect();

    let x_max = last_date.signed_duration_since(origin).num_days().max(1) as f64;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, points) in &series {
        for &(_, y) in points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    let y_range = y_max - y_min;
    let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 1.0 };
    let y_lower = y_min - y_pad;
    let y_upper = y_max + y_pad;

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (symbol, points))| {
            Dataset::default()
                .name(symbol.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(points)
        })
        .collect();

    let y_mid = (y_lower + y_upper) / 2.0;
    let x_labels = vec![
        Span::raw(origin.to_string()),
        Span::raw(last_date.to_string()),
    ];
    let y_labels = vec![
        Span::raw(format!("{y_lower:+.1}%")),
        Span::raw(format!("{y_mid:+.1}%")),
        Span::raw(format!("{y_upper:+.1}%")),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Cumulative Return ")
                .title_style(Style::default().fg(theme.accent)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_lower, y_upper])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, DataSource};
    use marketlab_core::data::synthetic_prices;
    use marketlab_core::MarketData;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample_app() -> App {
        let data = MarketData::from_prices(synthetic_prices(42).unwrap()).unwrap();
        App::new(data, DataSource::Store)
    }

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, f.area(), app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_selector_and_curves() {
        let content = rendered_text(&sample_app());
        assert!(content.contains("Symbols"));
        assert!(content.contains("[x]"));
        assert!(content.contains("Cumulative Return"));
    }

    #[test]
    fn empty_selection_shows_the_warning_beside_the_selector() {
        let mut app = sample_app();
        app.clear_selection();
        let content = rendered_text(&app);
        assert!(content.contains("No symbols selected"));
        // The selector stays usable so the user can toggle back in.
        assert!(content.contains("[ ]"));
    }
}

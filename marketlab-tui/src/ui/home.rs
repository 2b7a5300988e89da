//! Home view — headline metrics plus a bar chart of the latest
//! session's per-symbol daily returns.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::{render_view_error, signed_pct};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = match &app.home {
        Ok(summary) => summary,
        Err(error) => return render_view_error(f, area, app, error),
    };
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);

    let sentiment = if summary.bullish {
        Span::styled(
            "Bullish",
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "Bearish",
            Style::default()
                .fg(theme.negative)
                .add_modifier(Modifier::BOLD),
        )
    };
    let latest = summary
        .latest_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "n/a".to_string());

    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default().fg(theme.text_primary);
    let lines = vec![
        Line::from(vec![
            Span::styled("Symbols tracked:    ", label),
            Span::styled(summary.total_symbols.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Avg daily return:   ", label),
            Span::styled(
                signed_pct(summary.avg_daily_return),
                Style::default().fg(theme.return_color(summary.avg_daily_return)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Market volatility:  ", label),
            Span::styled(format!("{:.2}%", summary.volatility * 100.0), value),
        ]),
        Line::from(vec![Span::styled("Sentiment:          ", label), sentiment]),
        Line::from(vec![
            Span::styled("Latest session:     ", label),
            Span::styled(latest, value),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    // Latest-session returns, one bar per symbol. Bars are unsigned, so
    // magnitude drives the height and color carries the sign.
    let bars: Vec<Bar> = summary
        .latest_returns
        .iter()
        .map(|(symbol, ret)| {
            Bar::default()
                .value((ret.abs() * 10_000.0).round() as u64)
                .text_value(signed_pct(*ret))
                .label(Line::from(symbol.as_str()))
                .style(Style::default().fg(theme.return_color(*ret)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(" Daily Return, Latest Session ")
                .title_style(Style::default().fg(theme.accent)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1);
    f.render_widget(chart, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, DataSource};
    use marketlab_core::data::synthetic_prices;
    use marketlab_core::views::ViewError;
    use marketlab_core::MarketData;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample_app() -> App {
        let data = MarketData::from_prices(synthetic_prices(42).unwrap()).unwrap();
        App::new(data, DataSource::Store)
    }

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
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
    fn renders_headline_metrics() {
        let content = rendered_text(&sample_app());
        assert!(content.contains("Symbols tracked"));
        assert!(content.contains("Sentiment"));
    }

    #[test]
    fn empty_dataset_shows_the_warning() {
        let mut app = sample_app();
        app.home = Err(ViewError::NoData("market summary"));
        let content = rendered_text(&app);
        assert!(content.contains("not enough data"));
        assert!(!content.contains("Symbols tracked"));
    }
}

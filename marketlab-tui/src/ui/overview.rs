//! Market overview — breadth counts and a top-performers bar chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::{render_view_error, signed_pct};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let overview = match &app.overview {
        Ok(overview) => overview,
        Err(error) => return render_view_error(f, area, app, error),
    };
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5)])
        .split(area);

    let breadth = Line::from(vec![
        Span::styled(
            format!("{} symbols", overview.total_symbols),
            Style::default().fg(theme.text_primary),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{} advancing", overview.advancing),
            Style::default().fg(theme.positive),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{} declining", overview.declining),
            Style::default().fg(theme.negative),
        ),
    ]);
    f.render_widget(Paragraph::new(breadth), chunks[0]);

    let bars: Vec<Bar> = overview
        .top_performers
        .iter()
        .map(|(symbol, cum)| {
            Bar::default()
                .value((cum.abs() * 10_000.0).round() as u64)
                .text_value(signed_pct(*cum))
                .label(Line::from(symbol.as_str()))
                .style(Style::default().fg(theme.return_color(*cum)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(" Top Performers by Cumulative Return ")
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
    fn renders_breadth_and_ranking() {
        let content = rendered_text(&sample_app());
        assert!(content.contains("advancing"));
        assert!(content.contains("declining"));
        assert!(content.contains("Top Performers"));
    }

    #[test]
    fn empty_dataset_shows_the_warning() {
        let mut app = sample_app();
        app.overview = Err(ViewError::NoData("market overview"));
        let content = rendered_text(&app);
        assert!(content.contains("not enough data"));
    }
}

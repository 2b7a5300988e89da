//! Volatility view — the ten most volatile symbols by standard deviation
//! of daily returns.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;

use crate::app::App;
use crate::ui::render_view_error;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let ranking = match &app.volatility {
        Ok(ranking) => ranking,
        Err(error) => return render_view_error(f, area, app, error),
    };
    let theme = &app.theme;

    let bars: Vec<Bar> = ranking
        .entries
        .iter()
        .enumerate()
        .map(|(rank, (symbol, std))| {
            let color = if rank == 0 { theme.warning } else { theme.neutral };
            Bar::default()
                .value((std * 10_000.0).round() as u64)
                .text_value(format!("{:.2}%", std * 100.0))
                .label(Line::from(symbol.as_str()))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::NONE)
                .title(" Std Dev of Daily Returns, Most Volatile First ")
                .title_style(Style::default().fg(theme.accent)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1);
    f.render_widget(chart, area);
}

//! Bottom status bar — key hints plus the last status message.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, DataSource, StatusLevel, View};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = Vec::new();

    let hints = if app.view == View::Performance {
        " 1-5:Views Tab:Next j/k:Move Space:Toggle a:All c:Clear q:Quit"
    } else {
        " 1:Home 2:Overview 3:Performance 4:Volatility 5:Correlation q:Quit"
    };
    spans.push(Span::styled(hints, Style::default().fg(theme.muted)));

    if app.source == DataSource::Synthetic {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "SYNTHETIC DATA",
            Style::default().fg(theme.warning),
        ));
    }

    if let Some((msg, level)) = &app.status {
        let style = match level {
            StatusLevel::Info => Style::default().fg(theme.accent),
            StatusLevel::Warning => Style::default().fg(theme.warning),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}

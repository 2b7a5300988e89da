//! Top-level UI layout — one analysis view at a time plus a status bar.

pub mod correlation;
pub mod home;
pub mod overview;
pub mod performance;
pub mod status_bar;
pub mod volatility;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use marketlab_core::views::ViewError;

use crate::app::{App, View};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_view(f, chunks[0], app);
    status_bar::render(f, chunks[1], app);
}

/// Draw the active view with its border.
fn draw_view(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" {} [{}] ", app.view.label(), app.view.index() + 1))
        .title_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.view {
        View::Home => home::render(f, inner, app),
        View::Overview => overview::render(f, inner, app),
        View::Performance => performance::render(f, inner, app),
        View::Volatility => volatility::render(f, inner, app),
        View::Correlation => correlation::render(f, inner, app),
    }
}

/// Centered warning paragraph for a view that cannot be shown.
pub(crate) fn render_view_error(f: &mut Frame, area: Rect, app: &App, error: &ViewError) {
    let message = match error {
        ViewError::EmptySelection => {
            "No symbols selected. Press space to toggle, 'a' for all.".to_string()
        }
        ViewError::NoData(_) => format!("{error}"),
    };
    let para = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(app.theme.warning),
    )))
    .centered();

    // Drop the paragraph a third of the way down so it reads as a notice.
    let y = area.y + area.height / 3;
    let notice = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    f.render_widget(para, notice);
}

/// "+3.21%" / "-1.07%" with one style per sign.
pub(crate) fn signed_pct(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

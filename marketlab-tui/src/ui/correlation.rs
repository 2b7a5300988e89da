//! Correlation view — a colored grid painted straight into the buffer.
//!
//! Ratatui has no table-with-cell-background widget that fits a square
//! matrix, so each cell is written directly: green toward +1, pink
//! toward -1, charcoal near zero, "--" where the correlation is
//! undefined.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use ratatui::Frame;

use marketlab_core::views::CorrelationMatrix;

use crate::app::App;
use crate::theme::Theme;
use crate::ui::render_view_error;

/// Width of one matrix cell, including padding.
const CELL_WIDTH: u16 = 7;
/// Width of the row-label gutter.
const LABEL_WIDTH: u16 = 6;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    match &app.correlation {
        Ok(matrix) => f.render_widget(Heatmap::new(matrix, &app.theme), area),
        Err(error) => render_view_error(f, area, app, error),
    }
}

pub struct Heatmap<'a> {
    matrix: &'a CorrelationMatrix,
    theme: &'a Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, theme: &'a Theme) -> Self {
        Self { matrix, theme }
    }

    fn short(symbol: &str) -> String {
        symbol.chars().take(CELL_WIDTH as usize - 2).collect()
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height < 2 {
            return;
        }
        let header_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.theme.text_secondary);

        // Column headers.
        for (col, symbol) in self.matrix.symbols.iter().enumerate() {
            let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
            if x + CELL_WIDTH > area.right() {
                break;
            }
            buf.set_string(x, area.y, format!("{:^1$}", Self::short(symbol), CELL_WIDTH as usize), header_style);
        }

        // One row per symbol.
        for (row, symbol) in self.matrix.symbols.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.bottom() {
                break;
            }
            buf.set_string(
                area.x,
                y,
                format!("{:<1$}", Self::short(symbol), LABEL_WIDTH as usize),
                label_style,
            );

            for col in 0..self.matrix.len() {
                let x = area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH;
                if x + CELL_WIDTH > area.right() {
                    break;
                }
                let (text, style) = match self.matrix.get(row, col) {
                    Some(corr) => (
                        format!("{:^1$}", format!("{corr:+.2}"), CELL_WIDTH as usize),
                        Style::default()
                            .fg(self.theme.text_primary)
                            .bg(self.theme.heat_color(corr)),
                    ),
                    None => (
                        format!("{:^1$}", "--", CELL_WIDTH as usize),
                        Style::default().fg(self.theme.muted),
                    ),
                };
                buf.set_string(x, y, text, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> CorrelationMatrix {
        CorrelationMatrix {
            symbols: vec!["AAPL".into(), "MSFT".into()],
            values: vec![
                vec![Some(1.0), Some(-0.5)],
                vec![Some(-0.5), None],
            ],
        }
    }

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        content
    }

    #[test]
    fn renders_values_and_undefined_cells() {
        let matrix = two_by_two();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        Heatmap::new(&matrix, &theme).render(area, &mut buf);

        let content = buffer_text(&buf, area);
        assert!(content.contains("+1.00"));
        assert!(content.contains("-0.50"));
        assert!(content.contains("--"));
        assert!(content.contains("AAPL"));
    }

    #[test]
    fn tiny_area_renders_without_panic() {
        let matrix = two_by_two();
        let theme = Theme::default();
        for (w, h) in [(0, 0), (3, 1), (8, 2), (12, 3)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            Heatmap::new(&matrix, &theme).render(area, &mut buf);
        }
    }

    #[test]
    fn wide_matrix_is_clipped_to_the_area() {
        let matrix = CorrelationMatrix {
            symbols: (0..20).map(|i| format!("SYM{i:02}")).collect(),
            values: vec![vec![Some(0.0); 20]; 20],
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        Heatmap::new(&matrix, &theme).render(area, &mut buf);
    }
}

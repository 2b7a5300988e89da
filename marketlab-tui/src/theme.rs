//! Neon-on-charcoal theme tokens for the dashboard.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (primary highlights, focus)
//! - **Positive**: Neon green (gains, advancing symbols)
//! - **Negative**: Hot pink (losses, declining symbols)
//! - **Warning**: Neon orange (fallback data, empty selection)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (positive returns, advancing)
    pub positive: Color,
    /// Hot pink (negative returns, declining)
    pub negative: Color,
    /// Neon orange (warnings, degraded data)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, key hints)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a signed return (non-negative = green, negative = pink).
    pub fn return_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Heatmap color for a correlation in [-1, 1]: pink at -1, charcoal
    /// near 0, green at +1.
    pub fn heat_color(&self, corr: f64) -> Color {
        let corr = corr.clamp(-1.0, 1.0);
        let (from, to) = if corr >= 0.0 {
            ((18u8, 18u8, 20u8), (0u8, 255u8, 128u8))
        } else {
            ((18u8, 18u8, 20u8), (255u8, 20u8, 147u8))
        };
        let t = corr.abs();
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::Rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    /// Line color for the n-th chart series, cycling the palette.
    pub fn series_color(&self, index: usize) -> Color {
        const CYCLE: usize = 6;
        match index % CYCLE {
            0 => self.accent,
            1 => self.positive,
            2 => self.warning,
            3 => self.neutral,
            4 => self.muted,
            _ => self.negative,
        }
    }
}

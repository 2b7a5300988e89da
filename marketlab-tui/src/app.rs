//! Application state — single-owner, main-thread only.
//!
//! The dataset is loaded once at startup and never mutated; the app holds
//! it together with the precomputed view models. Only the performance
//! view depends on user input (the symbol selection), so only its curves
//! are ever recomputed.

use std::collections::HashSet;

use marketlab_core::views::{
    correlation_matrix, cumulative_curves, home_summary, market_overview, volatility_ranking,
    CorrelationMatrix, HomeSummary, MarketOverview, SymbolCurve, ViewError, VolatilityRanking,
};
use marketlab_core::MarketData;

use crate::theme::Theme;

/// Which analysis view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Overview,
    Performance,
    Volatility,
    Correlation,
}

impl View {
    pub fn index(self) -> usize {
        match self {
            View::Home => 0,
            View::Overview => 1,
            View::Performance => 2,
            View::Volatility => 3,
            View::Correlation => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(View::Home),
            1 => Some(View::Overview),
            2 => Some(View::Performance),
            3 => Some(View::Volatility),
            4 => Some(View::Correlation),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Overview => "Market Overview",
            View::Performance => "Stock Performance",
            View::Volatility => "Volatility Analysis",
            View::Correlation => "Correlation Matrix",
        }
    }

    pub fn next(self) -> View {
        match self {
            View::Home => View::Overview,
            View::Overview => View::Performance,
            View::Performance => View::Volatility,
            View::Volatility => View::Correlation,
            View::Correlation => View::Home,
        }
    }

    pub fn prev(self) -> View {
        match self {
            View::Home => View::Correlation,
            View::Overview => View::Home,
            View::Performance => View::Overview,
            View::Volatility => View::Performance,
            View::Correlation => View::Volatility,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Where the session's dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Store,
    Synthetic,
}

pub struct App {
    pub data: MarketData,
    pub source: DataSource,
    pub view: View,
    pub theme: Theme,

    /// All symbols, dataset order.
    pub symbols: Vec<String>,
    /// Symbols shown on the performance chart.
    pub selected: HashSet<String>,
    /// Cursor into `symbols` for the performance selector.
    pub cursor: usize,

    pub status: Option<(String, StatusLevel)>,
    pub should_quit: bool,

    // Precomputed view models; the dataset is immutable so these never
    // go stale.
    pub home: Result<HomeSummary, ViewError>,
    pub overview: Result<MarketOverview, ViewError>,
    pub volatility: Result<VolatilityRanking, ViewError>,
    pub correlation: Result<CorrelationMatrix, ViewError>,
    /// Recomputed whenever the selection changes.
    pub curves: Result<Vec<SymbolCurve>, ViewError>,
}

/// Default number of symbols pre-selected on the performance view.
const DEFAULT_SELECTION: usize = 3;

impl App {
    pub fn new(data: MarketData, source: DataSource) -> Self {
        let symbols: Vec<String> = data.symbols().iter().map(|s| s.to_string()).collect();
        let selected: HashSet<String> = symbols.iter().take(DEFAULT_SELECTION).cloned().collect();

        let mut app = Self {
            home: home_summary(&data),
            overview: market_overview(&data),
            volatility: volatility_ranking(&data),
            correlation: correlation_matrix(&data),
            curves: Err(ViewError::EmptySelection),
            data,
            source,
            view: View::Home,
            theme: Theme::default(),
            symbols,
            selected,
            cursor: 0,
            status: None,
            should_quit: false,
        };
        app.refresh_curves();
        if source == DataSource::Synthetic {
            app.set_status(
                "store unavailable — showing synthetic demo data",
                StatusLevel::Warning,
            );
        }
        app
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some((message.into(), level));
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.set_status(view.label(), StatusLevel::Info);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if !self.symbols.is_empty() {
            self.cursor = (self.cursor + 1).min(self.symbols.len() - 1);
        }
    }

    /// Toggle the symbol under the cursor on the performance chart.
    pub fn toggle_selected(&mut self) {
        let Some(symbol) = self.symbols.get(self.cursor).cloned() else {
            return;
        };
        if !self.selected.remove(&symbol) {
            self.selected.insert(symbol);
        }
        self.refresh_curves();
    }

    pub fn select_all(&mut self) {
        self.selected = self.symbols.iter().cloned().collect();
        self.refresh_curves();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.refresh_curves();
    }

    /// Recompute the performance curves from the current selection,
    /// keeping the dataset's symbol order stable.
    pub fn refresh_curves(&mut self) {
        let ordered: Vec<String> = self
            .symbols
            .iter()
            .filter(|s| self.selected.contains(*s))
            .cloned()
            .collect();
        self.curves = cumulative_curves(&self.data, &ordered);
    }
}

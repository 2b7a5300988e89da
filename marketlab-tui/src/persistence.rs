//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{App, View};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub view_index: usize,
    pub selected_symbols: Vec<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            view_index: 0,
            selected_symbols: Vec::new(),
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from the app.
pub fn extract(app: &App) -> PersistedState {
    PersistedState {
        view_index: app.view.index(),
        selected_symbols: app.selected.iter().cloned().collect(),
    }
}

/// Apply persisted state to the app. Symbols no longer in the dataset
/// are dropped; an empty persisted selection keeps the default one.
pub fn apply(app: &mut App, state: PersistedState) {
    if let Some(view) = View::from_index(state.view_index) {
        app.view = view;
    }
    let known: Vec<String> = state
        .selected_symbols
        .into_iter()
        .filter(|s| app.symbols.contains(s))
        .collect();
    if !known.is_empty() {
        app.selected = known.into_iter().collect();
        app.refresh_curves();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DataSource;
    use marketlab_core::data::synthetic_prices;
    use marketlab_core::MarketData;

    fn sample_app() -> App {
        let data = MarketData::from_prices(synthetic_prices(42).unwrap()).unwrap();
        App::new(data, DataSource::Store)
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = PersistedState {
            view_index: 3,
            selected_symbols: vec!["AAPL".into(), "MSFT".into()],
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.view_index, 3);
        assert_eq!(loaded.selected_symbols.len(), 2);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.view_index, 0);
        assert!(loaded.selected_symbols.is_empty());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.selected_symbols.is_empty());
    }

    #[test]
    fn apply_drops_unknown_symbols_and_keeps_defaults_when_empty() {
        let mut app = sample_app();
        apply(
            &mut app,
            PersistedState {
                view_index: 4,
                selected_symbols: vec!["AAPL".into(), "ZZZZ".into()],
            },
        );
        assert_eq!(app.view, View::Correlation);
        assert_eq!(app.selected.len(), 1);
        assert!(app.selected.contains("AAPL"));

        let mut app = sample_app();
        let default_len = app.selected.len();
        apply(&mut app, PersistedState::default());
        assert_eq!(app.selected.len(), default_len);
    }

    #[test]
    fn out_of_range_view_index_is_ignored() {
        let mut app = sample_app();
        apply(
            &mut app,
            PersistedState {
                view_index: 99,
                selected_symbols: Vec::new(),
            },
        );
        assert_eq!(app.view, View::Home);
    }
}

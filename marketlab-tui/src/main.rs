//! Market analysis TUI — five-view dashboard with vim-style navigation.
//!
//! Views:
//! 1. Home — headline metrics and the latest session's returns
//! 2. Market Overview — breadth counts and top performers
//! 3. Stock Performance — cumulative-return curves for selected symbols
//! 4. Volatility Analysis — most volatile symbols ranked
//! 5. Correlation Matrix — pairwise close-price correlation heatmap
//!
//! Prices come from the configured store; if it cannot be opened or
//! holds no rows, a seeded synthetic dataset keeps the dashboard usable.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use marketlab_core::data::synthetic_prices;
use marketlab_core::{Config, MarketData, MarketStore};

use crate::app::{App, DataSource, StatusLevel};

/// Seed for the fallback dataset; fixed so restarts show the same demo.
const FALLBACK_SEED: u64 = 42;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())?;

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marketlab")
        .join("state.json");
    let persisted = persistence::load(&state_path);

    let (data, source, warning) = load_data(&config)?;
    let mut app = App::new(data, source);
    if let Some(message) = warning {
        app.set_status(message, StatusLevel::Warning);
    }
    persistence::apply(&mut app, persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let _ = persistence::save(&state_path, &persistence::extract(&app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for input events (100ms timeout keeps the loop responsive).
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Load prices from the store, falling back to synthetic data when the
/// store cannot be opened or is empty.
fn load_data(config: &Config) -> Result<(MarketData, DataSource, Option<String>)> {
    match load_from_store(config) {
        Ok(data) if !data.is_empty() => Ok((data, DataSource::Store, None)),
        Ok(_) => synthetic_fallback("store holds no price rows".to_string()),
        Err(err) => synthetic_fallback(err.to_string()),
    }
}

fn load_from_store(config: &Config) -> Result<MarketData> {
    let store = MarketStore::open(&config.store)?;
    let prices = store.load_prices()?;
    Ok(MarketData::from_prices(prices)?)
}

fn synthetic_fallback(reason: String) -> Result<(MarketData, DataSource, Option<String>)> {
    let data = MarketData::from_prices(synthetic_prices(FALLBACK_SEED)?)?;
    let warning = format!("using synthetic data: {reason}");
    Ok((data, DataSource::Synthetic, Some(warning)))
}

//! Keyboard input dispatch — global keys first, then view-specific keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};

/// Handle a key event.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Global keys (always available).
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Char('1') => {
            app.set_view(View::Home);
            return;
        }
        KeyCode::Char('2') => {
            app.set_view(View::Overview);
            return;
        }
        KeyCode::Char('3') => {
            app.set_view(View::Performance);
            return;
        }
        KeyCode::Char('4') => {
            app.set_view(View::Volatility);
            return;
        }
        KeyCode::Char('5') => {
            app.set_view(View::Correlation);
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.set_view(app.view.prev());
            } else {
                app.set_view(app.view.next());
            }
            return;
        }
        KeyCode::BackTab => {
            app.set_view(app.view.prev());
            return;
        }
        _ => {}
    }

    // View-specific keys; only the performance view takes input.
    if app.view == View::Performance {
        handle_performance_key(app, key);
    }
}

fn handle_performance_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor_up(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('c') => app.clear_selection(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DataSource;
    use marketlab_core::data::synthetic_prices;
    use marketlab_core::MarketData;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_app() -> App {
        let data = MarketData::from_prices(synthetic_prices(42).unwrap()).unwrap();
        App::new(data, DataSource::Store)
    }

    #[test]
    fn q_quits() {
        let mut app = sample_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn digits_jump_to_views() {
        let mut app = sample_app();
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.view, View::Volatility);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view, View::Correlation);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.view, View::Volatility);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = sample_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(!app.should_quit);
    }

    #[test]
    fn selection_keys_only_act_on_the_performance_view() {
        let mut app = sample_app();
        let before = app.selected.len();

        // On home, space does nothing.
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(app.selected.len(), before);

        app.set_view(View::Performance);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, press(KeyCode::Char('c')));
        assert!(app.selected.is_empty());
        handle_key(&mut app, press(KeyCode::Char('a')));
        assert_eq!(app.selected.len(), app.symbols.len());
    }
}

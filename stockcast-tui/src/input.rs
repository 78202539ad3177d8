//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Tickers; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::History; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Forecast; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Components; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Tickers => handle_tickers_key(app, key),
        Panel::History => handle_history_key(app, key),
        Panel::Forecast => handle_forecast_key(app, key),
        Panel::Components => {} // display only
        Panel::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_tickers_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.tickers.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.tickers.move_up(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(ticker) = app.tickers.cursor_ticker() {
                app.tickers.selected = Some(ticker.to_string());
                app.history_window.reset();
                app.forecast_window.reset();
                app.request_forecast(false);
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            if app.adjust_horizon(-1) && app.tickers.selected.is_some() {
                app.request_forecast(false);
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.adjust_horizon(1) && app.tickers.selected.is_some() {
                app.request_forecast(false);
            }
        }
        KeyCode::Char('r') => {
            if app.tickers.selected.is_some() {
                app.request_forecast(true);
            }
        }
        _ => {}
    }
}

fn handle_history_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.history_window.pan_left(),
        KeyCode::Char('l') | KeyCode::Right => app.history_window.pan_right(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.history_window.zoom_in(),
        KeyCode::Char('-') => app.history_window.zoom_out(),
        KeyCode::Char('0') => app.history_window.reset(),
        _ => {}
    }
}

fn handle_forecast_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.forecast_window.pan_left(),
        KeyCode::Char('l') | KeyCode::Right => app.forecast_window.pan_right(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.forecast_window.zoom_in(),
        KeyCode::Char('-') => app.forecast_window.zoom_out(),
        KeyCode::Char('0') => app.forecast_window.reset(),
        _ => {}
    }
}

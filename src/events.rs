use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::warn;

use crate::app::{App, View, EXPORT_PATH};
use crate::ui::{common::tab_at, TABS_ROW};

/// Radians per rotate/tilt keypress.
const ROTATE_STEP: f64 = 0.1;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Dispatch a terminal event to the app.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        // Terminal will redraw on next iteration
        _ => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Globe),
        KeyCode::Char('2') => app.set_view(View::Table),

        // Camera (globe) or row navigation (table)
        KeyCode::Left | KeyCode::Char('h') if app.current_view == View::Globe => {
            app.camera.rotate_by(-ROTATE_STEP)
        }
        KeyCode::Right | KeyCode::Char('l') if app.current_view == View::Globe => {
            app.camera.rotate_by(ROTATE_STEP)
        }
        KeyCode::Up | KeyCode::Char('k') => match app.current_view {
            View::Globe => app.camera.tilt_by(ROTATE_STEP),
            View::Table => app.select_prev(),
        },
        KeyCode::Down | KeyCode::Char('j') => match app.current_view {
            View::Globe => app.camera.tilt_by(-ROTATE_STEP),
            View::Table => app.select_next(),
        },
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Char('+') | KeyCode::Char('=') => app.camera.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.camera.zoom_out(),
        KeyCode::Char(' ') => app.camera.toggle_spin(),

        // Water-level range
        KeyCode::Char('[') => app.shift_range_min(-1.0),
        KeyCode::Char(']') => app.shift_range_min(1.0),
        KeyCode::Char('{') => app.shift_range_max(-1.0),
        KeyCode::Char('}') => app.shift_range_max(1.0),
        KeyCode::Char('r') => {
            app.reset_filters();
            app.set_status_message("Filters reset".to_string());
        }

        // Selection
        KeyCode::Enter if app.current_view == View::Table => app.select_table_row(),
        KeyCode::Esc | KeyCode::Backspace => app.clear_selection(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Sorting (table)
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.toggle_sort_direction(),

        // Search
        KeyCode::Char('/') => {
            app.set_view(View::Table);
            app.start_filter();
        }
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    warn!(error = %e, "export failed");
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => match app.current_view {
            View::Globe => app.camera.zoom_in(),
            View::Table => app.select_prev(),
        },
        MouseEventKind::ScrollDown => match app.current_view {
            View::Globe => app.camera.zoom_out(),
            View::Table => app.select_next(),
        },

        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == TABS_ROW {
                if let Some(view) = tab_at(mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            match app.current_view {
                View::Globe => {
                    app.click_globe(mouse.column, mouse.row);
                }
                View::Table => {
                    app.click_table(mouse.column, mouse.row);
                }
            }
        }

        // Right-click clears the selection
        MouseEventKind::Down(MouseButton::Right) => app.clear_selection(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, ThemeChoice};
    use crate::source::GeneratedSource;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;

    fn app() -> App {
        let settings = Settings {
            theme: ThemeChoice::Dark,
            range_step: 10.0,
            ..Settings::default()
        };
        let mut app = App::new(Box::new(GeneratedSource::new(30, Some(5))), &settings);
        app.reload_data().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_range_keys_and_reset() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char(']')));
        handle_key_event(&mut app, key(KeyCode::Char('{')));
        assert_eq!(app.range.min(), 10.0);
        assert_eq!(app.range.max(), 90.0);

        app.select_point("gw-0001");
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert!(app.range.is_full());
        assert!(app.selected_id.is_none());
    }

    #[test]
    fn test_camera_keys() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert!(!app.camera.spinning);

        handle_key_event(&mut app, key(KeyCode::Right));
        assert!((app.camera.rotation - ROTATE_STEP).abs() < 1e-9);

        let distance = app.camera.distance;
        handle_key_event(&mut app, key(KeyCode::Char('+')));
        assert!(app.camera.distance < distance);
    }

    #[test]
    fn test_table_enter_selects_and_esc_clears() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.selected_id.as_deref(), Some("gw-0001"));

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.selected_id.is_none());
    }

    #[test]
    fn test_search_input() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.current_view, View::Table);
        assert!(app.filter_active);

        for c in "0002".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        // Typed keys go to the search, not the key bindings
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.filter_active);
        assert_eq!(app.table_points().len(), 1);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_click_tabs() {
        let mut app = app();
        handle_mouse_event(&mut app, click(14, TABS_ROW));
        assert_eq!(app.current_view, View::Table);
        handle_mouse_event(&mut app, click(2, TABS_ROW));
        assert_eq!(app.current_view, View::Globe);
    }

    #[test]
    fn test_click_table_row_selects_point() {
        let mut app = app();
        app.set_view(View::Table);
        app.table_area = Rect::new(1, 3, 60, 20);
        handle_mouse_event(&mut app, click(10, 4 + 2));
        assert_eq!(app.selected_id.as_deref(), Some("gw-0002"));
    }
}

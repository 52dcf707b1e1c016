use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// File written by the export key.
pub const EXPORT_FILE: &str = "fleet_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Overlay open: step through buoys or close
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Fleet),
        KeyCode::Char('3') => app.set_view(View::Map),

        // Up/down for buoys, left/right for tabs
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.inspect_selected(),

        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => {
            if let Err(e) = app.reload_data() {
                tracing::warn!(error = %e, "manual reload failed");
            }
        }

        KeyCode::Char('?') => app.toggle_help(),

        // Sorting only applies to the Buoys view
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.toggle_sort_direction(),

        KeyCode::Char('/') => {
            if app.current_view == View::Fleet {
                app.start_filter();
            }
        }

        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
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
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Keep text but exit input mode
        KeyCode::Esc => {
            app.cancel_filter();
        }

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

/// Right edge of each tab as rendered by `render_tabs` (padding and divider included).
const TAB_EDGES: [(u16, View); 3] = [(15, View::Overview), (27, View::Fleet), (36, View::Map)];

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Buoys table rows start below the border and column header
            if app.current_view == View::Fleet && clicked_row > content_start_row + 1 {
                let item_row =
                    app.fleet_table_offset + (clicked_row - content_start_row - 2) as usize;
                if item_row < app.visible_devices().len() {
                    app.selected_index = item_row;
                }
            }

            if clicked_row == 1 {
                if let Some((_, view)) = TAB_EDGES.iter().find(|(edge, _)| mouse.column < *edge) {
                    app.set_view(*view);
                }
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Thresholds;
    use crate::source::StaticSource;
    use crate::ui::Theme;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn app() -> App {
        let mut app =
            App::with_theme(Box::new(StaticSource::mock()), Thresholds::default(), Theme::dark());
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

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, key(code));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        handle_mouse_event(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            2,
        );
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_view, View::Map);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_view, View::Fleet);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Map);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_view, View::Fleet);
    }

    #[test]
    fn test_enter_inspects_and_arrows_move_within_overlay() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        assert!(app.show_detail_overlay);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_device().map(|d| d.id()), Some("BOY-002"));
        // Views do not change while the overlay is open
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_view, View::Map);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_filter_typing_captures_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert!(app.filter_active);

        for c in "gulf".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' while typing is text, not quit
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "gulf");
        assert_eq!(app.visible_devices().len(), 1);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_tab_click_and_row_click() {
        let mut app = app();
        click(&mut app, 15, 1);
        assert_eq!(app.current_view, View::Fleet);

        // Row 2 is the table border, row 3 the column header
        click(&mut app, 5, 6);
        assert_eq!(app.selected_index, 2);
        click(&mut app, 5, 40);
        assert_eq!(app.selected_index, 2);

        click(&mut app, 30, 1);
        assert_eq!(app.current_view, View::Map);
    }

    #[test]
    fn test_row_click_accounts_for_scrolled_table() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        app.fleet_table_offset = 2;

        // First visible row now shows the third buoy
        click(&mut app, 5, 4);
        assert_eq!(app.selected_index, 2);
        click(&mut app, 5, 6);
        assert_eq!(app.selected_index, 4);
    }
}

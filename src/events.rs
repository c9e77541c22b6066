use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

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

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through services while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('r') => app.retry(),
            _ => {}
        }
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
        KeyCode::Char('1') => app.set_view(View::Services),
        KeyCode::Char('2') => app.set_view(View::Incidents),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Retry / refresh now
        KeyCode::Char('r') => app.retry(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("status_export.json");
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

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tabs sit on row 1, below the header: " 1:Services " | " 2:Incidents "
            if clicked_row == 1 {
                if mouse.column < 13 {
                    app.set_view(View::Services);
                } else if mouse.column < 29 {
                    app.set_view(View::Incidents);
                }
                return;
            }

            // Service rows follow the table header; each row is one line
            if app.current_view == View::Services && clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                let count = app.data.as_ref().map(|d| d.services.len()).unwrap_or(0);
                if item_row < count {
                    app.selected_service_index = item_row;
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DisplayOptions;
    use crate::source::fixtures::summary_json;
    use crate::source::{ChannelSource, RefreshOutcome, StatusSnapshot};
    use crate::ui::Theme;
    use chrono::Local;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(Box::new(source), DisplayOptions::default(), Theme::dark());
        let snapshot = StatusSnapshot::new(serde_json::from_str(summary_json()).unwrap(), vec![]);
        app.apply_outcome(RefreshOutcome::Ready(snapshot), Local::now().date_naive());
        app
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = ready_app();

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_service_index, 1);
        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected_service_index, 0);

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Incidents);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.current_view, View::Services);
    }

    #[test]
    fn test_overlay_keys() {
        let mut app = ready_app();

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);

        // 'q' closes the overlay rather than quitting
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_detail_overlay);
        assert!(app.running);

        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_retry_key_sets_message() {
        let mut app = ready_app();
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
    }
}

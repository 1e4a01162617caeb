use ratatui::crossterm::event::{KeyCode, KeyEvent};

use crate::terminal::state::{Action, AppState, Focus};

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        KeyCode::Tab => {
            state.toggle_focus();
            return None;
        }

        KeyCode::Char('s') => return state.request_summary(),

        KeyCode::Char('r') => return state.reload(),

        _ => {}
    }

    match state.focus {
        Focus::List => handle_list_keys(key, state),
        Focus::Summary => handle_summary_keys(key, state),
    }
    None
}

fn handle_list_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => state.move_selection(i32::MIN / 2),
        KeyCode::End => state.move_selection(i32::MAX / 2),
        _ => {}
    }
}

fn handle_summary_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_summary(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_summary(-1),
        KeyCode::PageDown => state.scroll_summary(10),
        KeyCode::PageUp => state.scroll_summary(-10),
        KeyCode::Home => state.summary_scroll = 0,
        _ => {}
    }
}

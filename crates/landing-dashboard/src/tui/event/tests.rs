use super::*;
use crate::tui::test_utils::{make_app, make_key, make_key_with};

#[test]
fn test_event_handler_creation() {
    let handler = EventHandler::new(Duration::from_millis(250));
    assert_eq!(handler.tick_rate(), Duration::from_millis(250));
    assert!(handler.tick.is_none());
}

#[test]
fn test_zero_tick_rate_is_raised() {
    let handler = EventHandler::new(Duration::ZERO);
    assert_eq!(handler.tick_rate(), MIN_TICK_RATE);
}

#[test]
fn test_view_mode_bindings() {
    let mut app = make_app();
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('q'))), Action::Quit);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('e'))), Action::ToggleEditMode);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Tab)), Action::NextGoldTab);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('t'))), Action::NextGoldTab);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('r'))), Action::RefreshGold);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('n'))), Action::FocusNotes);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Esc)), Action::None);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('x'))), Action::None);
}

#[test]
fn test_edit_mode_bindings() {
    let mut app = make_app();
    app.toggle_edit_mode();
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Esc)), Action::ToggleEditMode);
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('n'))), Action::None);
}

#[test]
fn test_ctrl_c_quits_while_typing_notes() {
    let mut app = make_app();
    app.notes_focused = true;
    let action = handle_key_event(&mut app, make_key_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(action, Action::Quit);
    assert_eq!(app.dashboard.notes(), "");
}

#[test]
fn test_q_is_typed_while_notes_focused() {
    let mut app = make_app();
    app.notes_focused = true;
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Char('q'))), Action::None);
    assert_eq!(app.dashboard.notes(), "q");
    assert!(app.notes_focused);
}

#[test]
fn test_notes_keys_edit_text() {
    let mut app = make_app();
    app.notes_focused = true;
    for code in [KeyCode::Char('e'), KeyCode::Char('g'), KeyCode::Char('g'), KeyCode::Backspace] {
        assert_eq!(handle_key_event(&mut app, make_key(code)), Action::None);
    }
    assert_eq!(app.dashboard.notes(), "eg");
    assert!(!app.dashboard.is_edit_mode(), "e is text while typing");
}

#[test]
fn test_notes_ignore_alt_chords() {
    let mut app = make_app();
    app.notes_focused = true;
    handle_key_event(&mut app, make_key_with(KeyCode::Char('x'), KeyModifiers::ALT));
    assert_eq!(app.dashboard.notes(), "");
}

#[test]
fn test_shifted_characters_are_typed() {
    let mut app = make_app();
    app.notes_focused = true;
    handle_key_event(&mut app, make_key_with(KeyCode::Char('A'), KeyModifiers::SHIFT));
    assert_eq!(app.dashboard.notes(), "A");
}

#[test]
fn test_backspace_on_empty_notes_is_harmless() {
    let mut app = make_app();
    app.notes_focused = true;
    handle_key_event(&mut app, make_key(KeyCode::Backspace));
    assert_eq!(app.dashboard.notes(), "");
    assert!(app.status_message.is_none());
}

#[test]
fn test_esc_leaves_notes() {
    let mut app = make_app();
    app.notes_focused = true;
    assert_eq!(handle_key_event(&mut app, make_key(KeyCode::Esc)), Action::None);
    assert!(!app.notes_focused);
}

//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content, asserting colors, and building apps over an in-memory store.

#![cfg(test)]

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::store::MemoryStore;
use crate::tui::app::App;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_contains(buffer, row, text))
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// App with the default configuration over an empty in-memory store.
///
/// The container is 80x24, matching an 80x25 terminal minus the footer.
pub fn make_app() -> App<MemoryStore> {
    make_app_with_store(MemoryStore::new())
}

/// App with the default configuration over `store`.
pub fn make_app_with_store(store: MemoryStore) -> App<MemoryStore> {
    let config = Config::default();
    let dashboard = Dashboard::load(config.build_widgets(), store);
    App::new(dashboard, &config, Duration::from_millis(250))
}

/// Key press without modifiers.
pub fn make_key(code: KeyCode) -> KeyEvent {
    make_key_with(code, KeyModifiers::NONE)
}

/// Key press with modifiers.
pub fn make_key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Mouse event at a cell.
pub fn make_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Left-button press, drag to `to`, release.
pub fn drag(app: &mut App<MemoryStore>, from: (u16, u16), to: (u16, u16)) {
    app.handle_mouse_event(make_mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1));
    app.handle_mouse_event(make_mouse(MouseEventKind::Drag(MouseButton::Left), to.0, to.1));
    app.handle_mouse_event(make_mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1));
}

//! Headless dashboard model.
//!
//! Owns the widgets, the edit mode flag, the interaction controller, the
//! notes text and the store, and routes pointer and mode events between
//! them. The TUI holds one of these and only translates terminal events and
//! renders its state.

use tracing::{debug, warn};

use crate::edit_mode::{EditMode, ModeTransition};
use crate::interaction::{self, HitTarget, InteractionController, PointerEvent, PointerOutcome};
use crate::layout::{apply_layout, Point, Size, Widget, WidgetKey};
use crate::store::{self, KeyValueStore, StoreError};

/// Container size assumed until the first render reports the real one.
pub const DEFAULT_CONTAINER: Size = Size::new(80.0, 24.0);

/// Widgets, mode, interaction state and persistence in one place.
#[derive(Debug)]
pub struct Dashboard<S: KeyValueStore> {
    widgets: Vec<Widget>,
    edit_mode: EditMode,
    controller: InteractionController,
    notes: String,
    store: S,
    container: Size,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Builds the dashboard and restores notes and geometry from `store`.
    pub fn load(widgets: Vec<Widget>, store: S) -> Self {
        let mut dashboard = Self {
            widgets,
            edit_mode: EditMode::default(),
            controller: InteractionController::new(),
            notes: String::new(),
            store,
            container: DEFAULT_CONTAINER,
        };
        dashboard.restore();
        dashboard
    }

    /// Re-reads notes and geometry from the store.
    pub fn restore(&mut self) {
        self.notes = store::load_notes(&self.store);
        let snapshot = store::load_snapshot(&self.store);
        apply_layout(&mut self.widgets, snapshot.as_ref());
        debug!(
            widgets = self.widgets.len(),
            restored = snapshot.is_some(),
            "layout initialized"
        );
    }

    /// Widgets in paint order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Widget with the given key.
    pub fn widget(&self, key: &WidgetKey) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.key == key)
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Size the widgets are laid out in.
    pub fn container(&self) -> Size {
        self.container
    }

    /// Updates the layout container, e.g. after a terminal resize.
    pub fn set_container(&mut self, size: Size) {
        self.container = size;
    }

    /// Whether edit mode is on.
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode.is_active()
    }

    /// Whether a drag or resize is in progress.
    pub fn is_interacting(&self) -> bool {
        self.controller.is_active()
    }

    /// What `point` lands on.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        interaction::hit_test(&self.widgets, self.container, point)
    }

    /// Flips edit mode and commits on exit.
    ///
    /// The mode changes even when the commit fails; the error is returned so
    /// the caller can report it.
    pub fn toggle_edit_mode(&mut self) -> Result<ModeTransition, StoreError> {
        let transition = self.edit_mode.toggle(&mut self.widgets, self.container);
        if transition == ModeTransition::Exited {
            self.commit()?;
        }
        Ok(transition)
    }

    /// Pointer pressed at `point`.
    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        let event = PointerEvent {
            point,
            target: self.hit_test(point),
        };
        self.controller.pointer_down(
            self.edit_mode.is_active(),
            &event,
            &self.widgets,
            self.container,
        )
    }

    /// Pointer moved to `point`.
    pub fn pointer_move(&mut self, point: Point) -> PointerOutcome {
        self.controller
            .pointer_move(self.edit_mode.is_active(), point, &mut self.widgets)
    }

    /// Pointer released; commits when a session ended.
    pub fn pointer_up(&mut self) -> Result<PointerOutcome, StoreError> {
        let outcome = self.controller.pointer_up();
        if outcome == PointerOutcome::Commit {
            self.commit()?;
        }
        Ok(outcome)
    }

    /// Writes the full geometry snapshot to the store.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        store::commit(&self.widgets, &mut self.store).map_err(|e| {
            warn!(error = %e, "layout commit failed");
            e
        })
    }

    /// Current notes text.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replaces the notes text and saves it immediately.
    pub fn set_notes(&mut self, text: impl Into<String>) -> Result<(), StoreError> {
        self.notes = text.into();
        store::save_notes(&mut self.store, &self.notes)
    }

    /// Appends a character to the notes and saves.
    pub fn push_note_char(&mut self, c: char) -> Result<(), StoreError> {
        self.notes.push(c);
        store::save_notes(&mut self.store, &self.notes)
    }

    /// Removes the last character of the notes and saves.
    pub fn pop_note_char(&mut self) -> Result<(), StoreError> {
        if self.notes.pop().is_none() {
            return Ok(());
        }
        store::save_notes(&mut self.store, &self.notes)
    }
}

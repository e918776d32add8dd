//! Edit mode switch.
//!
//! Entering edit mode pins every widget to absolute cell literals taken from
//! its rendered bounding box and drops any centering transform, so the
//! interaction deltas act on plain offsets. The collapse is one-way: a
//! centered widget stays at its absolute position from then on.

use tracing::info;

use crate::layout::{Size, StyleLength, Transform, Widget};

/// Direction of the last toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// View mode to edit mode.
    Entered,
    /// Edit mode to view mode; the caller commits.
    Exited,
}

/// Global edit mode flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    active: bool,
}

impl EditMode {
    /// Whether edit mode is on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flips the mode, normalizing geometry on entry.
    pub fn toggle(&mut self, widgets: &mut [Widget], container: Size) -> ModeTransition {
        self.active = !self.active;
        if self.active {
            normalize_geometry(widgets, container);
            info!("edit mode on");
            ModeTransition::Entered
        } else {
            info!("edit mode off");
            ModeTransition::Exited
        }
    }
}

/// Rewrites every widget's style as the `px` literals of its bounding box
/// and clears the transform. The rendered box does not move.
pub fn normalize_geometry(widgets: &mut [Widget], container: Size) {
    for widget in widgets.iter_mut() {
        let rect = widget.bounding_box(container);
        widget.style.left = StyleLength::px(rect.x);
        widget.style.top = StyleLength::px(rect.y);
        widget.style.width = StyleLength::px(rect.width);
        widget.style.height = StyleLength::px(rect.height);
        widget.style.transform = Transform::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{apply_defaults, Placement};

    const CONTAINER: Size = Size::new(80.0, 24.0);

    fn centered(width: &str, height: &str) -> Widget {
        let mut w = Widget::new(
            "clock",
            "clock",
            "Clock",
            Placement {
                x: "center".into(),
                y: "center".into(),
                width: width.into(),
                height: height.into(),
            },
        );
        apply_defaults(&mut w);
        w
    }

    #[test]
    fn entering_normalizes_centered_widget() {
        let mut widgets = vec![centered("25px", "7px")];
        let before = widgets[0].bounding_box(CONTAINER);
        let mut mode = EditMode::default();

        assert_eq!(mode.toggle(&mut widgets, CONTAINER), ModeTransition::Entered);
        assert!(mode.is_active());

        let s = &widgets[0].style;
        assert_eq!(s.left.as_str(), "27.5px");
        assert_eq!(s.top.as_str(), "8.5px");
        assert_eq!(s.width.as_str(), "25px");
        assert_eq!(s.height.as_str(), "7px");
        assert_eq!(s.transform, Transform::None);
        assert_eq!(widgets[0].bounding_box(CONTAINER), before);
    }

    #[test]
    fn exiting_keeps_absolute_geometry() {
        let mut widgets = vec![centered("20px", "6px")];
        let mut mode = EditMode::default();
        mode.toggle(&mut widgets, CONTAINER);
        let pinned = widgets[0].style.clone();

        assert_eq!(mode.toggle(&mut widgets, CONTAINER), ModeTransition::Exited);
        assert!(!mode.is_active());
        assert_eq!(widgets[0].style, pinned);
    }

    #[test]
    fn reentering_is_stable() {
        let mut widgets = vec![centered("20px", "6px")];
        let mut mode = EditMode::default();
        mode.toggle(&mut widgets, CONTAINER);
        let first = widgets[0].style.clone();
        mode.toggle(&mut widgets, CONTAINER);
        mode.toggle(&mut widgets, CONTAINER);
        assert_eq!(widgets[0].style, first);
    }

    #[test]
    fn normalize_resolves_percent_sizes() {
        let mut w = Widget::new("n", "notes", "Notes", Placement::default());
        w.style.left = "10%".into();
        w.style.top = "0px".into();
        w.style.width = "50%".into();
        w.style.height = "".into();
        let mut widgets = vec![w];
        normalize_geometry(&mut widgets, CONTAINER);
        let s = &widgets[0].style;
        assert_eq!(s.left.as_str(), "8px");
        assert_eq!(s.width.as_str(), "40px");
        assert_eq!(s.height.as_str(), "8px");
    }
}

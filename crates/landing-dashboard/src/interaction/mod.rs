//! Drag and resize driven by pointer events.
//!
//! The controller owns at most one [`InteractionSession`]. Pointer-down
//! starts one (resize affordance first, then header), pointer-move mutates
//! the subject's in-memory style and pointer-up ends it and asks the caller
//! to commit. Nothing here touches the store; [`PointerOutcome::Commit`] is
//! the only signal that persistence is due.

use tracing::{debug, trace};

use crate::layout::{Point, Size, StyleLength, Widget, WidgetKey};

/// What a pointer position lands on, topmost widget first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The bottom-right resize affordance of a widget.
    ResizeHandle(WidgetKey),
    /// The header row of a widget.
    Header(WidgetKey),
    /// Anywhere else inside a widget.
    Body(WidgetKey),
    /// Outside every widget.
    Background,
}

impl HitTarget {
    /// Widget the target belongs to, if any.
    pub fn widget(&self) -> Option<&WidgetKey> {
        match self {
            HitTarget::ResizeHandle(k) | HitTarget::Header(k) | HitTarget::Body(k) => Some(k),
            HitTarget::Background => None,
        }
    }
}

/// Classifies `point` against the rendered widgets.
///
/// Later widgets paint over earlier ones, so they are tested first. The
/// resize affordance is the bottom-right cell; the header is the top row.
pub fn hit_test(widgets: &[Widget], container: Size, point: Point) -> HitTarget {
    let (px, py) = (point.x.floor(), point.y.floor());
    for widget in widgets.iter().rev() {
        let rect = widget.bounding_box(container).snapped();
        if !rect.contains_cell(point) {
            continue;
        }
        let key = widget.key.clone();
        if px == rect.x + rect.width - 1.0 && py == rect.y + rect.height - 1.0 {
            return HitTarget::ResizeHandle(key);
        }
        if py == rect.y {
            return HitTarget::Header(key);
        }
        return HitTarget::Body(key);
    }
    HitTarget::Background
}

/// A pointer event after hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub point: Point,
    /// What the position landed on.
    pub target: HitTarget,
}

/// The geometry captured when a session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionKind {
    /// Moving by the header; initial offsets.
    Drag {
        /// Left offset at pointer-down.
        left: f64,
        /// Top offset at pointer-down.
        top: f64,
    },
    /// Resizing by the corner; initial rendered size.
    Resize {
        /// Rendered width at pointer-down.
        width: f64,
        /// Rendered height at pointer-down.
        height: f64,
    },
}

/// One drag or resize gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSession {
    /// Widget being manipulated.
    pub subject: WidgetKey,
    /// Gesture kind with its starting geometry.
    pub kind: SessionKind,
    /// Pointer position at pointer-down.
    pub origin: Point,
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing happened.
    Ignored,
    /// A session started; the default action of the event is suppressed.
    PreventDefault,
    /// The subject's geometry changed.
    Updated,
    /// A session ended; the full snapshot should be committed.
    Commit,
}

/// Pointer state machine for drag and resize.
#[derive(Debug, Default)]
pub struct InteractionController {
    session: Option<InteractionSession>,
}

impl InteractionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a session when the target qualifies and edit mode is on.
    ///
    /// Resize captures the rendered size from the bounding box; drag
    /// captures the leading numbers of the current `left`/`top` literals
    /// (0 when unset).
    pub fn pointer_down(
        &mut self,
        edit_mode: bool,
        event: &PointerEvent,
        widgets: &[Widget],
        container: Size,
    ) -> PointerOutcome {
        if !edit_mode {
            return PointerOutcome::Ignored;
        }
        let (key, resize) = match &event.target {
            HitTarget::ResizeHandle(key) => (key, true),
            HitTarget::Header(key) => (key, false),
            HitTarget::Body(_) | HitTarget::Background => return PointerOutcome::Ignored,
        };
        let Some(widget) = widgets.iter().find(|w| &w.key == key) else {
            return PointerOutcome::Ignored;
        };

        let kind = if resize {
            let rect = widget.bounding_box(container);
            SessionKind::Resize {
                width: rect.width,
                height: rect.height,
            }
        } else {
            SessionKind::Drag {
                left: widget.style.left.leading_number(),
                top: widget.style.top.leading_number(),
            }
        };
        debug!(widget = %key, ?kind, "interaction started");
        self.session = Some(InteractionSession {
            subject: key.clone(),
            kind,
            origin: event.point,
        });
        PointerOutcome::PreventDefault
    }

    /// Applies the pointer delta to the subject, unclamped.
    pub fn pointer_move(&mut self, edit_mode: bool, point: Point, widgets: &mut [Widget]) -> PointerOutcome {
        if !edit_mode {
            return PointerOutcome::Ignored;
        }
        let Some(session) = &self.session else {
            return PointerOutcome::Ignored;
        };
        let Some(widget) = widgets.iter_mut().find(|w| w.key == session.subject) else {
            return PointerOutcome::Ignored;
        };

        let dx = point.x - session.origin.x;
        let dy = point.y - session.origin.y;
        match session.kind {
            SessionKind::Drag { left, top } => {
                widget.style.left = StyleLength::px(left + dx);
                widget.style.top = StyleLength::px(top + dy);
            }
            SessionKind::Resize { width, height } => {
                widget.style.width = StyleLength::px(width + dx);
                widget.style.height = StyleLength::px(height + dy);
            }
        }
        trace!(widget = %session.subject, dx, dy, "interaction moved");
        PointerOutcome::Updated
    }

    /// Ends the session, whatever the current mode.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        match self.session.take() {
            Some(session) => {
                debug!(widget = %session.subject, "interaction ended");
                PointerOutcome::Commit
            }
            None => PointerOutcome::Ignored,
        }
    }
}

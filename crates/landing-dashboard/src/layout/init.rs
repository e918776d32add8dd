//! Startup geometry resolution.
//!
//! Every widget gets exactly one source of truth: its stored record when the
//! snapshot has one for its key, its declared defaults otherwise.

use tracing::debug;

use super::geometry::{StyleLength, Transform};
use super::widget::{AxisSpec, Widget};
use crate::store::{GeometrySnapshot, LayoutRecord};

/// Applies stored geometry or defaults to every widget.
///
/// `None` covers both "nothing stored" and "stored value was malformed".
/// Snapshot entries for keys with no matching widget are ignored.
pub fn apply_layout(widgets: &mut [Widget], snapshot: Option<&GeometrySnapshot>) {
    for widget in widgets.iter_mut() {
        match snapshot.and_then(|s| s.get(&widget.key)) {
            Some(record) => {
                debug!(widget = %widget.key, "restoring stored geometry");
                apply_record(widget, record);
            }
            None => apply_defaults(widget),
        }
    }
}

/// Sets the four edges verbatim from a stored record and clears the
/// transform.
pub fn apply_record(widget: &mut Widget, record: &LayoutRecord) {
    widget.style.left = record.left.clone();
    widget.style.top = record.top.clone();
    widget.style.width = record.width.clone();
    widget.style.height = record.height.clone();
    widget.style.transform = Transform::None;
}

/// Resolves a widget's declared placement into its style.
///
/// A centered axis becomes `50%` plus the matching translate component;
/// centering both axes yields the combined translate.
pub fn apply_defaults(widget: &mut Widget) {
    let placement = &widget.placement;
    let mut transform = Transform::None;

    let left = match &placement.x {
        AxisSpec::Centered => {
            transform = transform.with_x();
            StyleLength::percent(50.0)
        }
        AxisSpec::Literal(v) => v.clone(),
    };
    let top = match &placement.y {
        AxisSpec::Centered => {
            transform = transform.with_y();
            StyleLength::percent(50.0)
        }
        AxisSpec::Literal(v) => v.clone(),
    };

    widget.style.left = left;
    widget.style.top = top;
    widget.style.width = placement.width.clone();
    widget.style.height = placement.height.clone();
    widget.style.transform = transform;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::widget::Placement;
    use crate::layout::WidgetKey;

    fn widget(key: &str, x: &str, y: &str) -> Widget {
        Widget::new(
            key,
            "clock",
            "Clock",
            Placement {
                x: x.into(),
                y: y.into(),
                width: "30px".into(),
                height: "7px".into(),
            },
        )
    }

    fn record(left: &str, top: &str, width: &str, height: &str) -> LayoutRecord {
        LayoutRecord {
            left: left.into(),
            top: top.into(),
            width: width.into(),
            height: height.into(),
        }
    }

    #[test]
    fn centered_x_only_sets_translate_x() {
        let mut w = widget("a", "center", "80px");
        apply_defaults(&mut w);
        assert_eq!(w.style.left.as_str(), "50%");
        assert_eq!(w.style.top.as_str(), "80px");
        assert_eq!(w.style.transform, Transform::TranslateX);
    }

    #[test]
    fn centered_y_only_sets_translate_y() {
        let mut w = widget("a", "3px", "centered");
        apply_defaults(&mut w);
        assert_eq!(w.style.left.as_str(), "3px");
        assert_eq!(w.style.top.as_str(), "50%");
        assert_eq!(w.style.transform, Transform::TranslateY);
    }

    #[test]
    fn centered_both_axes_combines_translate() {
        let mut w = widget("a", "center", "center");
        apply_defaults(&mut w);
        assert_eq!(w.style.left.as_str(), "50%");
        assert_eq!(w.style.top.as_str(), "50%");
        assert_eq!(w.style.transform, Transform::Translate);
    }

    #[test]
    fn literal_defaults_clear_transform() {
        let mut w = widget("a", "2px", "4px");
        w.style.transform = Transform::Translate;
        apply_defaults(&mut w);
        assert_eq!(w.style.transform, Transform::None);
        assert_eq!(w.style.width.as_str(), "30px");
    }

    #[test]
    fn stored_record_wins_over_defaults() {
        let mut widgets = vec![widget("a", "center", "center")];
        let mut snapshot = GeometrySnapshot::default();
        snapshot.insert(WidgetKey::from("a"), record("40px", "35px", "220px", "140px"));

        apply_layout(&mut widgets, Some(&snapshot));

        let s = &widgets[0].style;
        assert_eq!(s.left.as_str(), "40px");
        assert_eq!(s.top.as_str(), "35px");
        assert_eq!(s.width.as_str(), "220px");
        assert_eq!(s.height.as_str(), "140px");
        assert_eq!(s.transform, Transform::None);
    }

    #[test]
    fn missing_entry_falls_back_per_widget() {
        let mut widgets = vec![widget("a", "1px", "1px"), widget("b", "center", "2px")];
        let mut snapshot = GeometrySnapshot::default();
        snapshot.insert(WidgetKey::from("a"), record("9px", "9px", "9px", "9px"));

        apply_layout(&mut widgets, Some(&snapshot));

        assert_eq!(widgets[0].style.left.as_str(), "9px");
        assert_eq!(widgets[1].style.left.as_str(), "50%");
        assert_eq!(widgets[1].style.transform, Transform::TranslateX);
    }

    #[test]
    fn no_snapshot_applies_defaults_everywhere() {
        let mut widgets = vec![widget("a", "center", "center"), widget("b", "5px", "6px")];
        apply_layout(&mut widgets, None);
        assert_eq!(widgets[0].style.transform, Transform::Translate);
        assert_eq!(widgets[1].style.left.as_str(), "5px");
        assert_eq!(widgets[1].style.top.as_str(), "6px");
    }

    #[test]
    fn unknown_snapshot_keys_are_ignored() {
        let mut widgets = vec![widget("a", "1px", "2px")];
        let mut snapshot = GeometrySnapshot::default();
        snapshot.insert(WidgetKey::from("ghost"), record("9px", "9px", "9px", "9px"));
        apply_layout(&mut widgets, Some(&snapshot));
        assert_eq!(widgets[0].style.left.as_str(), "1px");
    }

    #[test]
    fn stored_empty_strings_are_applied_verbatim() {
        let mut widgets = vec![widget("a", "center", "center")];
        let mut snapshot = GeometrySnapshot::default();
        snapshot.insert(WidgetKey::from("a"), record("", "", "", ""));
        apply_layout(&mut widgets, Some(&snapshot));
        assert!(widgets[0].style.left.is_unset());
        assert!(widgets[0].style.width.is_unset());
    }
}

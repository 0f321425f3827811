//! Visible-window geometry handed to the render sink.
//!
//! The core decides *what* each slot shows and where it sits; the UI layer
//! only has to paint the descriptors.

use super::physics::{self, WheelPhysics};

/// Text shown in the single slot of an empty dial.
pub const EMPTY_PLACEHOLDER: &str = "Select";

/// One drawable slot of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub text: String,
    /// Signed distance from the centre line, in items.  Negative = above.
    pub distance: f64,
    /// Vertical offset from the centre line, `distance * item_height`.
    pub offset: f64,
    pub scale: f64,
    pub opacity: f64,
    pub selected: bool,
    /// True for the stand-in slot of an empty list.
    pub placeholder: bool,
}

/// Everything the render sink needs for one frame of one dial.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibleWindow {
    pub slots: Vec<Slot>,
    /// Continuous position the window was computed from.
    pub position: f64,
}

impl VisibleWindow {
    /// Build the window for `items` at continuous `position`.
    pub fn compute(items: &[String], position: f64, physics: &WheelPhysics) -> Self {
        if items.is_empty() {
            return Self {
                slots: vec![Slot {
                    text: EMPTY_PLACEHOLDER.to_string(),
                    distance: 0.0,
                    offset: 0.0,
                    scale: 1.0,
                    opacity: 1.0,
                    selected: false,
                    placeholder: true,
                }],
                position: 0.0,
            };
        }

        let len = items.len();
        let center = position.round();
        let half = (physics.slot_count() / 2) as i64;

        let slots = (-half..=half)
            .map(|i| {
                let logical = center + i as f64;
                let distance = logical - position;
                let far = distance.abs();
                Slot {
                    text: items[physics::wrap_index(logical as i64, len)].clone(),
                    distance,
                    offset: distance * physics.item_height,
                    scale: (1.0 - far * physics.scale_falloff).clamp(0.5, 1.0),
                    opacity: (1.0 - far * physics.opacity_falloff).clamp(0.2, 1.0),
                    selected: far < 0.1,
                    placeholder: false,
                }
            })
            .collect();

        Self { slots, position }
    }

    /// The slot sitting on the centre line, if any.
    pub fn center(&self) -> Option<&Slot> {
        self.slots.get(self.slots.len() / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_list_has_one_placeholder() {
        let w = VisibleWindow::compute(&[], 3.7, &WheelPhysics::default());
        assert_eq!(w.slots.len(), 1);
        assert_eq!(w.slots[0].text, EMPTY_PLACEHOLDER);
        assert!(w.slots[0].placeholder);
        assert!(!w.slots[0].selected);
    }

    #[test]
    fn slots_wrap_around_short_lists() {
        let items = names(&["Ann", "Bea", "Cid"]);
        let w = VisibleWindow::compute(&items, 0.0, &WheelPhysics::default());
        let texts: Vec<&str> = w.slots.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Ann", "Bea", "Cid", "Ann", "Bea", "Cid", "Ann"]);
        assert_eq!(w.center().map(|s| s.selected), Some(true));
    }

    #[test]
    fn fractional_position_shifts_distances() {
        let items = names(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let physics = WheelPhysics::default();
        let w = VisibleWindow::compute(&items, 2.25, &physics);
        let center = w.center().unwrap();
        assert_eq!(center.text, "c");
        assert_eq!(center.distance, -0.25);
        assert_eq!(center.offset, -0.5);
        assert!(!center.selected);
        assert_eq!(center.scale, 1.0 - 0.25 * physics.scale_falloff);
    }

    #[test]
    fn far_slots_are_clamped() {
        let items = names(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let w = VisibleWindow::compute(&items, 0.0, &WheelPhysics::default());
        let edge = &w.slots[0];
        assert_eq!(edge.distance, -3.0);
        assert_eq!(edge.text, "f");
        assert!((edge.scale - 0.55).abs() < 1e-9);
        assert_eq!(edge.opacity, 0.2);
    }
}

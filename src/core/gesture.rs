//! Drag/flick tracking for a single pointer.

/// Live drag state.  Exists only between `begin` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Raw coordinate where the drag started.
    pub start_raw: f64,
    /// Wheel position when the drag started.
    pub start_position: f64,
    /// Most recent raw coordinate.
    pub last_raw: f64,
    /// Timestamp (ms) of the most recent sample.
    pub last_time: f64,
    /// Raw units per millisecond, from the latest sample pair only.
    pub velocity: f64,
}

impl Gesture {
    pub fn begin(raw: f64, position: f64, time: f64) -> Self {
        Self {
            start_raw: raw,
            start_position: position,
            last_raw: raw,
            last_time: time,
            velocity: 0.0,
        }
    }

    /// Record a new sample and return the unwrapped position it maps to.
    ///
    /// Dragging toward larger coordinates pulls earlier items into view, so
    /// the position moves against the raw delta.  A sample that did not move
    /// zeroes the velocity; otherwise a non-positive time delta keeps it.
    pub fn update(&mut self, raw: f64, time: f64, pixels_per_item: f64) -> f64 {
        let dt = time - self.last_time;
        if raw == self.last_raw {
            self.velocity = 0.0;
        } else if dt > 0.0 {
            self.velocity = (raw - self.last_raw) / dt;
        }
        self.last_raw = raw;
        self.last_time = time;

        let ppi = if pixels_per_item > 0.0 { pixels_per_item } else { 1.0 };
        self.start_position - (raw - self.start_raw) / ppi
    }
}

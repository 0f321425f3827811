//! The single per-wheel animation driver.
//!
//! A wheel has exactly one slot for "something that wants future frames":
//! a debounce timer waiting to snap, an eased snap in flight, or momentum
//! coasting.  Replacing the slot is how a new cycle supersedes the old one,
//! so two drivers can never race on the same position.

use super::physics;

/// Eased interpolation from `from` to `from + delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub from: f64,
    pub delta: f64,
    pub target: usize,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl SnapAnimation {
    /// Normalised progress at `now`, in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Unwrapped position at `now`.
    pub fn sample(&self, now: f64) -> f64 {
        self.from + self.delta * physics::ease_out_cubic(self.progress(now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Driver {
    #[default]
    Idle,
    /// Debounced snap; fires `snap_to_nearest` once `deadline` passes.
    SnapPending { deadline: f64 },
    Snapping(SnapAnimation),
    Coasting { velocity: f64 },
}

impl Driver {
    /// Whether the host should keep delivering frames.
    pub fn is_active(&self) -> bool {
        !matches!(self, Driver::Idle)
    }

    /// Drop whatever is scheduled.  Safe to call repeatedly.
    pub fn cancel(&mut self) {
        *self = Driver::Idle;
    }
}

//! Wheel tuning constants and the pure math behind the dial motion.
//!
//! Everything here is a free function over `f64` so the controller, the
//! config loader and the tests can share one source of truth.

/// Tunable parameters for one scroll wheel.
///
/// Raw input coordinates are in "pixels" (the TUI multiplies terminal rows by
/// [`WheelPhysics::pixels_per_row`]), time is in milliseconds and positions
/// are in items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPhysics {
    /// Raw pixels the pointer travels to move the wheel by one item.
    pub pixels_per_item: f64,
    /// Pixel height of one terminal row, used to turn mouse rows into raw
    /// coordinates.
    pub pixels_per_row: f64,
    /// Position delta applied per mouse-wheel notch.
    pub wheel_step: f64,
    /// Quiet period before a scheduled snap fires.
    pub snap_delay_ms: f64,
    /// Duration of the eased snap animation.
    pub snap_duration_ms: f64,
    /// Release velocity (pixels/ms) above which a drag turns into a flick.
    pub momentum_threshold: f64,
    /// Converts velocity into per-frame travel during momentum.
    pub momentum_scale: f64,
    /// Per-frame velocity multiplier while coasting.
    pub friction: f64,
    /// Coasting stops once |velocity| falls to this value.
    pub min_velocity: f64,
    /// Number of rendered slots; always odd.
    pub visible_slots: usize,
    /// Vertical distance between slot centres, in rendering units.
    pub item_height: f64,
    /// Scale falloff per item of distance from the centre.
    pub scale_falloff: f64,
    /// Opacity falloff per item of distance from the centre.
    pub opacity_falloff: f64,
}

impl Default for WheelPhysics {
    fn default() -> Self {
        Self {
            pixels_per_item: 40.0,
            pixels_per_row: 20.0,
            wheel_step: 1.0,
            snap_delay_ms: 150.0,
            snap_duration_ms: 250.0,
            momentum_threshold: 0.5,
            momentum_scale: 10.0,
            friction: 0.95,
            min_velocity: 0.05,
            visible_slots: 7,
            item_height: 2.0,
            scale_falloff: 0.15,
            opacity_falloff: 0.3,
        }
    }
}

impl WheelPhysics {
    /// Slot count forced to an odd number (at least 1) so there is always a
    /// centre slot.
    pub fn slot_count(&self) -> usize {
        let n = self.visible_slots.max(1);
        if n % 2 == 0 {
            n + 1
        } else {
            n
        }
    }
}

/// Wrap `position` into `[0, len)`.  Returns 0 for an empty list.
pub fn wrap(position: f64, len: usize) -> f64 {
    if len == 0 || !position.is_finite() {
        return 0.0;
    }
    let n = len as f64;
    let wrapped = position.rem_euclid(n);
    // rem_euclid can round up to exactly `n` for tiny negative inputs.
    if wrapped >= n {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an integer index into `[0, len)`.
pub fn wrap_index(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as i64) as usize
}

/// Index of the item nearest to `position`.
pub fn nearest_index(position: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    wrap_index(position.round() as i64, len)
}

/// Signed shortest path from `from` to `to` around a circle of `len` items.
///
/// The result lies in `(-len/2, len/2]`: an exact half turn resolves to the
/// forward (positive) direction.
pub fn shortest_delta(from: f64, to: f64, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let n = len as f64;
    let half = n / 2.0;
    let mut delta = to - from;
    if delta > half {
        delta -= n;
    } else if delta <= -half {
        delta += n;
    }
    delta
}

/// Ease-out cubic: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Number of momentum frames needed for `v0` to decay to `min_velocity`.
pub fn frames_until_rest(v0: f64, friction: f64, min_velocity: f64) -> u32 {
    let v0 = v0.abs();
    if v0 <= min_velocity || friction <= 0.0 || friction >= 1.0 {
        return 0;
    }
    ((min_velocity / v0).ln() / friction.ln()).ceil() as u32
}

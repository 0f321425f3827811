//! The scroll-wheel controller.
//!
//! Owns one circular list, the continuous position over it, the live drag
//! (if any) and the single animation driver.  The controller never reads a
//! clock: the host passes `now` (milliseconds) into every call that can
//! start an animation and drives frames through [`ScrollWheel::tick`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::animation::{Driver, SnapAnimation};
use super::gesture::Gesture;
use super::physics::{self, WheelPhysics};
use super::window::VisibleWindow;

/// Identifies a wheel to its listeners.
pub type DialId = usize;

/// Receives notifications from one or more wheels.
pub trait WheelListener {
    /// The continuous position (or the list) changed; redraw.
    fn position_changed(&mut self, _dial: DialId, _window: &VisibleWindow) {}

    /// The wheel settled on a selection (list replaced or snap finished).
    fn selection_changed(&mut self, _dial: DialId, _selection: &str) {}
}

pub type SharedListener = Rc<RefCell<dyn WheelListener>>;

/// Discrete navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

pub struct ScrollWheel {
    id: DialId,
    items: Vec<String>,
    position: f64,
    target: usize,
    gesture: Option<Gesture>,
    driver: Driver,
    locked: bool,
    physics: WheelPhysics,
    listeners: Vec<SharedListener>,
}

impl fmt::Debug for ScrollWheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollWheel")
            .field("id", &self.id)
            .field("items", &self.items.len())
            .field("position", &self.position)
            .field("target", &self.target)
            .field("driver", &self.driver)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl ScrollWheel {
    pub fn new(id: DialId, items: Vec<String>, physics: WheelPhysics) -> Self {
        Self {
            id,
            items,
            position: 0.0,
            target: 0,
            gesture: None,
            driver: Driver::Idle,
            locked: false,
            physics,
            listeners: Vec::new(),
        }
    }

    /// Register a listener.  Call after every wheel it observes exists.
    pub fn subscribe(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
    }

    // ── queries ────────────────────────────────────────────────

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// True while a timer, snap or momentum still needs frames.
    pub fn is_animating(&self) -> bool {
        self.driver.is_active()
    }

    pub fn physics(&self) -> &WheelPhysics {
        &self.physics
    }

    /// Index under the centre line, `None` for an empty list.
    pub fn selected_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(physics::nearest_index(self.position, self.items.len()))
        }
    }

    /// Item under the centre line, or `""` for an empty list.
    pub fn current_selection(&self) -> &str {
        self.selected_index()
            .map(|i| self.items[i].as_str())
            .unwrap_or("")
    }

    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow::compute(&self.items, self.position, &self.physics)
    }

    // ── external mutation ──────────────────────────────────────

    /// Replace the list, keeping the approximate scroll location.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.driver.cancel();
        self.gesture = None;
        self.items = items;

        if self.items.is_empty() {
            self.position = 0.0;
            self.target = 0;
        } else {
            let last = (self.items.len() - 1) as f64;
            let clamped = self.position.clamp(0.0, last);
            self.target = physics::nearest_index(clamped, self.items.len());
            self.position = self.target as f64;
        }

        tracing::debug!(dial = self.id, len = self.items.len(), target = self.target, "items replaced");
        self.emit_position();
        self.emit_selection();
    }

    /// Block or allow user input.  Locking mid-drag releases the drag into
    /// a scheduled snap so the wheel still settles.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            if let Some(g) = self.gesture.take() {
                self.schedule_snap(g.last_time);
            }
        }
    }

    // ── discrete navigation ────────────────────────────────────

    pub fn step(&mut self, direction: Step, now: f64) {
        if !self.accepts_input() {
            return;
        }
        self.gesture = None;
        // Outside a snap the target may be stale; step from what is shown.
        if !matches!(self.driver, Driver::Snapping(_)) {
            self.target = physics::nearest_index(self.position, self.items.len());
        }
        let delta = match direction {
            Step::Previous => -1,
            Step::Next => 1,
        };
        self.target = physics::wrap_index(self.target as i64 + delta, self.items.len());
        self.animate_to_target(now);
    }

    // ── continuous input ───────────────────────────────────────

    /// Nudge the position without touching the driver.
    pub fn apply_continuous_delta(&mut self, delta: f64) {
        if !self.accepts_input() {
            return;
        }
        self.position = physics::wrap(self.position + delta, self.items.len());
        self.emit_position();
    }

    /// One mouse-wheel notch: move, then (re)arm the debounced snap.
    pub fn scroll_wheel(&mut self, notches: f64, now: f64) {
        if !self.accepts_input() {
            return;
        }
        self.driver.cancel();
        self.apply_continuous_delta(notches * self.physics.wheel_step);
        self.schedule_snap(now);
    }

    pub fn begin_gesture(&mut self, raw: f64, time: f64) {
        if !self.accepts_input() {
            return;
        }
        self.driver.cancel();
        self.gesture = Some(Gesture::begin(raw, self.position, time));
    }

    pub fn update_gesture(&mut self, raw: f64, time: f64) {
        let len = self.items.len();
        let ppi = self.physics.pixels_per_item;
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let unwrapped = gesture.update(raw, time, ppi);
        self.position = physics::wrap(unwrapped, len);
        self.emit_position();
    }

    pub fn end_gesture(&mut self, now: f64) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        if gesture.velocity.abs() > self.physics.momentum_threshold {
            let frames = physics::frames_until_rest(
                gesture.velocity,
                self.physics.friction,
                self.physics.min_velocity,
            );
            tracing::debug!(dial = self.id, velocity = gesture.velocity, frames, "momentum started");
            self.driver = Driver::Coasting {
                velocity: gesture.velocity,
            };
        } else {
            self.schedule_snap(now);
        }
    }

    // ── settling ───────────────────────────────────────────────

    /// Arm (or re-arm) the snap debounce.
    pub fn schedule_snap(&mut self, now: f64) {
        if self.items.is_empty() {
            return;
        }
        self.driver = Driver::SnapPending {
            deadline: now + self.physics.snap_delay_ms,
        };
    }

    pub fn snap_to_nearest(&mut self, now: f64) {
        if self.items.is_empty() {
            return;
        }
        self.target = physics::nearest_index(self.position, self.items.len());
        self.animate_to_target(now);
    }

    /// Ease from the current position to `target` along the shorter arc.
    pub fn animate_to_target(&mut self, now: f64) {
        if self.items.is_empty() {
            return;
        }
        let delta = physics::shortest_delta(self.position, self.target as f64, self.items.len());
        if delta == 0.0 {
            self.finish_snap();
            return;
        }
        tracing::trace!(dial = self.id, target = self.target, delta, "snap started");
        self.driver = Driver::Snapping(SnapAnimation {
            from: self.position,
            delta,
            target: self.target,
            started_at: now,
            duration_ms: self.physics.snap_duration_ms,
        });
    }

    /// Advance the driver by one frame.  Returns whether more frames are
    /// wanted.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.driver {
            Driver::Idle => {}
            Driver::SnapPending { deadline } => {
                if now >= deadline {
                    self.snap_to_nearest(now);
                }
            }
            Driver::Snapping(anim) => {
                if anim.progress(now) >= 1.0 {
                    self.finish_snap();
                } else {
                    self.position = physics::wrap(anim.sample(now), self.items.len());
                    self.emit_position();
                }
            }
            Driver::Coasting { velocity } => self.coast(velocity, now),
        }
        self.driver.is_active()
    }

    fn coast(&mut self, velocity: f64, now: f64) {
        let travel = velocity * self.physics.momentum_scale / self.physics.pixels_per_item;
        self.position = physics::wrap(self.position - travel, self.items.len());
        self.emit_position();

        let next = velocity * self.physics.friction;
        if next.abs() <= self.physics.min_velocity {
            tracing::debug!(dial = self.id, position = self.position, "momentum settled");
            self.schedule_snap(now);
        } else {
            self.driver = Driver::Coasting { velocity: next };
        }
    }

    fn finish_snap(&mut self) {
        self.position = self.target as f64;
        self.driver = Driver::Idle;
        tracing::trace!(dial = self.id, target = self.target, "snap finished");
        self.emit_position();
        self.emit_selection();
    }

    /// Cancel every pending frame and timer and detach listeners.
    pub fn teardown(&mut self) {
        self.driver.cancel();
        self.gesture = None;
        self.listeners.clear();
    }

    fn accepts_input(&self) -> bool {
        !self.locked && !self.items.is_empty()
    }

    fn emit_position(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let window = self.visible_window();
        for listener in &self.listeners {
            listener.borrow_mut().position_changed(self.id, &window);
        }
    }

    fn emit_selection(&self) {
        let selection = self.current_selection();
        for listener in &self.listeners {
            listener.borrow_mut().selection_changed(self.id, selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FRAME: f64 = 16.0;

    #[derive(Default)]
    struct Recorder {
        renders: usize,
        selections: Vec<String>,
        last_window: Option<VisibleWindow>,
    }

    impl WheelListener for Recorder {
        fn position_changed(&mut self, _dial: DialId, window: &VisibleWindow) {
            self.renders += 1;
            self.last_window = Some(window.clone());
        }

        fn selection_changed(&mut self, _dial: DialId, selection: &str) {
            self.selections.push(selection.to_string());
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{i}")).collect()
    }

    fn wheel_with(items: Vec<String>) -> (ScrollWheel, Rc<RefCell<Recorder>>) {
        let mut wheel = ScrollWheel::new(0, items, WheelPhysics::default());
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        wheel.subscribe(recorder.clone());
        (wheel, recorder)
    }

    /// Tick at frame cadence until the driver goes idle.  Returns the time.
    fn settle(wheel: &mut ScrollWheel, mut now: f64) -> f64 {
        for _ in 0..10_000 {
            if !wheel.tick(now) {
                return now;
            }
            now += FRAME;
        }
        panic!("wheel never settled: {wheel:?}");
    }

    fn assert_selection_matches_position(wheel: &ScrollWheel) {
        let n = wheel.items().len();
        let expected = physics::wrap_index(wheel.position().round() as i64, n);
        assert_eq!(wheel.current_selection(), wheel.items()[expected]);
    }

    #[test]
    fn stepping_through_three_names_wraps() {
        let (mut wheel, _) = wheel_with(names(&["Ann", "Bea", "Cid"]));

        wheel.step(Step::Next, 0.0);
        assert_eq!(wheel.target(), 1);
        let t = settle(&mut wheel, 0.0);
        wheel.step(Step::Next, t);
        assert_eq!(wheel.target(), 2);
        let t = settle(&mut wheel, t);
        assert_eq!(wheel.current_selection(), "Cid");

        wheel.step(Step::Next, t);
        assert_eq!(wheel.target(), 0);
        settle(&mut wheel, t);
        assert_eq!(wheel.current_selection(), "Ann");
        assert_eq!(wheel.position(), 0.0);
    }

    #[test]
    fn next_then_previous_returns_to_start() {
        let (mut wheel, _) = wheel_with(numbered(5));
        wheel.step(Step::Next, 0.0);
        let t = settle(&mut wheel, 0.0);
        wheel.step(Step::Next, t);
        wheel.step(Step::Previous, t + FRAME);
        settle(&mut wheel, t + FRAME);
        assert_eq!(wheel.target(), 1);
        assert_eq!(wheel.position(), 1.0);
    }

    #[test]
    fn wrap_path_moves_backward() {
        let (mut wheel, _) = wheel_with(numbered(10));
        wheel.step(Step::Previous, 0.0);
        assert_eq!(wheel.target(), 9);
        match wheel.driver() {
            Driver::Snapping(anim) => assert_eq!(anim.delta, -1.0),
            other => panic!("expected snapping, got {other:?}"),
        }

        let mut now = FRAME;
        while wheel.tick(now) {
            let p = wheel.position();
            assert!(p == 0.0 || p >= 9.0, "took the long way: {p}");
            now += FRAME;
        }
        assert_eq!(wheel.position(), 9.0);
    }

    #[test]
    fn half_turn_snap_goes_forward() {
        let (mut wheel, _) = wheel_with(numbered(4));
        wheel.step(Step::Next, 0.0);
        wheel.step(Step::Next, 0.0);
        match wheel.driver() {
            Driver::Snapping(anim) => assert_eq!(anim.delta, 2.0),
            other => panic!("expected snapping, got {other:?}"),
        }
        let t = settle(&mut wheel, 0.0);

        wheel.step(Step::Next, t);
        wheel.step(Step::Next, t);
        match wheel.driver() {
            Driver::Snapping(anim) => assert_eq!(anim.delta, 2.0),
            other => panic!("expected snapping, got {other:?}"),
        }
    }

    #[test]
    fn momentum_frame_count_matches_decay() {
        let (mut wheel, _) = wheel_with(numbered(12));
        wheel.begin_gesture(0.0, 0.0);
        wheel.update_gesture(20.0, 10.0);
        wheel.end_gesture(10.0);
        assert_eq!(wheel.driver(), &Driver::Coasting { velocity: 2.0 });

        let mut frames = 0;
        let mut now = 10.0;
        while matches!(wheel.driver(), Driver::Coasting { .. }) {
            now += FRAME;
            wheel.tick(now);
            frames += 1;
        }
        let physics = wheel.physics();
        assert_eq!(
            frames,
            physics::frames_until_rest(2.0, physics.friction, physics.min_velocity)
        );
        assert!(matches!(wheel.driver(), Driver::SnapPending { .. }));

        settle(&mut wheel, now);
        assert_eq!(wheel.position().fract(), 0.0);
        assert_selection_matches_position(&wheel);
    }

    #[test]
    fn slow_release_schedules_debounced_snap() {
        let (mut wheel, recorder) = wheel_with(numbered(6));
        wheel.begin_gesture(100.0, 0.0);
        wheel.update_gesture(60.0, 200.0);
        assert_eq!(wheel.position(), 1.0);
        wheel.update_gesture(50.0, 400.0);
        assert_eq!(wheel.position(), 1.25);
        assert_selection_matches_position(&wheel);
        wheel.end_gesture(400.0);
        assert_eq!(wheel.driver(), &Driver::SnapPending { deadline: 550.0 });

        let before = recorder.borrow().selections.len();
        let t = settle(&mut wheel, 410.0);
        assert!(t >= 550.0);
        assert_eq!(wheel.position(), 1.0);
        assert_eq!(recorder.borrow().selections.len(), before + 1);
    }

    #[test]
    fn wheel_burst_snaps_once() {
        let mut physics = WheelPhysics::default();
        physics.wheel_step = 0.4;
        let mut wheel = ScrollWheel::new(0, numbered(5), physics);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        wheel.subscribe(recorder.clone());

        wheel.scroll_wheel(1.0, 0.0);
        wheel.scroll_wheel(1.0, 100.0);
        assert!((wheel.position() - 0.8).abs() < 1e-9);

        wheel.tick(200.0);
        assert!(matches!(wheel.driver(), Driver::SnapPending { .. }));
        wheel.tick(250.0);
        assert!(matches!(wheel.driver(), Driver::Snapping(_)));

        settle(&mut wheel, 250.0);
        assert_eq!(wheel.current_selection(), "item1");
        assert_eq!(recorder.borrow().selections, vec!["item1".to_string()]);
    }

    #[test]
    fn step_after_wheel_scroll_moves_from_shown_item() {
        let (mut wheel, _) = wheel_with(numbered(6));
        for t in [0.0, 20.0, 40.0] {
            wheel.scroll_wheel(1.0, t);
        }
        assert_eq!(wheel.current_selection(), "item3");
        assert!(matches!(wheel.driver(), Driver::SnapPending { .. }));

        wheel.step(Step::Next, 60.0);
        assert_eq!(wheel.target(), 4);
        settle(&mut wheel, 60.0);
        assert_eq!(wheel.current_selection(), "item4");
    }

    #[test]
    fn step_during_snap_chains_from_target() {
        let (mut wheel, _) = wheel_with(numbered(6));
        wheel.step(Step::Next, 0.0);
        wheel.tick(16.0);
        assert!(wheel.position() < 0.5);
        wheel.step(Step::Next, 16.0);
        assert_eq!(wheel.target(), 2);
        settle(&mut wheel, 16.0);
        assert_eq!(wheel.current_selection(), "item2");
    }

    #[test]
    fn new_gesture_cancels_animation() {
        let (mut wheel, _) = wheel_with(numbered(5));
        wheel.step(Step::Next, 0.0);
        wheel.tick(50.0);
        let mid = wheel.position();
        assert!(mid > 0.0 && mid < 1.0);

        wheel.begin_gesture(0.0, 60.0);
        assert!(!wheel.is_animating());
        assert!(!wheel.tick(100.0));
        assert_eq!(wheel.position(), mid);
    }

    #[test]
    fn shorter_list_clamps_position() {
        let (mut wheel, recorder) = wheel_with(numbered(10));
        for _ in 0..8 {
            wheel.step(Step::Next, 0.0);
        }
        settle(&mut wheel, 0.0);
        assert_eq!(wheel.position(), 8.0);

        wheel.set_items(names(&["x", "y", "z"]));
        assert_eq!(wheel.position(), 2.0);
        assert_eq!(wheel.target(), 2);
        assert_eq!(wheel.current_selection(), "z");
        assert_eq!(recorder.borrow().selections.last().map(String::as_str), Some("z"));

        wheel.set_items(Vec::new());
        assert_eq!(wheel.position(), 0.0);
        assert_eq!(wheel.current_selection(), "");
        assert_eq!(wheel.selected_index(), None);
        assert_eq!(recorder.borrow().selections.last().map(String::as_str), Some(""));
    }

    #[test]
    fn empty_list_ignores_input() {
        let (mut wheel, recorder) = wheel_with(Vec::new());
        wheel.begin_gesture(0.0, 0.0);
        wheel.update_gesture(500.0, 10.0);
        wheel.end_gesture(20.0);
        wheel.scroll_wheel(3.0, 30.0);
        wheel.apply_continuous_delta(1.5);
        wheel.step(Step::Next, 40.0);
        wheel.snap_to_nearest(50.0);
        wheel.schedule_snap(60.0);

        assert!(!wheel.tick(1_000.0));
        assert_eq!(wheel.current_selection(), "");
        assert_eq!(wheel.position(), 0.0);
        assert_eq!(recorder.borrow().renders, 0);

        let window = wheel.visible_window();
        assert_eq!(window.slots.len(), 1);
        assert!(window.slots[0].placeholder);
    }

    #[test]
    fn gesture_misuse_is_harmless() {
        let (mut wheel, recorder) = wheel_with(numbered(3));
        wheel.update_gesture(10.0, 5.0);
        wheel.end_gesture(10.0);
        assert_eq!(wheel.position(), 0.0);
        assert!(!wheel.is_animating());
        assert_eq!(recorder.borrow().renders, 0);
    }

    #[test]
    fn lock_blocks_input_not_items() {
        let (mut wheel, _) = wheel_with(numbered(4));
        wheel.set_locked(true);
        wheel.step(Step::Next, 0.0);
        wheel.scroll_wheel(1.0, 0.0);
        wheel.begin_gesture(0.0, 0.0);
        wheel.update_gesture(80.0, 10.0);
        assert_eq!(wheel.position(), 0.0);
        assert!(!wheel.is_animating());

        wheel.set_items(names(&["a", "b"]));
        assert_eq!(wheel.current_selection(), "a");
    }

    #[test]
    fn locking_mid_drag_still_settles() {
        let (mut wheel, _) = wheel_with(numbered(4));
        wheel.begin_gesture(0.0, 0.0);
        wheel.update_gesture(-50.0, 100.0);
        assert_eq!(wheel.position(), 1.25);
        wheel.set_locked(true);
        assert!(!wheel.is_dragging());
        settle(&mut wheel, 100.0);
        assert_eq!(wheel.position(), 1.0);
    }

    #[test]
    fn drag_renders_every_sample() {
        let (mut wheel, recorder) = wheel_with(numbered(4));
        wheel.begin_gesture(0.0, 0.0);
        wheel.update_gesture(-10.0, 16.0);
        wheel.update_gesture(-20.0, 32.0);
        let rec = recorder.borrow();
        assert_eq!(rec.renders, 2);
        let window = rec.last_window.as_ref().unwrap();
        assert_eq!(window.position, 0.5);
    }

    #[test]
    fn teardown_cancels_everything() {
        let (mut wheel, recorder) = wheel_with(numbered(4));
        wheel.step(Step::Next, 0.0);
        wheel.teardown();
        wheel.teardown();
        assert!(!wheel.tick(1_000.0));
        assert_eq!(recorder.borrow().renders, 0);
        assert_eq!(wheel.position(), 0.0);
    }
}

//! Input handling — maps key/mouse events to wheel calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::wheel::Step;
use crate::ui::layout::{AppLayout, DialGeometry, DialHit};

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Dials => handle_dials_key(state, key),
        ActiveView::Editor => handle_editor_key(state, key),
        ActiveView::Help => state.active_view = ActiveView::Dials,
    }
}

// ── Dials view (configurable bindings) ──────────────────────────

fn handle_dials_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let now = state.now_ms();

    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.active_view = ActiveView::Help,
        Action::PrevName => state.focused_dial().wheel.step(Step::Previous, now),
        Action::NextName => state.focused_dial().wheel.step(Step::Next, now),
        Action::FocusLeft => {
            let n = state.dials.len();
            state.focused = (state.focused + n - 1) % n;
        }
        Action::FocusRight => {
            state.focused = (state.focused + 1) % state.dials.len();
        }
        Action::EditList => {
            state.active_view = ActiveView::Editor;
            state.status_message = None;
        }
        Action::ToggleLock => {
            let dial = state.focused_dial();
            let locked = !dial.wheel.is_locked();
            dial.wheel.set_locked(locked);
            let msg = format!(
                "{} {}",
                dial.label,
                if locked { "locked" } else { "unlocked" }
            );
            tracing::debug!("{msg}");
            state.status_message = Some(msg);
        }
    }
}

// ── List editor ─────────────────────────────────────────────────

fn handle_editor_key(state: &mut AppState, key: KeyEvent) {
    let dial = state.focused_dial();
    match key.code {
        KeyCode::Esc => {
            state.active_view = ActiveView::Dials;
            return;
        }
        KeyCode::Enter => dial.source.push('\n'),
        KeyCode::Backspace => {
            dial.source.pop();
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            dial.source.push(c);
        }
        _ => return,
    }
    // Live update, like typing into the list's textarea.
    dial.reload();
}

// ── Mouse ───────────────────────────────────────────────────────

/// Mouse rows become raw pixel coordinates for the gesture tracker.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Dials {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area, state.dials.len());
    let now = state.now_ms();
    let raw = f64::from(mouse.row) * state.config.physics.pixels_per_row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(idx) = layout.dial_at(mouse.column, mouse.row) else {
                return;
            };
            state.focused = idx;
            let geom = DialGeometry::from_area(layout.dial_areas[idx]);
            let wheel = &mut state.dials[idx].wheel;
            match geom.hit(mouse.column, mouse.row) {
                Some(DialHit::Up) => wheel.step(Step::Previous, now),
                Some(DialHit::Down) => wheel.step(Step::Next, now),
                Some(DialHit::Wheel) => {
                    wheel.begin_gesture(raw, now);
                    if wheel.is_dragging() {
                        state.dragging = Some(idx);
                    }
                }
                None => {}
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(idx) = state.dragging {
                state.dials[idx].wheel.update_gesture(raw, now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(idx) = state.dragging.take() {
                // Drag events only arrive on row changes; the release is the
                // last sample.
                let wheel = &mut state.dials[idx].wheel;
                wheel.update_gesture(raw, now);
                wheel.end_gesture(now);
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let Some(idx) = layout.dial_at(mouse.column, mouse.row) else {
                return;
            };
            let notches = if mouse.kind == MouseEventKind::ScrollDown { 1.0 } else { -1.0 };
            state.dials[idx].wheel.scroll_wheel(notches, now);
        }
        _ => {}
    }
}

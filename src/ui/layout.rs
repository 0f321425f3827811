//! Layout helpers — split the terminal area into regions.
//!
//! Shared by the renderer and the mouse handler so clicks always land on
//! what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: one column per dial, the combined name, and the
/// status bar.
pub struct AppLayout {
    pub dial_areas: Vec<Rect>,
    pub name_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, dials: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // dials (take all remaining space)
                Constraint::Length(3), // combined name
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let dials = dials.max(1);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, dials as u32); dials])
            .split(rows[0]);

        Self {
            dial_areas: columns.to_vec(),
            name_area: rows[1],
            status_area: rows[2],
        }
    }

    /// Index of the dial column containing the cell, if any.
    pub fn dial_at(&self, col: u16, row: u16) -> Option<usize> {
        self.dial_areas
            .iter()
            .position(|area| point_in_rect(*area, col, row))
    }
}

/// Rows inside one bordered dial: ▲ button, wheel viewport, ▼ button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialGeometry {
    pub up_button: Rect,
    pub viewport: Rect,
    pub down_button: Rect,
}

/// What a click inside a dial hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialHit {
    Up,
    Wheel,
    Down,
}

impl DialGeometry {
    /// `area` includes the border.
    pub fn from_area(area: Rect) -> Self {
        let inner = Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1),
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let up_button = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let down_y = inner.y + inner.height.saturating_sub(1);
        let down_button = Rect::new(inner.x, down_y, inner.width, inner.height.saturating_sub(1).min(1));
        let viewport = Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(2),
        );
        Self {
            up_button,
            viewport,
            down_button,
        }
    }

    /// Row of the centre line in the viewport.
    pub fn center_row(&self) -> u16 {
        self.viewport.y + self.viewport.height / 2
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<DialHit> {
        if point_in_rect(self.up_button, col, row) {
            Some(DialHit::Up)
        } else if point_in_rect(self.down_button, col, row) {
            Some(DialHit::Down)
        } else if point_in_rect(self.viewport, col, row) {
            Some(DialHit::Wheel)
        } else {
            None
        }
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

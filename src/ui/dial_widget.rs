//! Ratatui widget that paints one wheel from the slot descriptors the core
//! hands to its render sink.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::core::wheel::{DialId, WheelListener};
use crate::core::window::VisibleWindow;

use super::layout::DialGeometry;
use super::theme::Theme;

// ───────────────────────────────────────── render sink ───────

/// Latest window pushed by a wheel.  Registered as a listener, read by the
/// widget every frame.
#[derive(Debug, Default)]
pub struct DialView {
    pub window: VisibleWindow,
    /// Set on every push, cleared by the main loop after drawing.
    pub dirty: bool,
}

impl WheelListener for DialView {
    fn position_changed(&mut self, _dial: DialId, window: &VisibleWindow) {
        self.window = window.clone();
        self.dirty = true;
    }
}

// ───────────────────────────────────────── widget ────────────

/// One dial column — created fresh each frame.
pub struct DialWidget<'a> {
    window: &'a VisibleWindow,
    label: &'a str,
    focused: bool,
    locked: bool,
}

impl<'a> DialWidget<'a> {
    pub fn new(window: &'a VisibleWindow, label: &'a str) -> Self {
        Self {
            window,
            label,
            focused: false,
            locked: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

impl Widget for DialWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.locked {
            format!(" {} 🔒 ", self.label)
        } else {
            format!(" {} ", self.label)
        };
        Block::default()
            .title(title)
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style(self.focused))
            .render(area, buf);

        let geom = DialGeometry::from_area(area);
        let button_style = if self.locked {
            Theme::locked_button_style()
        } else {
            Theme::button_style()
        };
        draw_centered(buf, geom.up_button, geom.up_button.y, "▲", button_style);
        draw_centered(buf, geom.down_button, geom.down_button.y, "▼", button_style);

        let view = geom.viewport;
        if view.height == 0 || view.width == 0 {
            return;
        }
        let center = geom.center_row() as f64;

        for slot in &self.window.slots {
            let row = (center + slot.offset).round();
            if row < view.y as f64 || row >= (view.y + view.height) as f64 {
                continue;
            }
            let row = row as u16;
            let style = if slot.placeholder {
                Theme::placeholder_style()
            } else if slot.selected {
                Theme::selected_style()
            } else {
                Theme::slot_style(slot.opacity, slot.scale)
            };
            if slot.selected {
                buf.set_style(Rect::new(view.x, row, view.width, 1), style);
            }
            draw_centered(buf, view, row, &slot.text, style);
        }
    }
}

/// Write `text` horizontally centred in `area` on `row`, truncated to fit.
fn draw_centered(buf: &mut Buffer, area: Rect, row: u16, text: &str, style: ratatui::style::Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = text.width().min(area.width as usize) as u16;
    let x = area.x + (area.width - width) / 2;
    let line = Line::from(Span::styled(text.to_string(), style));
    buf.set_line(x, row, &line, area.width - (x - area.x));
}

//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── dials ──────────────────────────────────────────────────
    pub fn selected_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn placeholder_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for a non-selected slot, faded by the core's opacity/scale.
    pub fn slot_style(opacity: f64, scale: f64) -> Style {
        let fg = if opacity > 0.75 {
            Color::White
        } else if opacity > 0.45 {
            Color::Gray
        } else {
            Color::DarkGray
        };
        let style = Style::default().fg(fg);
        if scale < 0.7 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn button_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn locked_button_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn full_name_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

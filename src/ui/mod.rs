//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the slot descriptors produced by the *core* wheels and
//! turns them into cells on the terminal.

pub mod dial_widget;
pub mod layout;
pub mod popup;
pub mod theme;

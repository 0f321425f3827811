//! Joins the selections of several wheels into one display string.

use super::wheel::{DialId, WheelListener};

/// Shown when every wheel is empty.
pub const COMBINED_PLACEHOLDER: &str = "Name Combination";

/// Listener that remembers the last settled selection of each wheel.
///
/// Build every wheel first, then subscribe one combiner to all of them.
#[derive(Debug, Clone, Default)]
pub struct NameCombiner {
    parts: Vec<String>,
}

impl NameCombiner {
    pub fn new(dials: usize) -> Self {
        Self {
            parts: vec![String::new(); dials],
        }
    }

    /// Non-empty selections in dial order, joined by single spaces.
    pub fn combined(&self) -> String {
        let joined = self
            .parts
            .iter()
            .filter(|p| !p.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            COMBINED_PLACEHOLDER.to_string()
        } else {
            joined
        }
    }

    /// True when no dial has a selection.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(String::is_empty)
    }
}

impl WheelListener for NameCombiner {
    fn selection_changed(&mut self, dial: DialId, selection: &str) {
        if dial >= self.parts.len() {
            self.parts.resize(dial + 1, String::new());
        }
        if self.parts[dial] != selection {
            self.parts[dial] = selection.to_string();
            tracing::debug!(combined = %self.combined(), "selection combined");
        }
    }
}

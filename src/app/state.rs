//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{combine::NameCombiner, list, wheel::ScrollWheel};
use crate::ui::dial_widget::DialView;

/// Column titles, in combination order.
pub const DIAL_LABELS: [&str; 3] = ["First Name", "Middle Name", "Last Name"];

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dials,
    Editor,
    Help,
}

/// One wheel plus the text it was parsed from and its render sink.
pub struct Dial {
    pub label: &'static str,
    pub wheel: ScrollWheel,
    /// Raw newline-delimited list the user edits.
    pub source: String,
    pub view: Rc<RefCell<DialView>>,
}

impl Dial {
    /// Re-parse `source` and hand the result to the wheel.
    pub fn reload(&mut self) {
        self.wheel.set_items(list::parse_items(&self.source));
    }
}

/// Top-level application state.
pub struct AppState {
    pub dials: Vec<Dial>,
    /// Combined-name listener subscribed to every wheel.
    pub combiner: Rc<RefCell<NameCombiner>>,
    /// Index of the dial receiving keyboard input.
    pub focused: usize,
    /// Dial currently being dragged with the mouse.
    pub dragging: Option<usize>,
    pub active_view: ActiveView,
    pub config: AppConfig,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    started: Instant,
}

impl AppState {
    /// Build every wheel first, then wire the listeners, then load the
    /// initial lists so the first notifications reach everyone.
    pub fn new(sources: [String; 3], config: AppConfig) -> Self {
        let combiner = Rc::new(RefCell::new(NameCombiner::new(DIAL_LABELS.len())));

        let mut dials: Vec<Dial> = DIAL_LABELS
            .iter()
            .zip(sources)
            .enumerate()
            .map(|(id, (&label, source))| Dial {
                label,
                wheel: ScrollWheel::new(id, Vec::new(), config.physics),
                source,
                view: Rc::new(RefCell::new(DialView::default())),
            })
            .collect();

        for dial in &mut dials {
            dial.wheel.subscribe(dial.view.clone());
            dial.wheel.subscribe(combiner.clone());
        }
        for dial in &mut dials {
            dial.reload();
        }

        Self {
            dials,
            combiner,
            focused: 0,
            dragging: None,
            active_view: ActiveView::default(),
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            started: Instant::now(),
        }
    }

    /// Milliseconds since start-up; the clock every wheel runs on.
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    pub fn focused_dial(&mut self) -> &mut Dial {
        &mut self.dials[self.focused]
    }

    /// The joined selection of all dials.
    pub fn full_name(&self) -> String {
        self.combiner.borrow().combined()
    }

    /// True when any wheel still wants animation frames.
    pub fn is_animating(&self) -> bool {
        self.dials.iter().any(|d| d.wheel.is_animating())
    }

    /// Deliver one frame to every wheel.
    pub fn tick(&mut self) {
        let now = self.now_ms();
        for dial in &mut self.dials {
            dial.wheel.tick(now);
        }
    }

    /// Stop every wheel's timers and detach listeners.
    pub fn teardown(&mut self) {
        for dial in &mut self.dials {
            dial.wheel.teardown();
        }
    }
}

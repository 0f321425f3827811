//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal was resized; the next draw picks up the new area.
    Resize,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  Animation frames are driven separately by
/// the main loop, so idle polls send nothing.
pub fn spawn_event_reader(poll_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let has_event = event::poll(poll_rate).unwrap_or(false);
        if has_event {
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    // Press only; some terminals also report releases.
                    CtEvent::Key(k) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(..) => AppEvent::Resize,
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        } else if tx.is_closed() {
            break;
        }
    });

    rx
}

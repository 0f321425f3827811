//! A scroll-wheel name picker for the terminal.
//!
//! Three dials (first, middle, last name) spin over user-editable lists;
//! their settled selections are joined into one full name.  Run with
//! `--print` to get the final combination on stdout when you quit.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::list;
use crate::ui::{
    dial_widget::DialWidget,
    layout::AppLayout,
    popup::{EditorPopup, HelpPopup},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Spin three dials, get one full name")]
struct Cli {
    /// Newline-delimited first names.
    #[arg(long)]
    first: Option<PathBuf>,

    /// Newline-delimited middle names.
    #[arg(long)]
    middle: Option<PathBuf>,

    /// Newline-delimited last names.
    #[arg(long)]
    last: Option<PathBuf>,

    /// Print the final full name on stdout after quitting.
    #[arg(long)]
    print: bool,

    /// Animation frame interval in milliseconds.
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,
}

fn read_list(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading name list {}", path.display()))?;
    tracing::debug!(path = %path.display(), names = list::parse_items(&text).len(), "loaded list");
    Ok(text)
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area(), state.dials.len());

    for (idx, (dial, area)) in state.dials.iter().zip(&layout.dial_areas).enumerate() {
        let view = dial.view.borrow();
        let widget = DialWidget::new(&view.window, dial.label)
            .focused(idx == state.focused)
            .locked(dial.wheel.is_locked());
        frame.render_widget(widget, *area);
    }

    let name_style = if state.combiner.borrow().is_empty() {
        Theme::placeholder_style()
    } else {
        Theme::full_name_style()
    };
    let name = Paragraph::new(state.full_name())
        .style(name_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Full Name ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style(false)),
        );
    frame.render_widget(name, layout.name_area);

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    match state.active_view {
        ActiveView::Editor => {
            let dial = &state.dials[state.focused];
            frame.render_widget(
                EditorPopup {
                    label: dial.label,
                    text: &dial.source,
                    item_count: dial.wheel.items().len(),
                },
                frame.area(),
            );
        }
        ActiveView::Help => {
            frame.render_widget(HelpPopup { config: &state.config }, frame.area());
        }
        ActiveView::Dials => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── build dials ───────────────────────────────────────────
    let sources = [
        read_list(cli.first.as_deref())?,
        read_list(cli.middle.as_deref())?,
        read_list(cli.last.as_deref())?,
    ];
    let config = config::AppConfig::load();
    let mut state = AppState::new(sources, config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── frame scheduling ──────────────────────────────────────
    // Wheels never schedule themselves: this loop is the only frame source
    // and only ticks while some wheel is animating.
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(Duration::from_millis(cli.frame_ms.max(1)));
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    let mut needs_draw = true;
    loop {
        if needs_draw {
            terminal.draw(|frame| {
                state.terminal_area = frame.area();
                draw(frame, &state);
            })?;
            for dial in &state.dials {
                dial.view.borrow_mut().dirty = false;
            }
        }

        let animating = state.is_animating();
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize => {}
                }
                needs_draw = true;
            }

            _ = frames.tick(), if animating => {
                state.tick();
                // Frames spent waiting on a snap debounce move nothing.
                needs_draw = state.dials.iter().any(|d| d.view.borrow().dirty);
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if cli.print {
        println!("{}", state.full_name());
    }

    Ok(())
}

//! User configuration — keybindings and wheel tuning.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/name-dial/config.toml` (default `~/.config/name-dial/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::physics::WheelPhysics;

// ───────────────────────────────────────── errors ────────────

/// A line of the config file that could not be applied.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrevName,
    NextName,
    FocusLeft,
    FocusRight,
    EditList,
    ToggleLock,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::PrevName,
        Action::NextName,
        Action::FocusLeft,
        Action::FocusRight,
        Action::EditList,
        Action::ToggleLock,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::PrevName => "Previous Name",
            Action::NextName => "Next Name",
            Action::FocusLeft => "Focus Left Dial",
            Action::FocusRight => "Focus Right Dial",
            Action::EditList => "Edit List",
            Action::ToggleLock => "Lock / Unlock Dial",
            Action::Help => "Show Controls",
            Action::Quit => "Quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "prev_name" => Some(Action::PrevName),
            "next_name" => Some(Action::NextName),
            "focus_left" => Some(Action::FocusLeft),
            "focus_right" => Some(Action::FocusRight),
            "edit_list" => Some(Action::EditList),
            "toggle_lock" => Some(Action::ToggleLock),
            "help" => Some(Action::Help),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "Shift+Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and wheel physics.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub physics: WheelPhysics,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            physics: WheelPhysics::default(),
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PrevName, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(NextName, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(
            FocusLeft,
            vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n), KeyBind::new(BackTab, KeyModifiers::SHIFT)],
        );
        m.insert(
            FocusRight,
            vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n), KeyBind::new(Tab, n)],
        );
        m.insert(EditList, vec![KeyBind::new(Char('e'), n), KeyBind::new(Enter, n)]);
        m.insert(ToggleLock, vec![KeyBind::new(Char(' '), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: spin | {}/{}: dial | {}: edit | {}: lock | {}: help",
            self.short_binding(Action::PrevName),
            self.short_binding(Action::NextName),
            self.short_binding(Action::FocusLeft),
            self.short_binding(Action::FocusRight),
            self.short_binding(Action::EditList),
            self.short_binding(Action::ToggleLock),
            self.short_binding(Action::Help),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  Bad lines are
    /// logged and skipped.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(contents) = std::fs::read_to_string(&path) else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        };
        let (config, errors) = Self::parse(&contents);
        for err in &errors {
            tracing::warn!(path = %path.display(), "{err}");
        }
        config
    }

    /// Parse config text on top of the defaults.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match apply_physics(&mut config.physics, key, value) {
                PhysicsSetting::Applied => continue,
                PhysicsSetting::Invalid => {
                    errors.push(ConfigError::InvalidValue {
                        line: line_no,
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                    continue;
                }
                PhysicsSetting::NotPhysics => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                errors.push(ConfigError::UnknownKey {
                    line: line_no,
                    key: key.to_string(),
                });
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if parsed.is_empty() {
                errors.push(ConfigError::InvalidValue {
                    line: line_no,
                    key: key.to_string(),
                    value: value.to_string(),
                });
            } else {
                config.bindings.insert(action, parsed);
            }
        }

        (config, errors)
    }
}

/// Outcome of offering a config line to the wheel tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhysicsSetting {
    /// Not a tuning key; try the key bindings.
    NotPhysics,
    Applied,
    /// A tuning key whose value did not parse.
    Invalid,
}

/// Apply a wheel-tuning setting, clamping numbers into a sane range.
fn apply_physics(physics: &mut WheelPhysics, key: &str, value: &str) -> PhysicsSetting {
    let float = |lo: f64, hi: f64| value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.clamp(lo, hi));
    let applied = match key {
        "pixels_per_item" => float(1.0, 1000.0).map(|v| physics.pixels_per_item = v),
        "pixels_per_row" => float(1.0, 200.0).map(|v| physics.pixels_per_row = v),
        "wheel_step" => float(0.05, 5.0).map(|v| physics.wheel_step = v),
        "snap_delay_ms" => float(0.0, 2000.0).map(|v| physics.snap_delay_ms = v),
        "snap_duration_ms" => float(0.0, 2000.0).map(|v| physics.snap_duration_ms = v),
        "momentum_threshold" => float(0.0, 100.0).map(|v| physics.momentum_threshold = v),
        "momentum_scale" => float(0.0, 100.0).map(|v| physics.momentum_scale = v),
        "friction" => float(0.5, 0.99).map(|v| physics.friction = v),
        "min_velocity" => float(0.001, 10.0).map(|v| physics.min_velocity = v),
        "item_height" => float(1.0, 10.0).map(|v| physics.item_height = v),
        "scale_falloff" => float(0.0, 1.0).map(|v| physics.scale_falloff = v),
        "opacity_falloff" => float(0.0, 1.0).map(|v| physics.opacity_falloff = v),
        "visible_slots" => value
            .parse::<usize>()
            .ok()
            .map(|v| physics.visible_slots = v.clamp(1, 15)),
        _ => return PhysicsSetting::NotPhysics,
    };
    if applied.is_some() {
        PhysicsSetting::Applied
    } else {
        PhysicsSetting::Invalid
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/name-dial/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("name-dial").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut ev = KeyEvent::new(code, modifiers);
        ev.kind = KeyEventKind::Press;
        ev
    }

    #[test]
    fn defaults_cover_every_action() {
        let config = AppConfig::default();
        for &action in Action::ALL {
            assert_ne!(config.display_bindings(action), "unbound", "{action:?}");
        }
        assert_eq!(config.match_key(press(KeyCode::Down, KeyModifiers::NONE)), Some(Action::NextName));
        assert_eq!(config.match_key(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_bindings_and_physics() {
        let text = "\
# tuning
friction = 0.9
visible_slots = 5
next_name = Ctrl+n, PageDown
wheel_step = 0.5
";
        let (config, errors) = AppConfig::parse(text);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(config.physics.friction, 0.9);
        assert_eq!(config.physics.visible_slots, 5);
        assert_eq!(config.physics.wheel_step, 0.5);
        assert_eq!(
            config.match_key(press(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(Action::NextName)
        );
        assert_eq!(config.match_key(press(KeyCode::Down, KeyModifiers::NONE)), None);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (config, errors) = AppConfig::parse("friction = 1.5\nvisible_slots = 99");
        assert!(errors.is_empty());
        assert_eq!(config.physics.friction, 0.99);
        assert_eq!(config.physics.visible_slots, 15);
    }

    #[test]
    fn bad_lines_are_reported_not_fatal() {
        let (config, errors) = AppConfig::parse("friction = fast\nspin_speed = 3\nquit = Ctrl+Nope");
        assert_eq!(config.physics.friction, WheelPhysics::default().friction);
        assert_eq!(
            errors,
            vec![
                ConfigError::InvalidValue {
                    line: 1,
                    key: "friction".into(),
                    value: "fast".into(),
                },
                ConfigError::UnknownKey {
                    line: 2,
                    key: "spin_speed".into(),
                },
                ConfigError::InvalidValue {
                    line: 3,
                    key: "quit".into(),
                    value: "Ctrl+Nope".into(),
                },
            ]
        );
        assert_eq!(errors[1].to_string(), "line 2: unknown setting `spin_speed`");
    }

    #[test]
    fn physics_keys_are_classified() {
        let mut physics = WheelPhysics::default();
        assert_eq!(apply_physics(&mut physics, "friction", "0.8"), PhysicsSetting::Applied);
        assert_eq!(physics.friction, 0.8);
        assert_eq!(apply_physics(&mut physics, "friction", "slow"), PhysicsSetting::Invalid);
        assert_eq!(apply_physics(&mut physics, "friction", "NaN"), PhysicsSetting::Invalid);
        assert_eq!(apply_physics(&mut physics, "next_name", "j"), PhysicsSetting::NotPhysics);
        assert_eq!(physics.friction, 0.8);
    }

    #[test]
    fn key_display_round_trips_modifiers() {
        let bind = KeyBind::parse("Alt+Up").unwrap();
        assert_eq!(bind, KeyBind::new(KeyCode::Up, KeyModifiers::ALT));
        assert_eq!(bind.display(), "Alt+↑");
        assert_eq!(KeyBind::parse("Q"), Some(KeyBind::new(KeyCode::Char('Q'), KeyModifiers::NONE)));
    }
}

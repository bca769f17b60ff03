//! User configuration: keybindings, reveal timings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/deep-chart/config.toml` (default `~/.config/deep-chart/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::reveal::Sensitivity;

// ───────────────────────────────────────── errors ────────────

/// Problems found while reading the config file.  None of them are fatal:
/// the offending entry falls back to its default.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("unknown config key `{0}`")]
    UnknownKey(String),
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevSection,
    NextSection,
    ToggleMenu,
    PrevTech,
    NextTech,
    SelectTech,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help line and the file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevSection,
        Action::NextSection,
        Action::ToggleMenu,
        Action::PrevTech,
        Action::NextTech,
        Action::SelectTech,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::PrevSection => "Previous Section",
            Action::NextSection => "Next Section",
            Action::ToggleMenu => "Toggle Menu",
            Action::PrevTech => "Previous Technology",
            Action::NextTech => "Next Technology",
            Action::SelectTech => "Open / Close Technology",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::ToggleMenu => "toggle_menu",
            Action::PrevTech => "prev_tech",
            Action::NextTech => "next_tech",
            Action::SelectTech => "select_tech",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
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
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            // Single characters keep their case ("G" ≠ "g").
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── timings ───────────

/// Reveal, navigation and breakpoint tunables.  Lengths are layout units.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTimings {
    pub stagger_step_ms: u64,
    pub step_interval_ms: u64,
    pub intersection_threshold: f64,
    pub narrow_sensitivity: f64,
    pub wide_sensitivity: f64,
    pub sensitivity_breakpoint: f64,
    pub nav_scroll_threshold: f64,
    /// Mobile menu close transition.  The deferred link scroll uses the same
    /// value, so changing one changes both.
    pub menu_close_ms: u64,
    /// Below this width the technology showcase is an accordion.
    pub touch_breakpoint: f64,
    /// Below this width the nav bar collapses into a menu button.
    pub mobile_menu_breakpoint: f64,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            stagger_step_ms: 200,
            step_interval_ms: 500,
            intersection_threshold: 0.1,
            narrow_sensitivity: 0.97,
            wide_sensitivity: 0.8,
            sensitivity_breakpoint: 768.0,
            nav_scroll_threshold: 80.0,
            menu_close_ms: 300,
            touch_breakpoint: 768.0,
            mobile_menu_breakpoint: 640.0,
        }
    }
}

impl RevealTimings {
    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn menu_close(&self) -> Duration {
        Duration::from_millis(self.menu_close_ms)
    }

    pub fn sensitivity(&self) -> Sensitivity {
        Sensitivity {
            breakpoint: self.sensitivity_breakpoint,
            narrow: self.narrow_sensitivity,
            wide: self.wide_sensitivity,
        }
    }

    /// Apply one `key = value` line.  `Ok(false)` means the key is not a
    /// timing key.
    fn apply(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let ms = |max: u64| value.parse::<u64>().map(|v| v.min(max)).map_err(|_| invalid());
        let frac = || {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0))
                .ok_or_else(invalid)
        };
        let len = || {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(invalid)
        };

        match key {
            "stagger_step_ms" => self.stagger_step_ms = ms(5_000)?,
            // A zero interval would reveal every step in the same frame.
            "step_interval_ms" => self.step_interval_ms = ms(5_000)?.max(1),
            "menu_close_ms" => self.menu_close_ms = ms(5_000)?,
            "intersection_threshold" => self.intersection_threshold = frac()?,
            "narrow_sensitivity" => self.narrow_sensitivity = frac()?,
            "wide_sensitivity" => self.wide_sensitivity = frac()?,
            "sensitivity_breakpoint" => self.sensitivity_breakpoint = len()?,
            "nav_scroll_threshold" => self.nav_scroll_threshold = len()?,
            "touch_breakpoint" => self.touch_breakpoint = len()?,
            "mobile_menu_breakpoint" => self.mobile_menu_breakpoint = len()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and reveal timings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub timings: RevealTimings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            timings: RevealTimings::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(PrevSection, vec![KeyBind::new(Char('K'), shift), KeyBind::new(BackTab, shift)]);
        m.insert(NextSection, vec![KeyBind::new(Char('J'), shift), KeyBind::new(Tab, n)]);
        m.insert(ToggleMenu, vec![KeyBind::new(Char('m'), n)]);
        m.insert(PrevTech, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextTech, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(SelectTech, vec![KeyBind::new(Enter, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
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

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next section | 1-4: jump | {}: menu | {}/{}: technology | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::ToggleMenu),
            self.short_binding(Action::PrevTech),
            self.short_binding(Action::NextTech),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path`.  A missing file yields defaults; unreadable
    /// files and bad entries are logged and skipped.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let (config, problems) = Self::parse_config(&contents);
                for problem in problems {
                    tracing::warn!(path = %path.display(), "{problem}");
                }
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "{}", ConfigError::from(e));
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match config.timings.apply(key, value) {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => {
                    problems.push(e);
                    continue;
                }
            }

            let Some(action) = Action::from_config_key(key) else {
                problems.push(ConfigError::UnknownKey(key.to_string()));
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if parsed.is_empty() {
                problems.push(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            } else {
                config.bindings.insert(action, parsed);
            }
        }

        (config, problems)
    }

    pub fn serialise(&self) -> String {
        let t = &self.timings;
        let mut lines = vec![
            "# deep-chart configuration".to_string(),
            String::new(),
            "# Reveal timings (milliseconds) and thresholds".to_string(),
            format!("stagger_step_ms = {}", t.stagger_step_ms),
            format!("step_interval_ms = {}", t.step_interval_ms),
            format!("menu_close_ms = {}", t.menu_close_ms),
            format!("intersection_threshold = {}", t.intersection_threshold),
            format!("narrow_sensitivity = {}", t.narrow_sensitivity),
            format!("wide_sensitivity = {}", t.wide_sensitivity),
            String::new(),
            "# Layout widths (1 column = 8 units)".to_string(),
            format!("sensitivity_breakpoint = {}", t.sensitivity_breakpoint),
            format!("nav_scroll_threshold = {}", t.nav_scroll_threshold),
            format!("touch_breakpoint = {}", t.touch_breakpoint),
            format!("mobile_menu_breakpoint = {}", t.mobile_menu_breakpoint),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/deep-chart/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("deep-chart").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_page_behaviour() {
        let t = RevealTimings::default();
        assert_eq!(t.stagger_step(), Duration::from_millis(200));
        assert_eq!(t.step_interval(), Duration::from_millis(500));
        assert_eq!(t.menu_close(), Duration::from_millis(300));
        assert_eq!(t.sensitivity(), Sensitivity::default());
    }

    #[test]
    fn parses_timings_and_bindings() {
        let (config, problems) = AppConfig::parse_config(
            "# comment\n\
             stagger_step_ms = 150\n\
             wide_sensitivity = 0.75\n\
             quit = Ctrl+x, Q\n",
        );
        assert!(problems.is_empty());
        assert_eq!(config.timings.stagger_step_ms, 150);
        assert_eq!(config.timings.wide_sensitivity, 0.75);
        assert_eq!(
            config.match_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('Q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn bad_values_fall_back_and_are_reported() {
        let (config, problems) = AppConfig::parse_config(
            "step_interval_ms = soon\n\
             narrow_sensitivity = 3.5\n\
             warp_drive = on\n\
             quit = Hyper+q\n",
        );
        assert_eq!(config.timings.step_interval_ms, 500);
        // Out-of-range fractions clamp rather than fail.
        assert_eq!(config.timings.narrow_sensitivity, 1.0);
        assert_eq!(problems.len(), 3);
        assert!(matches!(problems[0], ConfigError::InvalidValue { ref key, .. } if key == "step_interval_ms"));
        assert!(matches!(problems[1], ConfigError::UnknownKey(ref k) if k == "warp_drive"));
        assert_eq!(config.bindings[&Action::Quit], AppConfig::default_bindings()[&Action::Quit]);
    }

    #[test]
    fn zero_step_interval_is_bumped() {
        let (config, _) = AppConfig::parse_config("step_interval_ms = 0\n");
        assert_eq!(config.timings.step_interval_ms, 1);
    }

    #[test]
    fn save_then_load_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.timings.menu_close_ms = 450;
        config.timings.touch_breakpoint = 700.0;
        config
            .bindings
            .insert(Action::ToggleMenu, vec![KeyBind::new(KeyCode::F(2), KeyModifiers::NONE)]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.timings, config.timings);
        assert_eq!(loaded.bindings, config.bindings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(loaded.timings, RevealTimings::default());
    }

    #[test]
    fn shift_binding_beats_plain_one() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(Action::NextSection)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
    }
}

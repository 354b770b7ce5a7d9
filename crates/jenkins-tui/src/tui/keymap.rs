//! Key bindings
//!
//! Five global commands are configurable; navigation and view keys are
//! fixed. A global command always wins over a navigation alias bound to the
//! same character, so with the default bindings `j` opens the job list
//! rather than moving down.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jenkins_tui_core::config::KeyBindingsConfig;

/// Commands available from every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    Quit,
    Help,
    Dashboard,
    Jobs,
    Refresh,
}

/// Cursor or scroll movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    quit: char,
    help: char,
    dashboard: char,
    jobs: char,
    refresh: char,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: 'q',
            help: '?',
            dashboard: 'd',
            jobs: 'j',
            refresh: 'r',
        }
    }
}

/// ctrl-c quits from anywhere, including text input
pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn plain_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

impl KeyMap {
    /// Build from configured overrides; an empty entry keeps the default
    pub fn from_config(config: &KeyBindingsConfig) -> Self {
        let defaults = Self::default();
        let pick = |value: &str, fallback: char| value.chars().next().unwrap_or(fallback);
        Self {
            quit: pick(&config.quit, defaults.quit),
            help: pick(&config.help, defaults.help),
            dashboard: pick(&config.dashboard, defaults.dashboard),
            jobs: pick(&config.jobs, defaults.jobs),
            refresh: pick(&config.refresh, defaults.refresh),
        }
    }

    pub fn global_command(&self, key: &KeyEvent) -> Option<GlobalCommand> {
        if is_ctrl_c(key) {
            return Some(GlobalCommand::Quit);
        }
        let c = plain_char(key)?;
        [
            (self.quit, GlobalCommand::Quit),
            (self.help, GlobalCommand::Help),
            (self.dashboard, GlobalCommand::Dashboard),
            (self.jobs, GlobalCommand::Jobs),
            (self.refresh, GlobalCommand::Refresh),
        ]
        .into_iter()
        .find_map(|(bound, command)| (bound == c).then_some(command))
    }

    /// Navigation for keys that are not global commands
    pub fn motion(&self, key: &KeyEvent) -> Option<Motion> {
        if self.global_command(key).is_some() {
            return None;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Motion::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Motion::Down),
            KeyCode::PageUp => Some(Motion::PageUp),
            KeyCode::PageDown => Some(Motion::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Motion::Home),
            KeyCode::End | KeyCode::Char('G') => Some(Motion::End),
            _ => None,
        }
    }

    fn shadowed(&self, c: char) -> bool {
        [self.quit, self.help, self.dashboard, self.jobs, self.refresh].contains(&c)
    }

    fn with_alias(&self, base: &str, alias: char) -> String {
        if self.shadowed(alias) {
            base.to_string()
        } else {
            format!("{base}/{alias}")
        }
    }

    /// Rows for the help screen, reflecting the active bindings
    pub fn help_rows(&self) -> Vec<(String, &'static str)> {
        vec![
            (format!("{}/ctrl+c", self.quit), "quit"),
            (self.help.to_string(), "toggle help"),
            (self.dashboard.to_string(), "dashboard"),
            (self.jobs.to_string(), "job list"),
            (self.refresh.to_string(), "refresh"),
            ("enter".to_string(), "open selected job or build"),
            ("esc".to_string(), "back"),
            (self.with_alias("↑", 'k'), "move up"),
            (self.with_alias("↓", 'j'), "move down"),
            ("pgup/pgdn".to_string(), "page up/down"),
            (self.with_alias("home", 'g'), "first item"),
            (self.with_alias("end", 'G'), "last item"),
            ("/".to_string(), "filter the list"),
            ("b".to_string(), "trigger build"),
            ("s".to_string(), "stop build"),
            ("x".to_string(), "delete job"),
        ]
    }

    pub const fn help_key(&self) -> char {
        self.help
    }

    pub const fn quit_key(&self) -> char {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_global_commands() {
        let keys = KeyMap::default();
        assert_eq!(
            keys.global_command(&press(KeyCode::Char('q'))),
            Some(GlobalCommand::Quit)
        );
        assert_eq!(
            keys.global_command(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(GlobalCommand::Help)
        );
        assert_eq!(
            keys.global_command(&press(KeyCode::Char('j'))),
            Some(GlobalCommand::Jobs)
        );
        assert_eq!(keys.global_command(&press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_ctrl_c_quits_and_ctrl_letters_are_not_commands() {
        let keys = KeyMap::default();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(keys.global_command(&ctrl('c')), Some(GlobalCommand::Quit));
        assert_eq!(keys.global_command(&ctrl('r')), None);
    }

    #[test]
    fn test_global_command_beats_vim_alias() {
        let keys = KeyMap::default();
        assert_eq!(keys.motion(&press(KeyCode::Char('j'))), None);
        assert_eq!(keys.motion(&press(KeyCode::Char('k'))), Some(Motion::Up));
        assert_eq!(keys.motion(&press(KeyCode::Down)), Some(Motion::Down));
    }

    #[test]
    fn test_rebinding_jobs_frees_j_for_navigation() {
        let keys = KeyMap::from_config(&KeyBindingsConfig {
            jobs: "o".to_string(),
            ..KeyBindingsConfig::default()
        });
        assert_eq!(keys.motion(&press(KeyCode::Char('j'))), Some(Motion::Down));
        assert_eq!(
            keys.global_command(&press(KeyCode::Char('o'))),
            Some(GlobalCommand::Jobs)
        );
        assert!(keys
            .help_rows()
            .iter()
            .any(|(key, action)| key == "↓/j" && *action == "move down"));
    }

    #[test]
    fn test_help_rows_show_configured_keys() {
        let keys = KeyMap::from_config(&KeyBindingsConfig {
            quit: "Q".to_string(),
            ..KeyBindingsConfig::default()
        });
        let rows = keys.help_rows();
        assert!(rows.iter().any(|(key, _)| key == "Q/ctrl+c"));
        assert!(rows.iter().any(|(key, _)| key == "↓"));
    }

    #[test]
    fn test_empty_binding_keeps_default() {
        let keys = KeyMap::from_config(&KeyBindingsConfig {
            refresh: String::new(),
            ..KeyBindingsConfig::default()
        });
        assert_eq!(
            keys.global_command(&press(KeyCode::Char('r'))),
            Some(GlobalCommand::Refresh)
        );
    }
}

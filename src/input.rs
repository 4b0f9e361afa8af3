//! Input adapter: terminal key events to game actions

use crate::game::Action;
use crate::settings::{self, Keys, Settings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Resolved key bindings, one list of key codes per action
#[derive(Debug, Clone)]
pub struct InputHandler {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

/// Parse a key name from the settings file
fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(key)
}

fn parse_keys(keys: &Keys) -> Vec<KeyCode> {
    keys.names()
        .into_iter()
        .filter_map(|name| {
            let key = parse_key(name);
            if key.is_none() {
                tracing::warn!("Unknown key name in settings: {:?}", name);
            }
            key
        })
        .collect()
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::from_bindings(&settings::KeyBindings::default())
    }
}

impl InputHandler {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_bindings(&settings.keys)
    }

    fn from_bindings(keys: &settings::KeyBindings) -> Self {
        Self {
            bindings: vec![
                (Action::MoveLeft, parse_keys(&keys.move_left)),
                (Action::MoveRight, parse_keys(&keys.move_right)),
                (Action::SoftDrop, parse_keys(&keys.soft_drop)),
                (Action::Rotate, parse_keys(&keys.rotate)),
                (Action::Pause, parse_keys(&keys.pause)),
                (Action::Quit, parse_keys(&keys.quit)),
            ],
        }
    }

    /// Translate a key press into an action, if it is bound
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        self.bindings
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|(action, _)| *action)
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

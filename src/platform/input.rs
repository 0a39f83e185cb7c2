//! Keyboard to logical action translation
//!
//! Physical keys are bound to action names (`p1-right`, `halt`, ...). The
//! simulation only ever sees the resulting held/not-held action state.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::ConfigError;
use crate::sim::ActionSource;

/// Keys the game knows how to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    LeftArrow,
    UpArrow,
    RightArrow,
    DownArrow,
    A,
    D,
    S,
    W,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Space,
        Key::LeftArrow,
        Key::UpArrow,
        Key::RightArrow,
        Key::DownArrow,
        Key::A,
        Key::D,
        Key::S,
        Key::W,
    ];

    /// Browser-style key code
    pub fn code(&self) -> u32 {
        match self {
            Key::Space => 32,
            Key::LeftArrow => 37,
            Key::UpArrow => 38,
            Key::RightArrow => 39,
            Key::DownArrow => 40,
            Key::A => 65,
            Key::D => 68,
            Key::S => 83,
            Key::W => 87,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Space => "SPACE",
            Key::LeftArrow => "LEFT_ARROW",
            Key::UpArrow => "UP_ARROW",
            Key::RightArrow => "RIGHT_ARROW",
            Key::DownArrow => "DOWN_ARROW",
            Key::A => "A",
            Key::D => "D",
            Key::S => "S",
            Key::W => "W",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Key::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Key::ALL.into_iter().find(|key| key.code() == code)
    }
}

/// Key code to action table
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_code: HashMap<u32, String>,
}

impl Bindings {
    /// Build from an action -> key name table
    pub fn from_table(table: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut bindings = Self::default();
        for (action, key_name) in table {
            let key = Key::from_name(key_name).ok_or_else(|| ConfigError::UnknownKey {
                action: action.clone(),
                key: key_name.clone(),
            })?;
            bindings.bind(key, action.clone());
        }
        Ok(bindings)
    }

    /// Bind a key; a key drives one action, the latest binding wins
    pub fn bind(&mut self, key: Key, action: impl Into<String>) {
        self.by_code.insert(key.code(), action.into());
    }

    pub fn action_for(&self, code: u32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }
}

/// Currently held logical actions
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: Bindings,
    held: HashSet<String>,
}

impl InputState {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    /// Returns true if the key was bound and consumed
    pub fn key_down(&mut self, code: u32) -> bool {
        match self.bindings.action_for(code) {
            Some(action) => {
                let action = action.to_owned();
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Returns true if the key was bound and consumed
    pub fn key_up(&mut self, code: u32) -> bool {
        match self.bindings.action_for(code) {
            Some(action) => {
                let action = action.to_owned();
                self.release(&action);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, action: impl Into<String>) {
        self.held.insert(action.into());
    }

    pub fn release(&mut self, action: &str) {
        self.held.remove(action);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl ActionSource for InputState {
    fn current(&self, action: &str) -> bool {
        self.held.contains(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> BTreeMap<String, String> {
        crate::Config::default().bindings
    }

    #[test]
    fn test_key_lookup_by_name_and_code() {
        assert_eq!(Key::from_name("right_arrow"), Some(Key::RightArrow));
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("F13"), None);
        assert_eq!(Key::from_code(32), Some(Key::Space));
        assert_eq!(Key::from_code(1), None);
    }

    #[test]
    fn test_key_down_up_drive_actions() {
        let bindings = Bindings::from_table(&default_table()).unwrap();
        let mut input = InputState::new(bindings);

        assert!(input.key_down(Key::RightArrow.code()));
        assert!(input.current("p1-right"));
        assert!(!input.current("p2-right"));

        assert!(input.key_down(Key::D.code()));
        assert!(input.current("p2-right"));

        assert!(input.key_up(Key::RightArrow.code()));
        assert!(!input.current("p1-right"));
        assert!(input.current("p2-right"));
    }

    #[test]
    fn test_release_all_clears_held_actions() {
        let bindings = Bindings::from_table(&default_table()).unwrap();
        let mut input = InputState::new(bindings);
        input.key_down(Key::LeftArrow.code());
        input.press("p2-up");

        input.release_all();
        assert!(!input.current("p1-left"));
        assert!(!input.current("p2-up"));
    }

    #[test]
    fn test_unbound_keys_are_not_consumed() {
        let bindings = Bindings::from_table(&default_table()).unwrap();
        let mut input = InputState::new(bindings);
        assert!(!input.key_down(Key::DownArrow.code()));
        assert!(!input.key_down(9999));
        assert!(!input.current("anything"));
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        let mut table = default_table();
        table.insert("p1-up".into(), "NUMPAD_8".into());
        let err = Bindings::from_table(&table).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey { ref key, .. } if key == "NUMPAD_8"));
    }

    #[test]
    fn test_rebinding_a_key_replaces_action() {
        let mut bindings = Bindings::default();
        bindings.bind(Key::Space, "halt");
        bindings.bind(Key::Space, "p1-up");
        assert_eq!(bindings.action_for(Key::Space.code()), Some("p1-up"));
    }
}

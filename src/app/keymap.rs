//! Key mapping for reel
//!
//! Maps configured keys to actions. Listing actions go to the focused listing frame,
//! global actions are handled by the input stack driver no matter which frame has
//! focus. Escape, Enter and text editing keys are fixed and never looked up here.

use crate::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any bindable action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Listing(ListingAction),
    Global(GlobalAction),
}

/// Actions of a listing frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListingAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextDirectory,
    PreviousDirectory,
    Play,
    Refresh,
}

/// Actions handled above the frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlobalAction {
    ChangeDirectory,
    RecursiveSearch,
    Pause,
}

/// A key code with its modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Binds every key list of the `[keys]` section.
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::with_capacity(32);
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use ListingAction as L;
        use GlobalAction as G;

        // ListingActions
        bind!(keys.move_up(),            Action::Listing(L::MoveUp));
        bind!(keys.move_down(),          Action::Listing(L::MoveDown));
        bind!(keys.move_left(),          Action::Listing(L::MoveLeft));
        bind!(keys.move_right(),         Action::Listing(L::MoveRight));
        bind!(keys.next_directory(),     Action::Listing(L::NextDirectory));
        bind!(keys.previous_directory(), Action::Listing(L::PreviousDirectory));
        bind!(keys.play(),               Action::Listing(L::Play));
        bind!(keys.refresh(),            Action::Listing(L::Refresh));

        // GlobalActions
        bind!(keys.change_directory(),   Action::Global(G::ChangeDirectory));
        bind!(keys.recursive_search(),   Action::Global(G::RecursiveSearch));
        bind!(keys.pause(),              Action::Global(G::Pause));

        Keymap { map }
    }

    /// Action bound to `key`. A shifted character falls back to its unshifted
    /// binding, since terminals disagree on whether Shift is reported for them.
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let exact = Key {
            code: key.code,
            modifiers: key.modifiers,
        };
        self.map.get(&exact).copied().or_else(|| {
            if !matches!(key.code, KeyCode::Char(_)) || !key.modifiers.contains(KeyModifiers::SHIFT) {
                return None;
            }
            let unshifted = Key {
                code: key.code,
                modifiers: key.modifiers.difference(KeyModifiers::SHIFT),
            };
            self.map.get(&unshifted).copied()
        })
    }
}

/// Parses "Ctrl+n", "<c-n>", "F5", "Up" and similar into a [Key].
///
/// The one letter modifier names (`c`, `a`/`m`, `s`) are only understood inside
/// angle brackets.
pub fn parse_key(s: &str) -> Option<Key> {
    let s = s.trim();
    let (tokens, bracketed): (Vec<&str>, bool) =
        match s.strip_prefix('<').and_then(|inner| inner.strip_suffix('>')) {
            Some(inner) => (inner.split('-').collect(), true),
            None => (s.split(['+', '-']).collect(), false),
        };

    let (name, prefixes) = tokens.split_last()?;
    let modifiers = prefixes
        .iter()
        .try_fold(KeyModifiers::NONE, |acc, p| Some(acc | modifier(p, bracketed)?))?;

    Some(Key {
        code: key_code(name, modifiers)?,
        modifiers,
    })
}

fn modifier(name: &str, bracketed: bool) -> Option<KeyModifiers> {
    match (name.to_ascii_lowercase().as_str(), bracketed) {
        ("ctrl" | "control", _) | ("c", true) => Some(KeyModifiers::CONTROL),
        ("alt" | "meta", _) | ("a" | "m", true) => Some(KeyModifiers::ALT),
        ("shift", _) | ("s", true) => Some(KeyModifiers::SHIFT),
        _ => None,
    }
}

fn key_code(name: &str, modifiers: KeyModifiers) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "space" | "spc" => KeyCode::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if modifiers.contains(KeyModifiers::SHIFT) => {
                    KeyCode::Char(c.to_ascii_uppercase())
                }
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::F(lower.strip_prefix('f')?.parse().ok()?),
            }
        }
    };
    Some(code)
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable key binding"),
        }
    }
}

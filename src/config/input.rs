//! Input configuration options for reel
//!
//! This module defines the `[keys]` table of reel.toml. Each action takes a list of
//! keys written like "Ctrl+n", "<c-space>", "F5" or "Up".
//!
//! Plain printable characters are better left unbound: in a listing they edit the
//! filter line.

use serde::Deserialize;

/// Key lists of all bindable actions
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    move_up: Vec<String>,
    move_down: Vec<String>,
    move_left: Vec<String>,
    move_right: Vec<String>,
    next_directory: Vec<String>,
    previous_directory: Vec<String>,
    play: Vec<String>,
    refresh: Vec<String>,
    change_directory: Vec<String>,
    recursive_search: Vec<String>,
    pause: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    move_up,
    move_down,
    move_left,
    move_right,
    next_directory,
    previous_directory,
    play,
    refresh,
    change_directory,
    recursive_search,
    pause,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            move_up: vec!["Up".into(), "Ctrl+k".into()],
            move_down: vec!["Down".into(), "Ctrl+j".into()],
            move_left: vec!["Left".into(), "Ctrl+h".into()],
            move_right: vec!["Right".into(), "Ctrl+l".into()],

            next_directory: vec!["Ctrl+n".into()],
            previous_directory: vec!["Ctrl+p".into()],

            play: vec!["Ctrl+b".into()],
            refresh: vec!["F5".into()],

            change_directory: vec!["F3".into()],
            recursive_search: vec!["F4".into()],
            pause: vec!["Ctrl+Space".into()],
        }
    }
}

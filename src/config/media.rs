//! Media and player configuration for reel.
//!
//! `[media]` decides which files count as media and how the recursive search
//! filters them. `[player]` picks the program that plays them.

use crate::core::classify::{DEFAULT_EXTENSIONS, MediaClassifier};

use serde::Deserialize;

/// Default address of the player's remote control interface.
pub const DEFAULT_CONTROL_ADDR: &str = "localhost:47246";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Media {
    pub extensions: Vec<String>,
    pub filter_samples: bool,
    pub filter_subs: bool,
    pub rar_folders: bool,
}

impl Default for Media {
    fn default() -> Self {
        Media {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            filter_samples: true,
            filter_subs: true,
            rar_folders: true,
        }
    }
}

impl Media {
    pub fn classifier(&self) -> MediaClassifier {
        MediaClassifier::new(
            &self.extensions,
            self.filter_samples,
            self.filter_subs,
            self.rar_folders,
        )
    }
}

/// Player settings.
///
/// An empty `exe` selects the remote controlled default player; any other value
/// is launched as `exe args... <file>` for every file.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Player {
    pub exe: String,
    pub args: Vec<String>,
    pub control_addr: String,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            exe: String::new(),
            args: Vec::new(),
            control_addr: DEFAULT_CONTROL_ADDR.into(),
        }
    }
}

impl Player {
    #[inline]
    pub fn exe(&self) -> &str {
        self.exe.trim()
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    pub fn control_addr(&self) -> &str {
        &self.control_addr
    }

    pub fn uses_remote_control(&self) -> bool {
        self.exe().is_empty()
    }
}

//! The main config loading module for reel.
//!
//! Handles loading and deserializing settings from `reel.toml` into the [Config]
//! struct, via the internal [RawConfig] used for parsing. Also writes the default
//! config file for `reel --init`.

use crate::config::{General, InternalGeneral, Keys, Media, Player, Theme};
use crate::core::classify::MediaClassifier;
use crate::error::ReelError;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Env var pointing at an explicit config file.
pub const CONFIG_ENV: &str = "REEL_CONFIG";

/// Raw configuration as read from the toml file
/// It is converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    media: Media,
    player: Player,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for reel
#[derive(Debug, Clone)]
pub struct Config {
    general: InternalGeneral,
    media: Media,
    player: Player,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            media: raw.media,
            player: raw.player,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// A missing file or a parse error gives the internal defaults; parse errors
    /// are printed before the terminal is taken over.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error parsing config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReelError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ReelError> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn media(&self) -> &Media {
        &self.media
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn classifier(&self) -> MediaClassifier {
        self.media.classifier()
    }

    // Mutable access for command line overrides

    pub fn general_mut(&mut self) -> &mut InternalGeneral {
        &mut self.general
    }

    pub fn media_mut(&mut self) -> &mut Media {
        &mut self.media
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Determine the default configuration file path.
    /// Checks the REEL_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/reel/reel.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("reel/reel.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/reel/reel.toml");
        }
        PathBuf::from("reel.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# reel.toml - default configuration for reel

# Note:
# Commented values are the internal defaults of reel
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# column_width = 50
# recursive_column_width = 80
# scroll_tick_ms = 250
# scroll_all = false

[media]
# extensions = [".avi", ".mkv", ".mpg", ".wmv"]
# filter_samples = true
# filter_subs = true
# rar_folders = true

[player]
# Empty exe uses vlc through its remote control interface.
# exe = ""
# args = []
# control_addr = "localhost:47246"

[theme]
# directory = "cyan"
# file = "white"
# media = "yellow"
# inaccessible = "red"
# highlight = "magenta"
# header = { fg = "white", bg = "blue" }
# nomatch_header = { fg = "red", bg = "blue" }
# input = { fg = "white", bg = "red" }
# border = { fg = "white", bg = "blue" }
# status_update = { fg = "white", bg = "blue" }
# status_error = { fg = "white", bg = "red" }

[keys]
# move_up = ["Up", "Ctrl+k"]
# move_down = ["Down", "Ctrl+j"]
# move_left = ["Left", "Ctrl+h"]
# move_right = ["Right", "Ctrl+l"]
# next_directory = ["Ctrl+n"]
# previous_directory = ["Ctrl+p"]
# play = ["Ctrl+b"]
# refresh = ["F5"]
# change_directory = ["F3"]
# recursive_search = ["F4"]
# pause = ["Ctrl+Space"]
"##;

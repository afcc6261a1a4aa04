//! Error type shared by the listing, the frames and the player.
//!
//! Everything in here is recoverable: the input stack driver turns a [ReelError]
//! into a status line message and keeps going. Defects (a filter pattern that does
//! not compile) panic instead and never show up as a variant.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReelError {
    #[error("No entry is highlighted. Is this an empty folder?")]
    NoSelection,

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Cannot open {path:?}: {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No previous directory")]
    NoPreviousDirectory,

    #[error("Text boxes need at least {needed} rows, only {available} available")]
    TextBoxTooSmall { needed: u16, available: u16 },

    #[error("Not a media file: {0}")]
    NotMedia(String),

    #[error("Media player '{0}' was not found in PATH")]
    PlayerNotFound(String),

    #[error("Failed to launch {exe:?}: {source}")]
    PlayerLaunch {
        exe: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Player control connection to {addr} failed: {source}")]
    Control {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReelError>;

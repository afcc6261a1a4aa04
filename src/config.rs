//! Configuration for reel.
//!
//! - [load]: finding, parsing and generating `reel.toml`
//! - [general]: column widths and scroll timing
//! - [media]: media extensions, recursive scan filters and the player
//! - [theme]: colors
//! - [input]: key bindings

pub mod general;
pub mod input;
pub mod load;
pub mod media;
pub mod theme;

pub use general::{General, InternalGeneral};
pub use input::Keys;
pub use load::Config;
pub use media::{Media, Player};
pub use theme::{ColorPair, Theme};

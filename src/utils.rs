//! Miscellaneous utility functions for reel.
//!
//! - [cli]: command line parsing into a [cli::CliAction]
//! - [helpers]: color parsing, home directory expansion, column width clamping

pub mod cli;
pub mod helpers;

pub use helpers::{
    clamp_column_width, expand_home_path, get_home, parse_color, resolve_input_path,
};

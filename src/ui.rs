//! Drawing primitives for reel.
//!
//! - [surface]: the [Surface] trait, its ratatui adapter and the in-memory [surface::Grid]
//! - [status]: the status line on the last screen row

pub mod status;
pub mod surface;

pub use surface::Surface;

//! Core runtime logic for reel.
//!
//! This module contains the non-UI pieces used by the application:
//! - [fm]: the lazily read directory tree ([Entry]).
//! - [classify]: media detection and recursive scan filters.
//! - [filter]: incremental regex filtering with highlight carry-over.
//! - [layout]: column windowing that keeps the cursor on screen.
//! - [scroll]: per-cell horizontal scrolling of overflowing labels.
//! - [player]: launching and controlling the media player.
//! - [worker]: scroll tickers, the recursive scan and the update channel.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod classify;
pub mod filter;
pub mod fm;
pub mod layout;
pub mod player;
pub mod scroll;
pub mod terminal;
pub mod worker;

pub use classify::MediaClassifier;
pub use filter::Selection;
pub use fm::{Entry, ListItem};

//! Application layer of reel.
//!
//! - [state]: [AppState], the input stack driver and owner of the status line
//! - [frames]: the [frames::Frame] trait and the [frames::FrameStack] protocol
//! - [listing], [recursive], [textbox]: the three frame kinds
//! - [nav]: directory navigation state of a listing
//! - [view]: filtered selection, column layout and label scrolling shared by listings
//! - [input_line]: single line text editing
//! - [keymap]: key to action mapping built from the config

pub mod frames;
pub mod input_line;
pub mod keymap;
pub mod listing;
pub mod nav;
pub mod recursive;
pub mod state;
pub mod textbox;
pub mod view;

pub use state::{AppState, KeypressResult};

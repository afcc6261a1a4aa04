//! Application State and main controller module for reel.
//!
//! [AppState] drives the input stack:
//! - Escape and Enter go through the [FrameStack] protocol
//! - global keys (change directory, recursive search, pause) are handled here for
//!   every frame
//! - everything else goes to the top frame
//!
//! It is also the one place where an error becomes a status line message.

use crate::app::frames::{Context, FrameKind, FrameStack};
use crate::app::keymap::{Action, GlobalAction, Keymap, ListingAction};
use crate::app::listing::DirectoryListing;
use crate::app::recursive::RecursiveListing;
use crate::app::textbox::TextBox;
use crate::config::Config;
use crate::core::player::{self, MediaPlayer};
use crate::core::worker::{Update, update_channel};
use crate::error::Result;
use crate::ui::status::StatusLine;
use crate::ui::surface::Surface;

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};

/// Enumeration for each individual keypress result processed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Quit,
}

pub const CHANGE_DIRECTORY_PROMPT: &str = "Change directory:";

/// Main struct which holds the central Application state of reel
pub struct AppState<'a> {
    config: &'a Config,
    keymap: Keymap,
    frames: FrameStack,
    status: StatusLine,
    player: Box<dyn MediaPlayer>,
    update_tx: Sender<Update>,
    update_rx: Receiver<Update>,
    size: (u16, u16),
}

impl<'a> AppState<'a> {
    /// Opens the base listing at `start_dir` on a `width` x `height` screen, with the
    /// player from the config.
    pub fn new(config: &'a Config, start_dir: &Path, size: (u16, u16)) -> Result<Self> {
        let player = player::from_settings(config.player());
        Self::with_player(config, start_dir, size, player)
    }

    pub fn with_player(
        config: &'a Config,
        start_dir: &Path,
        (width, height): (u16, u16),
        player: Box<dyn MediaPlayer>,
    ) -> Result<Self> {
        let (update_tx, update_rx) = update_channel();
        let area = (width, height.saturating_sub(1));
        let listing = DirectoryListing::open(start_dir, config, area, update_tx.clone())?;

        let mut frames = FrameStack::new();
        frames.push(Box::new(listing));

        Ok(Self {
            config,
            keymap: Keymap::from_config(config),
            frames,
            status: StatusLine::new(config.theme()),
            player,
            update_tx,
            update_rx,
            size: (width, height),
        })
    }

    // Getters / Accessors

    #[inline]
    pub fn frames(&self) -> &FrameStack {
        &self.frames
    }

    #[inline]
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    #[inline]
    pub fn update_rx(&self) -> &Receiver<Update> {
        &self.update_rx
    }

    /// Screen area left to the frames, above the status line.
    pub fn frame_area(&self) -> (u16, u16) {
        (self.size.0, self.size.1.saturating_sub(1))
    }

    /// Central key handler
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            KeyCode::Esc => {
                let result = self.frames.escape();
                self.report(result);
                return self.quit_if_empty();
            }
            KeyCode::Enter => {
                let ctx = Context {
                    player: self.player.as_ref(),
                };
                let result = self.frames.enter(&ctx);
                self.report(result);
                return self.quit_if_empty();
            }
            _ => {}
        }

        let result = match self.keymap.lookup(key) {
            Some(Action::Global(action)) => self.handle_global(action),
            Some(Action::Listing(action)) => self.dispatch(key, Some(action)),
            None => self.dispatch(key, None),
        };
        self.report(result);
        KeypressResult::Continue
    }

    /// Applies a message from a background worker. Returns whether to redraw.
    pub fn handle_update(&mut self, update: Update) -> bool {
        match update {
            Update::ScrollTick | Update::Discovered => true,
            Update::ScanFinished { root, found } => {
                self.status.show_update(format!(
                    "Found {found} media files below {}",
                    root.display()
                ));
                true
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.frames.resize(width, height.saturating_sub(1));
        self.status.show_update(format!("Resized to {width}x{height}"));
    }

    /// Draws the frames bottom to top, then the status line.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        self.frames.draw(surface);
        self.status.draw(surface);
    }

    fn dispatch(&mut self, key: KeyEvent, action: Option<ListingAction>) -> Result<()> {
        let ctx = Context {
            player: self.player.as_ref(),
        };
        self.frames.dispatch(key, action, &ctx)
    }

    fn handle_global(&mut self, action: GlobalAction) -> Result<()> {
        match action {
            GlobalAction::ChangeDirectory => {
                // one text box at a time
                if self.frames.contains(FrameKind::TextBox) {
                    return Ok(());
                }
                let text_box =
                    TextBox::new(CHANGE_DIRECTORY_PROMPT, self.frame_area(), self.config.theme())?;
                self.frames.push(Box::new(text_box));
            }
            GlobalAction::RecursiveSearch => {
                let root = self.search_root()?;
                tracing::info!(root = %root.display(), "recursive search started");
                self.status
                    .show_update(format!("Searching {} for media", root.display()));
                let search = RecursiveListing::start(
                    &root,
                    self.config,
                    self.frame_area(),
                    self.update_tx.clone(),
                );
                self.frames.push(Box::new(search));
            }
            GlobalAction::Pause => self.player.pause()?,
        }
        Ok(())
    }

    fn search_root(&self) -> Result<PathBuf> {
        match self.frames.working_dir() {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Ok(std::env::current_dir()?),
        }
    }

    fn quit_if_empty(&self) -> KeypressResult {
        if self.frames.is_empty() {
            KeypressResult::Quit
        } else {
            KeypressResult::Continue
        }
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "action failed");
            self.status.show_error(&e);
        }
    }
}

//! The directory listing frame, bottom of the input stack.
//!
//! Draws the header with the current path, the entry columns and the filter line on
//! its last row. Typing edits the filter; bound keys move the cursor, walk sibling
//! directories and play files.

use crate::app::frames::{Commit, Context, FinalizeStatus, Frame, FrameKind};
use crate::app::input_line::InputStyle;
use crate::app::keymap::ListingAction;
use crate::app::nav::NavState;
use crate::app::view::ListingView;
use crate::config::Config;
use crate::core::fm::{Entry, ListItem};
use crate::core::layout::Direction;
use crate::core::worker::{CancelGuard, Update, spawn_ticker};
use crate::error::{ReelError, Result};
use crate::ui::surface::Surface;

use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use std::path::Path;
use std::sync::Arc;

/// Look of the filter line under a listing.
pub const FILTER_STYLE: InputStyle = InputStyle {
    prefix: "> ",
    fill: ' ',
    fg: Color::White,
    bg: Color::Black,
};

pub struct DirectoryListing {
    nav: NavState,
    width: u16,
    height: u16,
    ticker: CancelGuard,
}

impl DirectoryListing {
    /// Opens `path` in a listing covering `width` x `height` cells and starts its
    /// scroll ticker.
    pub fn open(
        path: &Path,
        config: &Config,
        (width, height): (u16, u16),
        update_tx: Sender<Update>,
    ) -> Result<Self> {
        let general = config.general();
        let view = ListingView::new(
            width,
            height.saturating_sub(1),
            general.column_width(),
            config.theme().clone(),
            general.scroll_all(),
        );
        let nav = NavState::open(path, config.classifier(), view)?;

        let ticker = CancelGuard::new();
        spawn_ticker(
            Arc::clone(nav.view().registry()),
            general.scroll_tick(),
            update_tx,
            ticker.flag(),
        );
        tracing::info!(dir = %nav.current_dir().display(), "listing opened");

        Ok(Self {
            nav,
            width,
            height,
            ticker,
        })
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    fn play_highlighted(&self, ctx: &Context<'_>) -> Result<()> {
        let entry = self.nav.highlighted().ok_or(ReelError::NoSelection)?;
        play_entry(entry, ctx)
    }

    /// Text editing keys. Backspace on an empty filter goes up a directory.
    fn edit_filter(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Backspace && self.nav.filter().is_empty() {
            return self.nav.cd_up();
        }
        let filter = self.nav.filter_mut();
        match key.code {
            KeyCode::Backspace => {
                filter.backspace();
            }
            KeyCode::Delete => filter.delete(),
            KeyCode::Home => filter.home(),
            KeyCode::End => filter.end(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                filter.insert(c)
            }
            _ => return Ok(()),
        }
        self.nav.update_filter();
        Ok(())
    }

    fn clear_filter(&mut self) {
        self.nav.filter_mut().clear();
        self.nav.update_filter();
    }
}

/// Plays a file. Directories cannot be played.
pub(crate) fn play_entry(entry: &Arc<Entry>, ctx: &Context<'_>) -> Result<()> {
    if entry.is_container() {
        return Err(ReelError::NotMedia(entry.name().to_string()));
    }
    tracing::info!(file = %entry.path().display(), "play");
    ctx.player.play(entry.path())
}

impl Frame for DirectoryListing {
    fn kind(&self) -> FrameKind {
        FrameKind::Listing
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        action: Option<ListingAction>,
        ctx: &Context<'_>,
    ) -> Result<()> {
        use ListingAction as L;
        match action {
            Some(L::MoveUp) => {
                self.nav.move_cursor(Direction::Up);
            }
            Some(L::MoveDown) => {
                self.nav.move_cursor(Direction::Down);
            }
            Some(L::MoveLeft) => {
                self.nav.move_cursor(Direction::Left);
            }
            Some(L::MoveRight) => {
                self.nav.move_cursor(Direction::Right);
            }
            Some(L::NextDirectory) => self.nav.next_directory()?,
            Some(L::PreviousDirectory) => self.nav.previous_directory()?,
            Some(L::Play) => self.play_highlighted(ctx)?,
            Some(L::Refresh) => self.nav.refresh()?,
            None => self.edit_filter(key)?,
        }
        Ok(())
    }

    fn handle_escape(&mut self) -> bool {
        if self.nav.filter().is_empty() {
            return false;
        }
        self.clear_filter();
        true
    }

    /// Enters the highlighted directory or plays the highlighted media file. The
    /// base listing never finishes.
    fn finalize(&mut self, ctx: &Context<'_>) -> FinalizeStatus {
        let highlighted = self.nav.highlighted().cloned();
        self.nav.filter_mut().clear();
        let result = match highlighted {
            None => Err(ReelError::NoSelection),
            Some(entry) if entry.is_container() => self.nav.cd_highlighted(),
            Some(entry) if entry.is_media() => play_entry(&entry, ctx),
            Some(entry) => Err(ReelError::NotMedia(entry.name().to_string())),
        };
        self.nav.update_filter();
        FinalizeStatus::stay(result)
    }

    fn deactivate(&mut self) -> Result<()> {
        self.ticker.cancel();
        Ok(())
    }

    fn draw(&mut self, surface: &mut dyn Surface, focused: bool) {
        let header = self.nav.current_dir().display().to_string();
        self.nav.view_mut().draw(surface, &header);
        if self.height > 0 {
            self.nav.filter().draw(
                surface,
                (0, self.height - 1, self.width),
                &FILTER_STYLE,
                focused,
            );
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.nav.view_mut().resize(width, height.saturating_sub(1));
    }

    fn working_dir(&self) -> Option<&Path> {
        Some(self.nav.current_dir())
    }

    fn accept(&mut self, commit: &Commit) -> Option<Result<()>> {
        match commit {
            Commit::ChangeDirectory(input) => {
                let result = self.nav.change_directory(input);
                if result.is_ok() {
                    self.clear_filter();
                }
                Some(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::MediaPlayer;
    use crate::core::worker::update_channel;
    use crate::ui::surface::Grid;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::{TempDir, tempdir};

    #[derive(Default)]
    struct RecordingPlayer {
        played: Mutex<Vec<PathBuf>>,
    }

    impl MediaPlayer for RecordingPlayer {
        fn play(&self, path: &Path) -> Result<()> {
            self.played
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(path.to_path_buf());
            Ok(())
        }
        fn pause(&self) -> Result<()> {
            Ok(())
        }
    }

    fn fixture() -> std::result::Result<TempDir, Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        fs::create_dir(tmp.path().join("shows"))?;
        File::create(tmp.path().join("movie.mkv"))?;
        File::create(tmp.path().join("readme.txt"))?;
        File::create(tmp.path().join("shows/ep1.avi"))?;
        Ok(tmp)
    }

    fn listing(path: &Path) -> Result<DirectoryListing> {
        let (tx, _rx) = update_channel();
        DirectoryListing::open(path, &Config::default(), (60, 6), tx)
    }

    fn typed(frame: &mut DirectoryListing, text: &str, ctx: &Context<'_>) -> Result<()> {
        for c in text.chars() {
            frame.handle_input(KeyEvent::from(KeyCode::Char(c)), None, ctx)?;
        }
        Ok(())
    }

    fn highlighted_name(frame: &DirectoryListing) -> Option<String> {
        frame.nav().highlighted().map(|e| e.name().to_string())
    }

    #[test]
    fn typing_filters_and_escape_clears() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let player = RecordingPlayer::default();
        let ctx = Context { player: &player };
        let mut frame = listing(tmp.path())?;

        typed(&mut frame, "mkv", &ctx)?;
        assert_eq!(frame.nav().view().selection().len(), 1);
        assert_eq!(highlighted_name(&frame).as_deref(), Some("movie.mkv"));

        assert!(frame.handle_escape());
        assert_eq!(frame.nav().view().selection().len(), 3);
        assert!(!frame.handle_escape());
        Ok(())
    }

    #[test]
    fn enter_on_media_plays_and_on_dir_enters() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let player = RecordingPlayer::default();
        let ctx = Context { player: &player };
        let mut frame = listing(tmp.path())?;

        let status = frame.finalize(&ctx);
        assert!(!status.done);
        assert!(status.error.is_none());
        assert_eq!(player.played.lock().map_err(|_| "poisoned")?.len(), 1);

        typed(&mut frame, "sho", &ctx)?;
        let status = frame.finalize(&ctx);
        assert!(status.error.is_none());
        assert!(frame.nav().current_dir().ends_with("shows"));
        assert!(frame.nav().filter().is_empty());
        Ok(())
    }

    #[test]
    fn enter_on_plain_file_is_an_error() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let player = RecordingPlayer::default();
        let ctx = Context { player: &player };
        let mut frame = listing(tmp.path())?;

        frame.handle_input(KeyEvent::from(KeyCode::Down), Some(ListingAction::MoveDown), &ctx)?;
        let status = frame.finalize(&ctx);
        assert!(matches!(status.error, Some(ReelError::NotMedia(_))));
        Ok(())
    }

    #[test]
    fn backspace_deletes_then_goes_up() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let player = RecordingPlayer::default();
        let ctx = Context { player: &player };
        let mut frame = listing(&tmp.path().join("shows"))?;

        typed(&mut frame, "e", &ctx)?;
        let backspace = KeyEvent::from(KeyCode::Backspace);
        frame.handle_input(backspace, None, &ctx)?;
        assert!(frame.nav().filter().is_empty());
        assert!(frame.nav().current_dir().ends_with("shows"));

        frame.handle_input(backspace, None, &ctx)?;
        assert_eq!(frame.nav().current_dir(), fs::canonicalize(tmp.path())?);
        Ok(())
    }

    #[test]
    fn change_directory_commit() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let mut frame = listing(tmp.path())?;
        let commit = Commit::ChangeDirectory("shows".into());
        frame.accept(&commit).ok_or("listing ignored the commit")??;
        assert!(frame.nav().current_dir().ends_with("shows"));
        Ok(())
    }

    #[test]
    fn draw_puts_filter_on_last_row() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = fixture()?;
        let player = RecordingPlayer::default();
        let ctx = Context { player: &player };
        let mut frame = listing(tmp.path())?;
        typed(&mut frame, "mov", &ctx)?;

        let mut grid = Grid::new(60, 7);
        frame.draw(&mut grid, true);
        assert!(grid.row_text(0).starts_with(&frame.nav().current_dir().display().to_string()));
        assert!(grid.row_text(1).starts_with("movie.mkv"));
        assert!(grid.row_text(5).starts_with("> mov"));
        assert_eq!(grid.cursor(), Some((5, 5)));
        Ok(())
    }
}

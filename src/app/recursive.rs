//! Recursive media search.
//!
//! Lists every media file below a directory while a background scan is still
//! finding them. The scan appends to a shared list; the frame takes a snapshot of it
//! under the lock before every draw and every key, so the filter always runs against
//! a consistent superset.

use crate::app::frames::{Context, FinalizeStatus, Frame, FrameKind};
use crate::app::input_line::InputLine;
use crate::app::keymap::ListingAction;
use crate::app::listing::{FILTER_STYLE, play_entry};
use crate::app::view::ListingView;
use crate::config::Config;
use crate::core::fm::Entry;
use crate::core::layout::Direction;
use crate::core::worker::{CancelGuard, ScanJob, Update, spawn_scan, spawn_ticker};
use crate::error::{ReelError, Result};
use crate::ui::surface::Surface;

use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

pub struct RecursiveListing {
    root: PathBuf,
    found: Arc<Mutex<Vec<Arc<Entry>>>>,
    snapshot: Vec<Arc<Entry>>,
    filter: InputLine,
    view: ListingView<Entry>,
    width: u16,
    height: u16,
    scan: CancelGuard,
    ticker: CancelGuard,
}

impl RecursiveListing {
    /// Starts scanning `root` and returns the frame showing the results.
    pub fn start(
        root: &Path,
        config: &Config,
        (width, height): (u16, u16),
        update_tx: Sender<Update>,
    ) -> Self {
        let general = config.general();
        let view = ListingView::new(
            width,
            height.saturating_sub(1),
            general.recursive_column_width(),
            config.theme().clone(),
            general.scroll_all(),
        );
        let found = Arc::new(Mutex::new(Vec::new()));

        let scan = CancelGuard::new();
        spawn_scan(ScanJob {
            root: root.to_path_buf(),
            classifier: config.classifier(),
            found: Arc::clone(&found),
            update_tx: update_tx.clone(),
            cancel: scan.flag(),
        });

        let ticker = CancelGuard::new();
        spawn_ticker(
            Arc::clone(view.registry()),
            general.scroll_tick(),
            update_tx,
            ticker.flag(),
        );

        Self {
            root: root.to_path_buf(),
            found,
            snapshot: Vec::new(),
            filter: InputLine::new(),
            view,
            width,
            height,
            scan,
            ticker,
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn view(&self) -> &ListingView<Entry> {
        &self.view
    }

    #[inline]
    pub fn filter(&self) -> &InputLine {
        &self.filter
    }

    /// Number of files found so far.
    pub fn found(&self) -> usize {
        self.found.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Copies new finds and recomputes the selection.
    fn sync(&mut self) {
        {
            let found = self.found.lock().unwrap_or_else(PoisonError::into_inner);
            if found.len() != self.snapshot.len() {
                self.snapshot = found.clone();
            }
        }
        self.view.update_filter(&self.snapshot, self.filter.text());
    }

    fn play_highlighted(&self, ctx: &Context<'_>) -> Result<()> {
        let entry = self.view.highlighted().ok_or(ReelError::NoSelection)?;
        play_entry(entry, ctx)
    }
}

impl Frame for RecursiveListing {
    fn kind(&self) -> FrameKind {
        FrameKind::Recursive
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        action: Option<ListingAction>,
        ctx: &Context<'_>,
    ) -> Result<()> {
        use ListingAction as L;
        self.sync();
        match action {
            Some(L::MoveUp) => {
                self.view.move_cursor(Direction::Up);
            }
            Some(L::MoveDown) => {
                self.view.move_cursor(Direction::Down);
            }
            Some(L::MoveLeft) => {
                self.view.move_cursor(Direction::Left);
            }
            Some(L::MoveRight) => {
                self.view.move_cursor(Direction::Right);
            }
            Some(L::Play) => self.play_highlighted(ctx)?,
            // no directory to move in
            Some(L::NextDirectory | L::PreviousDirectory | L::Refresh) => {}
            None => {
                match key.code {
                    KeyCode::Backspace => {
                        self.filter.backspace();
                    }
                    KeyCode::Delete => self.filter.delete(),
                    KeyCode::Home => self.filter.home(),
                    KeyCode::End => self.filter.end(),
                    KeyCode::Char(c)
                        if !key
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        self.filter.insert(c)
                    }
                    _ => return Ok(()),
                }
                self.sync();
            }
        }
        Ok(())
    }

    fn handle_escape(&mut self) -> bool {
        if self.filter.is_empty() {
            return false;
        }
        self.filter.clear();
        self.sync();
        true
    }

    /// Plays the highlighted file and stays open.
    fn finalize(&mut self, ctx: &Context<'_>) -> FinalizeStatus {
        self.sync();
        FinalizeStatus::stay(self.play_highlighted(ctx))
    }

    fn deactivate(&mut self) -> Result<()> {
        if !self.scan.is_cancelled() {
            tracing::info!(root = %self.root.display(), "recursive listing closed");
        }
        self.scan.cancel();
        self.ticker.cancel();
        Ok(())
    }

    fn draw(&mut self, surface: &mut dyn Surface, focused: bool) {
        self.sync();
        let header = format!("Recursive listing of {}", self.root.display());
        self.view.draw(surface, &header);
        if self.height > 0 {
            self.filter.draw(
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
        self.view.resize(width, height.saturating_sub(1));
    }

    fn working_dir(&self) -> Option<&Path> {
        Some(&self.root)
    }
}

//! Navigation state of a directory listing.
//!
//! Owns the current directory, its children (the superset), the filter line and the
//! view drawing them. Every operation that changes directory either fully succeeds or
//! leaves the state untouched, so a failed `cd` never shows a half-read folder.

use crate::app::input_line::InputLine;
use crate::app::view::ListingView;
use crate::core::classify::MediaClassifier;
use crate::core::fm::{Entry, ListItem};
use crate::core::layout::Direction;
use crate::error::{ReelError, Result};
use crate::utils::resolve_input_path;

use std::path::Path;
use std::sync::Arc;

pub struct NavState {
    current: Arc<Entry>,
    superset: Vec<Arc<Entry>>,
    filter: InputLine,
    view: ListingView<Entry>,
    classifier: MediaClassifier,
}

impl NavState {
    /// Opens `path` and shows its contents.
    pub fn open(path: &Path, classifier: MediaClassifier, view: ListingView<Entry>) -> Result<Self> {
        let current = Entry::open_dir(path, &classifier)?;
        let superset = current.contents(&classifier)?;
        let mut nav = Self {
            current,
            superset,
            filter: InputLine::new(),
            view,
            classifier,
        };
        nav.update_filter();
        Ok(nav)
    }

    // Getters / Accessors

    #[inline]
    pub fn current(&self) -> &Arc<Entry> {
        &self.current
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        self.current.path()
    }

    #[inline]
    pub fn superset(&self) -> &[Arc<Entry>] {
        &self.superset
    }

    #[inline]
    pub fn filter(&self) -> &InputLine {
        &self.filter
    }

    #[inline]
    pub fn filter_mut(&mut self) -> &mut InputLine {
        &mut self.filter
    }

    #[inline]
    pub fn view(&self) -> &ListingView<Entry> {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut ListingView<Entry> {
        &mut self.view
    }

    #[inline]
    pub fn classifier(&self) -> &MediaClassifier {
        &self.classifier
    }

    pub fn highlighted(&self) -> Option<&Arc<Entry>> {
        self.view.highlighted()
    }

    /// Recomputes the selection for the current filter text.
    pub fn update_filter(&mut self) {
        self.view.update_filter(&self.superset, self.filter.text());
    }

    pub fn move_cursor(&mut self, dir: Direction) -> bool {
        self.view.move_cursor(dir)
    }

    // Directory changes

    /// Opens a directory typed by the user. Relative paths resolve against the
    /// current directory and a leading `~` expands to the home directory.
    pub fn change_directory(&mut self, input: &str) -> Result<()> {
        let target = resolve_input_path(input, self.current.path());
        let dir = Entry::open_dir(&target, &self.classifier)?;
        self.enter(dir)
    }

    pub fn cd_highlighted(&mut self) -> Result<()> {
        let entry = self.highlighted().cloned().ok_or(ReelError::NoSelection)?;
        if !entry.is_container() {
            return Err(ReelError::NotADirectory(entry.name().to_string()));
        }
        self.enter(entry)
    }

    /// Moves to the parent directory. At the filesystem root this stays put.
    pub fn cd_up(&mut self) -> Result<()> {
        let parent = self.current.parent(&self.classifier)?;
        self.enter(parent)
    }

    /// Moves to the next accessible sibling directory, if there is one.
    pub fn next_directory(&mut self) -> Result<()> {
        match self.current.next_directory(&self.classifier)? {
            Some(next) => self.enter(next),
            None => Ok(()),
        }
    }

    pub fn previous_directory(&mut self) -> Result<()> {
        let previous = self.current.previous_directory(&self.classifier)?;
        self.enter(previous)
    }

    /// Re-reads the current directory from disk.
    pub fn refresh(&mut self) -> Result<()> {
        self.current.invalidate();
        self.enter(Arc::clone(&self.current))
    }

    fn enter(&mut self, dir: Arc<Entry>) -> Result<()> {
        let superset = dir.contents(&self.classifier)?;
        tracing::debug!(dir = %dir.path().display(), entries = superset.len(), "changed directory");
        self.current = dir;
        self.superset = superset;
        self.view.reset_highlight();
        self.update_filter();
        Ok(())
    }
}

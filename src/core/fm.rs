//! Directory entries and the lazily materialized directory tree for reel.
//!
//! An [Entry] is shared as `Arc<Entry>` and compared by identity, never by name: two
//! files called `episode.mkv` in different folders are different items.
//!
//! Directories read their children once, on first access. Every child keeps a weak
//! link back to its parent together with its own index among the parent's children,
//! so sibling navigation (next/previous directory) is an index walk. Directories
//! opened directly by path have no parent link yet; [Entry::parent] resolves it on
//! demand by reading `path/..` and splicing the existing `Arc` into the freshly read
//! parent, so the tree stays a single connected graph.

use crate::core::classify::MediaClassifier;
use crate::error::{ReelError, Result};

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// What the listing needs to know about an item.
///
/// This is the whole entry source contract: a display name used for filtering and
/// drawing, and a few flags for coloring and deciding what Enter does.
pub trait ListItem: Send + Sync {
    fn display_name(&self) -> Cow<'_, str>;
    fn is_container(&self) -> bool;
    fn is_accessible(&self) -> bool;

    fn is_media(&self) -> bool {
        false
    }
}

struct ParentLink {
    node: Weak<Entry>,
    index: usize,
}

/// A file or directory in the tree, or a file found by the recursive scan.
pub struct Entry {
    name: String,
    label: Option<String>,
    path: PathBuf,
    flags: u8,
    accessible: AtomicBool,
    contents: Mutex<Option<Vec<Arc<Entry>>>>,
    parent: Mutex<Option<ParentLink>>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Entry {
    pub const IS_DIR: u8 = 1 << 0;
    pub const IS_MEDIA: u8 = 1 << 1;

    pub fn new(name: impl Into<String>, path: PathBuf, flags: u8) -> Self {
        Entry {
            name: name.into(),
            label: None,
            path,
            flags,
            accessible: AtomicBool::new(true),
            contents: Mutex::new(None),
            parent: Mutex::new(None),
        }
    }

    /// Entry for a file discovered outside the tree, e.g. by the recursive scan.
    /// `label` replaces the file name for display and filtering.
    pub fn discovered(path: PathBuf, label: Option<String>) -> Self {
        let name = file_name_of(&path);
        let mut entry = Entry::new(name, path, Self::IS_MEDIA);
        entry.label = label;
        entry
    }

    /// Opens a directory by path and reads its children.
    ///
    /// The path is canonicalized so `..` components and symlinks resolve the same way
    /// the parent walk does.
    pub fn open_dir(path: &Path, classifier: &MediaClassifier) -> Result<Arc<Entry>> {
        let abs = fs::canonicalize(path).map_err(|source| ReelError::Inaccessible {
            path: path.to_path_buf(),
            source,
        })?;
        if !abs.is_dir() {
            return Err(ReelError::NotADirectory(abs.display().to_string()));
        }
        let entry = Arc::new(Entry::new(file_name_of(&abs), abs, Self::IS_DIR));
        entry.contents(classifier)?;
        Ok(entry)
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    pub fn mark_inaccessible(&self) {
        self.accessible.store(false, Ordering::Relaxed);
    }

    /// Children of this directory, read on first call and cached afterwards.
    ///
    /// A failed read marks the entry inaccessible; the next call tries again.
    pub fn contents(self: &Arc<Self>, classifier: &MediaClassifier) -> Result<Vec<Arc<Entry>>> {
        let mut guard = self.contents.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(children) = guard.as_ref() {
            return Ok(children.clone());
        }
        if !self.is_dir() {
            return Ok(Vec::new());
        }

        let children = match read_children(self, classifier) {
            Ok(children) => children,
            Err(source) => {
                self.mark_inaccessible();
                return Err(ReelError::Inaccessible {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        self.accessible.store(true, Ordering::Relaxed);
        *guard = Some(children.clone());
        Ok(children)
    }

    /// Drops the cached children so the next [Entry::contents] call re-reads the
    /// directory. Parent links of the old children stay valid for whoever holds them.
    pub fn invalidate(&self) {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The parent directory. The filesystem root is its own parent.
    pub fn parent(self: &Arc<Self>, classifier: &MediaClassifier) -> Result<Arc<Entry>> {
        if let Some(parent) = self.linked_parent() {
            return Ok(parent);
        }
        let Some(parent_path) = self.path.parent() else {
            return Ok(Arc::clone(self));
        };

        let parent = Entry::open_dir(parent_path, classifier)?;
        {
            let mut contents = parent.contents.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(children) = contents.as_mut()
                && let Some(index) = children.iter().position(|c| c.name == self.name)
            {
                children[index] = Arc::clone(self);
                *self.parent.lock().unwrap_or_else(PoisonError::into_inner) = Some(ParentLink {
                    node: Arc::downgrade(&parent),
                    index,
                });
            }
        }
        Ok(parent)
    }

    /// The closest accessible directory after this one among its siblings.
    /// `None` when there is none (not an error, the listing just stays put).
    pub fn next_directory(
        self: &Arc<Self>,
        classifier: &MediaClassifier,
    ) -> Result<Option<Arc<Entry>>> {
        let (siblings, index) = self.siblings(classifier)?;
        let Some(index) = index else {
            return Ok(None);
        };
        Ok(siblings
            .into_iter()
            .skip(index + 1)
            .find(|e| e.is_dir() && e.is_accessible()))
    }

    /// The closest accessible directory before this one among its siblings.
    pub fn previous_directory(self: &Arc<Self>, classifier: &MediaClassifier) -> Result<Arc<Entry>> {
        let (siblings, index) = self.siblings(classifier)?;
        let index = index.ok_or(ReelError::NoPreviousDirectory)?;
        siblings
            .into_iter()
            .take(index)
            .rev()
            .find(|e| e.is_dir() && e.is_accessible())
            .ok_or(ReelError::NoPreviousDirectory)
    }

    fn siblings(
        self: &Arc<Self>,
        classifier: &MediaClassifier,
    ) -> Result<(Vec<Arc<Entry>>, Option<usize>)> {
        let parent = self.parent(classifier)?;
        if Arc::ptr_eq(&parent, self) {
            return Ok((Vec::new(), None));
        }
        let siblings = parent.contents(classifier)?;
        let index = self
            .parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|link| link.index)
            .filter(|&i| siblings.get(i).is_some_and(|s| Arc::ptr_eq(s, self)));
        Ok((siblings, index))
    }

    fn linked_parent(&self) -> Option<Arc<Entry>> {
        self.parent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|link| link.node.upgrade())
    }
}

impl ListItem for Entry {
    fn display_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.label.as_deref().unwrap_or(&self.name))
    }

    fn is_container(&self) -> bool {
        self.is_dir()
    }

    fn is_accessible(&self) -> bool {
        self.accessible.load(Ordering::Relaxed)
    }

    fn is_media(&self) -> bool {
        self.flags & Self::IS_MEDIA != 0
    }
}

/// Reads one directory level, sorted by name, with parent links pointing at `dir`.
fn read_children(dir: &Arc<Entry>, classifier: &MediaClassifier) -> std::io::Result<Vec<Arc<Entry>>> {
    let mut raw = Vec::with_capacity(64);
    for entry in fs::read_dir(&dir.path)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        // follow symlinks so linked folders behave like folders
        let metadata = fs::metadata(&path);
        let is_dir = metadata.as_ref().is_ok_and(|m| m.is_dir());

        let mut flags = 0u8;
        if is_dir {
            flags |= Entry::IS_DIR;
        } else if classifier.is_media(&name) {
            flags |= Entry::IS_MEDIA;
        }

        let child = Entry::new(name, path, flags);
        if metadata.is_err() {
            child.mark_inaccessible();
        }
        raw.push(child);
    }
    raw.sort_by(|a, b| a.name.cmp(&b.name));

    let parent = Arc::downgrade(dir);
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, child)| {
            *child.parent.lock().unwrap_or_else(PoisonError::into_inner) = Some(ParentLink {
                node: Weak::clone(&parent),
                index,
            });
            Arc::new(child)
        })
        .collect())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Background threads for reel.
//!
//! Two kinds of workers feed the event loop through one bounded [Update] channel:
//! - a scroll ticker per listing frame, advancing its [ScrollRegistry] on a fixed
//!   interval
//! - the recursive media scan behind the recursive listing frame
//!
//! Redraw signals go out with `try_send`. When the channel is full a redraw is
//! already pending, so dropping them loses nothing. The final scan result carries
//! state and waits for room instead.
//!
//! Both stop when their cancel flag is set or the receiving side is gone.

use crate::core::classify::MediaClassifier;
use crate::core::fm::Entry;
use crate::core::scroll::ScrollRegistry;

use crossbeam_channel::{Receiver, SendTimeoutError, Sender, TrySendError, bounded};
use walkdir::WalkDir;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Capacity of the update channel.
pub const UPDATE_CAPACITY: usize = 10;

/// How long [deliver] waits for room before checking the cancel flag again.
const DELIVERY_RETRY: Duration = Duration::from_millis(50);

/// Messages from background work to the event loop. Each one means "redraw".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    ScrollTick,
    Discovered,
    ScanFinished { root: PathBuf, found: usize },
}

pub fn update_channel() -> (Sender<Update>, Receiver<Update>) {
    bounded(UPDATE_CAPACITY)
}

/// Sends without blocking. Returns false once the receiver is gone.
fn notify(tx: &Sender<Update>, update: Update) -> bool {
    !matches!(tx.try_send(update), Err(TrySendError::Disconnected(_)))
}

/// Sends an update that must arrive, waiting while the channel is full.
/// Gives up when the receiver is gone or `cancel` is set.
fn deliver(tx: &Sender<Update>, mut update: Update, cancel: &AtomicBool) -> bool {
    loop {
        match tx.send_timeout(update, DELIVERY_RETRY) {
            Ok(()) => return true,
            Err(SendTimeoutError::Disconnected(_)) => return false,
            Err(SendTimeoutError::Timeout(pending)) => {
                if cancel.load(Ordering::Acquire) {
                    return false;
                }
                update = pending;
            }
        }
    }
}

/// Owns a worker's cancel flag and sets it when dropped.
#[derive(Debug, Default)]
pub struct CancelGuard {
    flag: Arc<AtomicBool>,
}

impl CancelGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flag to hand to the worker.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Ticks `registry` every `interval` until `cancel` is set.
pub fn spawn_ticker(
    registry: Arc<ScrollRegistry>,
    interval: Duration,
    update_tx: Sender<Update>,
    cancel: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if cancel.load(Ordering::Acquire) {
                break;
            }
            if registry.tick() && !notify(&update_tx, Update::ScrollTick) {
                break;
            }
        }
    })
}

/// A recursive media scan rooted at `root`.
pub struct ScanJob {
    pub root: PathBuf,
    pub classifier: MediaClassifier,
    pub found: Arc<Mutex<Vec<Arc<Entry>>>>,
    pub update_tx: Sender<Update>,
    pub cancel: Arc<AtomicBool>,
}

/// Walks the tree below `job.root` in name order and appends every accepted media
/// file to `job.found`. A cancelled scan stops quietly without a final message.
pub fn spawn_scan(job: ScanJob) -> JoinHandle<()> {
    thread::spawn(move || run_scan(job))
}

fn run_scan(job: ScanJob) {
    let ScanJob {
        root,
        classifier,
        found,
        update_tx,
        cancel,
    } = job;
    tracing::info!(root = %root.display(), "recursive scan started");

    let mut count = 0usize;
    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        if cancel.load(Ordering::Acquire) {
            tracing::info!(root = %root.display(), found = count, "recursive scan cancelled");
            return;
        }
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !classifier.accept_in_scan(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let label = classifier.scan_label(entry.path());
        let item = Arc::new(Entry::discovered(entry.into_path(), label));
        found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
        count += 1;

        if !notify(&update_tx, Update::Discovered) {
            return;
        }
    }

    tracing::info!(root = %root.display(), found = count, "recursive scan finished");
    if !deliver(&update_tx, Update::ScanFinished { root, found: count }, &cancel) {
        tracing::debug!("scan result not delivered");
    }
}

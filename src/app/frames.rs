//! Modal input stack.
//!
//! Frames are stacked over the base listing: the top frame gets every key that is
//! not handled globally, frames draw bottom to top and only the top one is focused.
//!
//! - Escape asks the top frame first; when it does not consume the key the frame
//!   is popped and deactivated. An empty stack means quit.
//! - Enter finalizes the top frame. A finished frame is popped and its commit, if
//!   any, is handed to the closest frame below that accepts it.

use crate::app::keymap::ListingAction;
use crate::core::player::MediaPlayer;
use crate::error::{ReelError, Result};
use crate::ui::surface::Surface;

use crossterm::event::KeyEvent;
use std::path::Path;

/// What kind of frame sits on the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Listing,
    TextBox,
    Recursive,
}

/// A value a finished frame hands down the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commit {
    ChangeDirectory(String),
}

/// Outcome of [Frame::finalize].
#[derive(Debug, Default)]
pub struct FinalizeStatus {
    pub done: bool,
    pub error: Option<ReelError>,
    pub commit: Option<Commit>,
}

impl FinalizeStatus {
    /// The frame stays open.
    pub fn stay(result: Result<()>) -> Self {
        Self {
            done: false,
            error: result.err(),
            commit: None,
        }
    }

    /// The frame is finished and hands `commit` down.
    pub fn done(commit: Option<Commit>) -> Self {
        Self {
            done: true,
            error: None,
            commit,
        }
    }
}

/// Shared services frames act through.
pub struct Context<'a> {
    pub player: &'a dyn MediaPlayer,
}

pub trait Frame {
    fn kind(&self) -> FrameKind;

    /// Handles a key that is neither Escape, Enter nor a global key. `action` is the
    /// listing action the key is bound to, if any.
    fn handle_input(
        &mut self,
        key: KeyEvent,
        action: Option<ListingAction>,
        ctx: &Context<'_>,
    ) -> Result<()>;

    /// Returns true when the frame used the Escape key itself.
    fn handle_escape(&mut self) -> bool;

    fn finalize(&mut self, ctx: &Context<'_>) -> FinalizeStatus;

    /// Called once the frame has left the stack.
    fn deactivate(&mut self) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, surface: &mut dyn Surface, focused: bool);

    /// `height` excludes the status line.
    fn resize(&mut self, width: u16, height: u16);

    /// Directory shown by this frame.
    fn working_dir(&self) -> Option<&Path> {
        None
    }

    /// Applies a commit from a frame above. `None` when the frame does not take it.
    fn accept(&mut self, _commit: &Commit) -> Option<Result<()>> {
        None
    }
}

#[derive(Default)]
pub struct FrameStack {
    frames: Vec<Box<dyn Frame>>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Box<dyn Frame>) {
        tracing::debug!(kind = ?frame.kind(), depth = self.frames.len() + 1, "frame pushed");
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&dyn Frame> {
        self.frames.last().map(|f| f.as_ref())
    }

    pub fn contains(&self, kind: FrameKind) -> bool {
        self.frames.iter().any(|f| f.kind() == kind)
    }

    /// Directory of the closest frame from the top that shows one.
    pub fn working_dir(&self) -> Option<&Path> {
        self.frames.iter().rev().find_map(|f| f.working_dir())
    }

    /// Pops and deactivates the top frame. The frame is gone even when
    /// deactivating it fails.
    pub fn pop(&mut self) -> Result<()> {
        let Some(mut frame) = self.frames.pop() else {
            return Ok(());
        };
        tracing::debug!(kind = ?frame.kind(), depth = self.frames.len(), "frame popped");
        frame.deactivate()
    }

    /// Escape key. Check [FrameStack::is_empty] afterwards to know whether to quit.
    pub fn escape(&mut self) -> Result<()> {
        let Some(top) = self.frames.last_mut() else {
            return Ok(());
        };
        if top.handle_escape() {
            return Ok(());
        }
        self.pop()
    }

    /// Enter key. The first error wins; a finished frame is popped regardless.
    pub fn enter(&mut self, ctx: &Context<'_>) -> Result<()> {
        let Some(top) = self.frames.last_mut() else {
            return Ok(());
        };
        let status = top.finalize(ctx);
        if !status.done {
            return status.error.map_or(Ok(()), Err);
        }

        let popped = self.pop();
        let committed = match &status.commit {
            Some(commit) => self.deliver(commit),
            None => Ok(()),
        };
        if let Some(err) = status.error {
            return Err(err);
        }
        popped.and(committed)
    }

    /// Hands a key to the top frame.
    pub fn dispatch(
        &mut self,
        key: KeyEvent,
        action: Option<ListingAction>,
        ctx: &Context<'_>,
    ) -> Result<()> {
        match self.frames.last_mut() {
            Some(top) => top.handle_input(key, action, ctx),
            None => Ok(()),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        for frame in &mut self.frames {
            frame.resize(width, height);
        }
    }

    /// Draws bottom to top; only the top frame is focused.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let last = self.frames.len().saturating_sub(1);
        for (i, frame) in self.frames.iter_mut().enumerate() {
            frame.draw(surface, i == last);
        }
    }

    fn deliver(&mut self, commit: &Commit) -> Result<()> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(result) = frame.accept(commit) {
                return result;
            }
        }
        tracing::debug!(?commit, "no frame accepted commit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Grid;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct NoPlayer;

    impl MediaPlayer for NoPlayer {
        fn play(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
        fn pause(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Records calls into a shared log.
    struct Recorder {
        name: &'static str,
        kind: FrameKind,
        pending: bool,
        finish: bool,
        commit: Option<Commit>,
        dir: Option<PathBuf>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, kind: FrameKind, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                kind,
                pending: false,
                finish: false,
                commit: None,
                dir: None,
                log: Rc::clone(log),
            }
        }

        fn record(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl Frame for Recorder {
        fn kind(&self) -> FrameKind {
            self.kind
        }

        fn handle_input(
            &mut self,
            _key: KeyEvent,
            _action: Option<ListingAction>,
            _ctx: &Context<'_>,
        ) -> Result<()> {
            self.record("input");
            self.pending = true;
            Ok(())
        }

        fn handle_escape(&mut self) -> bool {
            let consumed = self.pending;
            self.pending = false;
            consumed
        }

        fn finalize(&mut self, _ctx: &Context<'_>) -> FinalizeStatus {
            self.record("finalize");
            if self.finish {
                FinalizeStatus::done(self.commit.take())
            } else {
                FinalizeStatus::stay(Err(ReelError::NoSelection))
            }
        }

        fn deactivate(&mut self) -> Result<()> {
            self.record("deactivate");
            Ok(())
        }

        fn draw(&mut self, _surface: &mut dyn Surface, focused: bool) {
            self.record(if focused { "draw focused" } else { "draw" });
        }

        fn resize(&mut self, _width: u16, _height: u16) {}

        fn working_dir(&self) -> Option<&Path> {
            self.dir.as_deref()
        }

        fn accept(&mut self, commit: &Commit) -> Option<Result<()>> {
            if self.kind != FrameKind::Listing {
                return None;
            }
            let Commit::ChangeDirectory(dir) = commit;
            self.record(&format!("accept {dir}"));
            Some(Ok(()))
        }
    }

    fn key() -> KeyEvent {
        KeyEvent::from(crossterm::event::KeyCode::Char('x'))
    }

    #[test]
    fn escape_clears_before_popping() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = Context { player: &NoPlayer };
        let mut stack = FrameStack::new();
        stack.push(Box::new(Recorder::new("base", FrameKind::Listing, &log)));
        stack.push(Box::new(Recorder::new("box", FrameKind::TextBox, &log)));

        stack.dispatch(key(), None, &ctx).ok();
        stack.escape().ok();
        assert_eq!(stack.len(), 2);

        stack.escape().ok();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.top().map(|f| f.kind()), Some(FrameKind::Listing));

        stack.escape().ok();
        assert!(stack.is_empty());
        assert_eq!(
            *log.borrow(),
            vec!["box:input", "box:deactivate", "base:deactivate"]
        );
    }

    #[test]
    fn finished_frame_commits_to_frame_below() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = Context { player: &NoPlayer };
        let mut stack = FrameStack::new();
        stack.push(Box::new(Recorder::new("base", FrameKind::Listing, &log)));
        let mut dialog = Recorder::new("box", FrameKind::TextBox, &log);
        dialog.finish = true;
        dialog.commit = Some(Commit::ChangeDirectory("/media".into()));
        stack.push(Box::new(dialog));

        assert!(stack.enter(&ctx).is_ok());
        assert_eq!(stack.len(), 1);
        assert_eq!(
            *log.borrow(),
            vec!["box:finalize", "box:deactivate", "base:accept /media"]
        );
    }

    #[test]
    fn unfinished_frame_stays_and_reports() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = Context { player: &NoPlayer };
        let mut stack = FrameStack::new();
        stack.push(Box::new(Recorder::new("base", FrameKind::Listing, &log)));

        assert!(matches!(stack.enter(&ctx), Err(ReelError::NoSelection)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn draws_bottom_to_top_with_focus_on_top() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = FrameStack::new();
        stack.push(Box::new(Recorder::new("base", FrameKind::Listing, &log)));
        stack.push(Box::new(Recorder::new("search", FrameKind::Recursive, &log)));

        stack.draw(&mut Grid::new(10, 10));
        assert_eq!(*log.borrow(), vec!["base:draw", "search:draw focused"]);
        assert!(stack.contains(FrameKind::Recursive));
        assert!(!stack.contains(FrameKind::TextBox));
    }

    #[test]
    fn working_dir_comes_from_closest_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = FrameStack::new();
        let mut base = Recorder::new("base", FrameKind::Listing, &log);
        base.dir = Some(PathBuf::from("/media"));
        stack.push(Box::new(base));
        stack.push(Box::new(Recorder::new("box", FrameKind::TextBox, &log)));
        assert_eq!(stack.working_dir(), Some(Path::new("/media")));
    }
}

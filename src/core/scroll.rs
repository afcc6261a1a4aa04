//! Marquee scrolling for labels wider than their cell.
//!
//! Every drawn label goes through the [ScrollRegistry]: a draw pass first stages the
//! text of each visible cell with [ScrollRegistry::write], then [ScrollRegistry::draw]
//! renders them and forgets every cell that was not written during the pass. A ticker
//! thread calls [ScrollRegistry::tick] on a fixed interval to advance the offsets of
//! cells that are allowed to scroll.
//!
//! A scrolling label pauses for a few ticks at its start and its end before it moves
//! on or jumps back. Offsets count chars, but overflow and the end position are
//! measured in columns, the same way [write_str] draws.

use crate::ui::surface::{Surface, display_width, write_str};

use ratatui::style::Color;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Ticks a label rests at either end before moving.
pub const PAUSE_TICKS: u8 = 3;

/// What a cell should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
    pub width: u16,
    pub scrolling: bool,
}

impl CellText {
    /// Columns left to draw when the first `offset` chars are skipped.
    fn tail_width(&self, offset: usize) -> usize {
        let tail = self
            .text
            .char_indices()
            .nth(offset)
            .map_or("", |(i, _)| &self.text[i..]);
        display_width(tail)
    }
}

#[derive(Debug)]
struct CellState {
    staged: CellText,
    active: CellText,
    offset: usize,
    edge_pause: u8,
    fresh: bool,
}

impl CellState {
    fn advance(&mut self) -> bool {
        let cell = &self.active;
        let width = cell.width as usize;
        if !cell.scrolling || display_width(&cell.text) <= width {
            return false;
        }

        if self.offset == 0 {
            self.edge_pause += 1;
            if self.edge_pause > PAUSE_TICKS {
                self.edge_pause = 0;
                self.offset = 1;
                return true;
            }
            false
        } else if cell.tail_width(self.offset) <= width {
            self.edge_pause += 1;
            if self.edge_pause > PAUSE_TICKS {
                self.edge_pause = 0;
                self.offset = 0;
                return true;
            }
            false
        } else {
            self.offset += 1;
            true
        }
    }
}

/// Cells keyed by their screen position.
#[derive(Debug, Default)]
pub struct ScrollRegistry {
    cells: Mutex<HashMap<(u16, u16), CellState>>,
}

impl ScrollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `text` for the cell at (x, y) in the current draw pass.
    pub fn write(&self, x: u16, y: u16, text: CellText) {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        match cells.get_mut(&(x, y)) {
            Some(state) => {
                state.staged = text;
                state.fresh = true;
            }
            None => {
                cells.insert(
                    (x, y),
                    CellState {
                        active: text.clone(),
                        staged: text,
                        offset: 0,
                        edge_pause: 0,
                        fresh: true,
                    },
                );
            }
        }
    }

    /// Advances every scrolling cell by one step. Returns whether any offset moved.
    pub fn tick(&self) -> bool {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        let mut moved = false;
        for state in cells.values_mut() {
            moved |= state.advance();
        }
        moved
    }

    /// Renders the cells staged since the last draw and drops all others.
    ///
    /// A cell whose text changed starts over at offset 0.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.retain(|_, state| state.fresh);

        for (&(x, y), state) in cells.iter_mut() {
            if state.staged != state.active {
                if state.staged.text != state.active.text {
                    state.offset = 0;
                    state.edge_pause = 0;
                }
                state.active = state.staged.clone();
            }
            state.fresh = false;

            let cell = &state.active;
            let visible: String = cell.text.chars().skip(state.offset).collect();
            write_str(surface, x, y, cell.width, cell.fg, cell.bg, &visible);
        }
    }

    /// Current scroll offset of the cell at (x, y), in characters.
    pub fn offset_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(x, y))
            .map(|s| s.offset)
    }

    pub fn len(&self) -> usize {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Column layout of a listing.
//!
//! Items fill the screen column by column below a one-row header. When there are
//! more columns than fit, a window of columns is shown and moved just enough to keep
//! the highlighted item on screen.

use crate::core::filter::Selection;
use crate::core::fm::ListItem;

/// Cursor movement inside a listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One on-screen position of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Position in the selection this slot shows (may be past its end).
    pub index: usize,
    pub x: u16,
    pub y: u16,
    /// Columns available to the label.
    pub width: u16,
    /// Whether a one-cell gap follows the label.
    pub gap: bool,
}

#[derive(Debug, Clone)]
pub struct ColumnLayout {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    column_width: u16,
    window_start: usize,
}

impl ColumnLayout {
    /// `height` includes the header row.
    pub fn new(x: u16, y: u16, width: u16, height: u16, column_width: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
            column_width: column_width.max(1),
            window_start: 0,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    // Getters

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn origin(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[inline]
    pub fn column_width(&self) -> u16 {
        self.column_width
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    #[inline]
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Columns that fit entirely on screen, leaving room for a partial one.
    pub fn visible_columns(&self) -> usize {
        (self.width / self.column_width).saturating_sub(1) as usize
    }

    /// (row, column) of a selection index, column-major.
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        let rows = self.rows();
        if rows == 0 {
            return None;
        }
        Some((index % rows, index / rows))
    }

    /// Moves the column window so `highlight` is visible and returns the new start.
    ///
    /// The window only moves when the highlight leaves it: to the highlight's column
    /// when it is left of the window, or so the highlight's column becomes the
    /// rightmost visible one when it is right of the window.
    pub fn update_window(&mut self, len: usize, highlight: Option<usize>) -> usize {
        let rows = self.rows();
        if rows == 0 {
            self.window_start = 0;
            return 0;
        }

        let span = self.visible_columns().max(1);
        let total_columns = len.div_ceil(rows);
        if total_columns <= span {
            self.window_start = 0;
            return 0;
        }

        let Some(highlight) = highlight else {
            self.window_start = self.window_start.min(total_columns - 1);
            return self.window_start;
        };

        let column = highlight / rows;
        if column < self.window_start {
            self.window_start = column;
        } else if column >= self.window_start + span {
            self.window_start = column + 1 - span;
        }
        self.window_start
    }

    /// The grid positions drawn for the current window, including a partially
    /// visible last column. Slots past the end of the selection are drawn blank.
    pub fn slots(&self) -> Vec<Slot> {
        let rows = self.rows();
        let cw = self.column_width;
        let mut slots = Vec::new();
        if rows == 0 {
            return slots;
        }

        let mut column = 0u16;
        while let Some(offset) = column.checked_mul(cw)
            && offset < self.width
        {
            let room_left = self.width - offset;
            let (width, gap) = if cw < room_left {
                (cw - 1, true)
            } else {
                (room_left, false)
            };
            let first = (self.window_start + column as usize) * rows;
            for row in 0..rows {
                slots.push(Slot {
                    index: first + row,
                    x: self.x + offset,
                    y: self.y + 1 + row as u16,
                    width,
                    gap,
                });
            }
            column += 1;
        }
        slots
    }

    /// Moves the highlight of `selection`. Up/Down step by one item, Left/Right by a
    /// whole column, stopping at the first/last item. Returns whether it moved.
    pub fn move_cursor<T: ListItem>(&self, selection: &mut Selection<T>, dir: Direction) -> bool {
        let rows = self.rows().max(1) as isize;
        match dir {
            Direction::Up => selection.move_by(-1),
            Direction::Down => selection.move_by(1),
            Direction::Left => selection.move_by(-rows),
            Direction::Right => selection.move_by(rows),
        }
    }
}

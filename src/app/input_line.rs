//! Single line text input used by the listing filter and the text box.
//!
//! The cursor is a byte offset into the buffer and always sits on a char boundary.

use crate::ui::surface::{Surface, fill, write_str};

use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Look of an input line.
#[derive(Debug, Clone, Copy)]
pub struct InputStyle {
    pub prefix: &'static str,
    pub fill: char,
    pub fg: Color,
    pub bg: Color,
}

#[derive(Debug, Default, Clone)]
pub struct InputLine {
    buffer: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor. Returns false at the start of the line.
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0
            && let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back()
        {
            self.buffer.remove(previous);
            self.cursor = previous;
            return true;
        }
        false
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = previous;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Draws `prefix`, the text and the fill character across `width` cells. The
    /// text scrolls so the cursor stays visible; one cell is kept free for the
    /// cursor at the end. The terminal cursor is placed only when `focused`.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        (x, y, width): (u16, u16, u16),
        style: &InputStyle,
        focused: bool,
    ) {
        let prefix_used = write_str(surface, x, y, width, style.fg, style.bg, style.prefix);
        let field_x = x + prefix_used;
        let field_width = width.saturating_sub(prefix_used);

        let (visible, cursor_offset) =
            field_view(&self.buffer, self.cursor, field_width.saturating_sub(1) as usize);
        let text_width = (visible.width() as u16).min(field_width);
        let used = write_str(surface, field_x, y, text_width, style.fg, style.bg, visible);
        fill(
            surface,
            field_x + used,
            y,
            field_width - used,
            1,
            style.fill,
            style.fg,
            style.bg,
        );

        if focused {
            surface.set_cursor(field_x + cursor_offset as u16, y);
        }
    }
}

/// The tail of `text` that fits `visible_width` columns, and the cursor's column
/// inside it.
fn field_view(text: &str, cursor: usize, visible_width: usize) -> (&str, usize) {
    let cursor = cursor.min(text.len());
    if text.width() <= visible_width {
        return (text, text[..cursor].width());
    }

    let mut current_w = 0;
    let mut start = text.len();
    for (idx, ch) in text[..cursor].char_indices().rev() {
        current_w += ch.width().unwrap_or(0);
        if current_w > visible_width {
            break;
        }
        start = idx;
    }
    let offset = text[start..cursor].width();
    (&text[start..], offset)
}

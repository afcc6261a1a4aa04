//! Cell-level drawing target.
//!
//! Frames draw by setting individual cells, so the same drawing code writes into a
//! ratatui frame during the event loop and into an in-memory [Grid] in tests.

use ratatui::Frame;
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

pub trait Surface {
    /// (width, height) in cells.
    fn size(&self) -> (u16, u16);

    /// Sets one cell. Cells outside the surface are ignored.
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, fg: Color, bg: Color);

    fn set_cursor(&mut self, _x: u16, _y: u16) {}
}

/// A ratatui [Frame] as a drawing surface.
pub struct FrameSurface<'a, 'b> {
    frame: &'a mut Frame<'b>,
}

impl<'a, 'b> FrameSurface<'a, 'b> {
    pub fn new(frame: &'a mut Frame<'b>) -> Self {
        Self { frame }
    }
}

impl Surface for FrameSurface<'_, '_> {
    fn size(&self) -> (u16, u16) {
        let area = self.frame.area();
        (area.width, area.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, fg: Color, bg: Color) {
        if let Some(cell) = self.frame.buffer_mut().cell_mut((x, y)) {
            cell.set_char(glyph).set_fg(fg).set_bg(bg);
        }
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.frame.set_cursor_position((x, y));
    }
}

/// In-memory surface.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<(char, Color, Color)>,
    cursor: Option<(u16, u16)>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Color::Reset, Color::Reset); width as usize * height as usize],
            cursor: None,
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<(char, Color, Color)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// The glyphs of row `y`, trailing blanks included.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y).map(|(c, _, _)| c))
            .collect()
    }

    #[inline]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

impl Surface for Grid {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, fg: Color, bg: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = (glyph, fg, bg);
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some((x, y));
    }
}

/// Columns `ch` takes when drawn by [write_str].
fn glyph_width(ch: char) -> usize {
    if ch.is_control() {
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Columns `text` takes when drawn by [write_str].
pub fn display_width(text: &str) -> usize {
    text.chars().map(glyph_width).sum()
}

/// Writes `text` into `width` columns starting at (x, y) and pads the rest with
/// blanks in `bg`. Wide glyphs take two cells; a glyph that would cross the right
/// edge is dropped. Control characters are drawn as `?`.
///
/// Returns the number of columns taken by the text itself.
pub fn write_str(
    surface: &mut dyn Surface,
    x: u16,
    y: u16,
    width: u16,
    fg: Color,
    bg: Color,
    text: &str,
) -> u16 {
    let (surface_width, _) = surface.size();
    let width = width.min(surface_width.saturating_sub(x));

    let mut col = 0u16;
    for ch in text.chars() {
        let ch = if ch.is_control() { '?' } else { ch };
        let w = glyph_width(ch) as u16;
        if w == 0 {
            continue;
        }
        if col + w > width {
            break;
        }
        surface.set_cell(x + col, y, ch, fg, bg);
        if w == 2 {
            surface.set_cell(x + col + 1, y, ' ', fg, bg);
        }
        col += w;
    }

    let used = col;
    while col < width {
        surface.set_cell(x + col, y, ' ', fg, bg);
        col += 1;
    }
    used
}

/// Fills a rectangle with `glyph`.
#[allow(clippy::too_many_arguments)]
pub fn fill(
    surface: &mut dyn Surface,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    glyph: char,
    fg: Color,
    bg: Color,
) {
    for row in y..y.saturating_add(height) {
        for col in x..x.saturating_add(width) {
            surface.set_cell(col, row, glyph, fg, bg);
        }
    }
}

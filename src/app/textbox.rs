//! Centered text entry dialog.
//!
//! A bordered box with a question and one input line. Enter hands the typed text
//! down the stack as a [Commit]; Escape clears the text first and closes the box on
//! the second press.

use crate::app::frames::{Commit, Context, FinalizeStatus, Frame, FrameKind};
use crate::app::input_line::{InputLine, InputStyle};
use crate::app::keymap::ListingAction;
use crate::config::{ColorPair, Theme};
use crate::error::{ReelError, Result};
use crate::ui::surface::{Surface, fill, write_str};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Border columns plus one blank column on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Borders, blank rows around the question and the input line.
const VERTICAL_OVERHEAD: u16 = 6;
const MIN_HEIGHT: u16 = VERTICAL_OVERHEAD + 1;
const COMFORTABLE_WIDTH: u16 = 30;

/// Position and size of a box on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoxGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// The question split into lines that fit inside the box.
    pub question_rows: u16,
}

impl BoxGeometry {
    /// Fits a box for `question` centered on a `screen_width` x `screen_height` area.
    pub fn fit(question: &str, screen_width: u16, screen_height: u16) -> Result<Self> {
        let too_small = |needed| ReelError::TextBoxTooSmall {
            needed,
            available: screen_height,
        };
        if screen_height < MIN_HEIGHT || screen_width <= HORIZONTAL_OVERHEAD {
            return Err(too_small(MIN_HEIGHT));
        }

        let question_len = question.chars().count() as u16;
        let (width, question_rows) = if question_len + HORIZONTAL_OVERHEAD <= screen_width {
            let width = (question_len + HORIZONTAL_OVERHEAD)
                .max(screen_width.min(COMFORTABLE_WIDTH));
            (width, 1)
        } else {
            let line = screen_width - HORIZONTAL_OVERHEAD;
            (screen_width, question_len.div_ceil(line))
        };

        let height = question_rows + VERTICAL_OVERHEAD;
        if height > screen_height {
            return Err(too_small(height));
        }

        Ok(Self {
            x: screen_width / 2 - width / 2,
            y: screen_height / 2 - height / 2,
            width,
            height,
            question_rows,
        })
    }

    /// Columns available to the question and the input line.
    pub fn inner_width(&self) -> u16 {
        self.width - HORIZONTAL_OVERHEAD
    }
}

pub struct TextBox {
    question: String,
    input: InputLine,
    geometry: BoxGeometry,
    border: ColorPair,
    input_style: InputStyle,
}

impl TextBox {
    pub fn new(question: impl Into<String>, (width, height): (u16, u16), theme: &Theme) -> Result<Self> {
        let question = question.into();
        let geometry = BoxGeometry::fit(&question, width, height)?;
        let input = theme.input();
        Ok(Self {
            question,
            input: InputLine::new(),
            geometry,
            border: theme.border(),
            input_style: InputStyle {
                prefix: "",
                fill: '_',
                fg: input.fg(),
                bg: input.bg(),
            },
        })
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.input.text()
    }

    #[inline]
    pub fn geometry(&self) -> BoxGeometry {
        self.geometry
    }

    fn draw_frame(&self, surface: &mut dyn Surface) {
        let BoxGeometry {
            x,
            y,
            width,
            height,
            ..
        } = self.geometry;
        let (fg, bg) = (self.border.fg(), self.border.bg());
        let right = x + width - 1;
        let bottom = y + height - 1;

        fill(surface, x + 1, y, width - 2, 1, '-', fg, bg);
        fill(surface, x + 1, bottom, width - 2, 1, '-', fg, bg);
        fill(surface, x, y + 1, 1, height - 2, '|', fg, bg);
        fill(surface, right, y + 1, 1, height - 2, '|', fg, bg);
        for (cx, cy) in [(x, y), (right, y), (x, bottom), (right, bottom)] {
            surface.set_cell(cx, cy, '+', fg, bg);
        }
        fill(surface, x + 1, y + 1, width - 2, height - 2, ' ', bg, bg);
    }

    fn draw_question(&self, surface: &mut dyn Surface) {
        let line = self.geometry.inner_width() as usize;
        let chars: Vec<char> = self.question.chars().collect();
        for (row, chunk) in chars.chunks(line.max(1)).enumerate() {
            let text: String = chunk.iter().collect();
            write_str(
                surface,
                self.geometry.x + 2,
                self.geometry.y + 2 + row as u16,
                self.geometry.inner_width(),
                self.border.fg(),
                self.border.bg(),
                &text,
            );
        }
    }
}

impl Frame for TextBox {
    fn kind(&self) -> FrameKind {
        FrameKind::TextBox
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _action: Option<ListingAction>,
        _ctx: &Context<'_>,
    ) -> Result<()> {
        match key.code {
            KeyCode::Backspace => {
                self.input.backspace();
            }
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.insert(c)
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_escape(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        self.input.clear();
        true
    }

    fn finalize(&mut self, _ctx: &Context<'_>) -> FinalizeStatus {
        let text = self.input.text().to_string();
        self.input.clear();
        FinalizeStatus::done(Some(Commit::ChangeDirectory(text)))
    }

    fn draw(&mut self, surface: &mut dyn Surface, focused: bool) {
        self.draw_frame(surface);
        self.draw_question(surface);
        let BoxGeometry {
            x, y, height, ..
        } = self.geometry;
        self.input.draw(
            surface,
            (x + 2, y + height - 3, self.geometry.inner_width()),
            &self.input_style,
            focused,
        );
    }

    /// Recenters the box. When the new screen is too small the old size is kept.
    fn resize(&mut self, width: u16, height: u16) {
        match BoxGeometry::fit(&self.question, width, height) {
            Ok(geometry) => self.geometry = geometry,
            Err(e) => tracing::debug!(error = %e, "text box keeps its size"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Grid;
    use ratatui::style::Color;

    #[test]
    fn short_question_gets_comfortable_width() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let g = BoxGeometry::fit("Change directory:", 80, 24)?;
        assert_eq!((g.width, g.height, g.question_rows), (30, 7, 1));
        assert_eq!((g.x, g.y), (25, 9));

        let narrow = BoxGeometry::fit("Go:", 20, 10)?;
        assert_eq!(narrow.width, 20);
        Ok(())
    }

    #[test]
    fn long_question_wraps_to_screen_width() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let question = "x".repeat(50);
        let g = BoxGeometry::fit(&question, 24, 20)?;
        // 20 columns per line
        assert_eq!((g.width, g.question_rows, g.height), (24, 3, 9));
        assert_eq!(g.x, 0);
        Ok(())
    }

    #[test]
    fn too_small_screen_is_an_error() {
        assert!(matches!(
            BoxGeometry::fit("Change directory:", 80, 6),
            Err(ReelError::TextBoxTooSmall { needed: 7, available: 6 })
        ));
        assert!(matches!(
            BoxGeometry::fit(&"x".repeat(100), 14, 12),
            Err(ReelError::TextBoxTooSmall { needed: 16, .. })
        ));
    }

    #[test]
    fn draws_border_question_and_input() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut tb = TextBox::new("Name:", (30, 9), &Theme::default())?;
        tb.input.insert('a');
        let mut grid = Grid::new(30, 9);
        tb.draw(&mut grid, true);

        let g = tb.geometry();
        assert_eq!((g.x, g.y, g.width, g.height), (0, 1, 30, 7));
        assert_eq!(grid.row_text(1), format!("+{}+", "-".repeat(28)));
        assert_eq!(&grid.row_text(3)[..8], "| Name: ");
        assert_eq!(&grid.row_text(5)[..6], "| a___");
        assert_eq!(grid.cell(2, 5), Some(('a', Color::White, Color::Red)));
        assert_eq!(grid.cell(1, 2), Some((' ', Color::Blue, Color::Blue)));
        assert_eq!(grid.cursor(), Some((3, 5)));
        Ok(())
    }

    #[test]
    fn escape_clears_then_closes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut tb = TextBox::new("Change directory:", (80, 24), &Theme::default())?;
        tb.input.insert('/');
        assert!(tb.handle_escape());
        assert!(tb.text().is_empty());
        assert!(!tb.handle_escape());
        Ok(())
    }
}

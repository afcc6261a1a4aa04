//! Drawing side of a listing: the filtered selection, its column layout and the
//! scroll registry every label is written through.

use crate::config::Theme;
use crate::core::filter::Selection;
use crate::core::fm::ListItem;
use crate::core::layout::{ColumnLayout, Direction};
use crate::core::scroll::{CellText, ScrollRegistry};
use crate::ui::surface::{Surface, write_str};

use ratatui::style::Color;
use std::sync::Arc;

pub struct ListingView<T> {
    selection: Selection<T>,
    layout: ColumnLayout,
    registry: Arc<ScrollRegistry>,
    theme: Theme,
    scroll_all: bool,
}

impl<T: ListItem> ListingView<T> {
    /// `height` covers the header row and the entry rows.
    pub fn new(width: u16, height: u16, column_width: u16, theme: Theme, scroll_all: bool) -> Self {
        Self {
            selection: Selection::new(),
            layout: ColumnLayout::new(0, 0, width, height, column_width),
            registry: Arc::new(ScrollRegistry::new()),
            theme,
            scroll_all,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    #[inline]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    #[inline]
    pub fn registry(&self) -> &Arc<ScrollRegistry> {
        &self.registry
    }

    #[inline]
    pub fn highlighted(&self) -> Option<&Arc<T>> {
        self.selection.highlighted()
    }

    pub fn update_filter(&mut self, superset: &[Arc<T>], input: &str) {
        self.selection.recompute(superset, input);
    }

    /// Forgets the highlight so the next filter pass starts at the first item.
    pub fn reset_highlight(&mut self) {
        self.selection.clear_highlight();
    }

    pub fn move_cursor(&mut self, dir: Direction) -> bool {
        self.layout.move_cursor(&mut self.selection, dir)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout.resize(width, height);
    }

    fn label_color(&self, item: &T) -> Color {
        if !item.is_accessible() {
            self.theme.inaccessible()
        } else if item.is_container() {
            self.theme.directory()
        } else if item.is_media() {
            self.theme.media()
        } else {
            self.theme.file()
        }
    }

    /// Draws the header and the visible window of entries. Entries past the end
    /// of the selection are drawn as blank cells.
    pub fn draw(&mut self, surface: &mut dyn Surface, header: &str) {
        let (x, y) = self.layout.origin();
        self.layout
            .update_window(self.selection.len(), self.selection.highlight_index());

        let colors = if self.selection.no_match() {
            self.theme.nomatch_header()
        } else {
            self.theme.header()
        };
        write_str(
            surface,
            x,
            y,
            self.layout.width(),
            colors.fg(),
            colors.bg(),
            header,
        );

        let highlight = self.selection.highlight_index();
        for slot in self.layout.slots() {
            let cell_width = slot.width + u16::from(slot.gap);
            let Some(item) = self.selection.items().get(slot.index) else {
                write_str(surface, slot.x, slot.y, cell_width, Color::Reset, Color::Reset, "");
                continue;
            };

            let is_highlighted = highlight == Some(slot.index);
            self.registry.write(
                slot.x,
                slot.y,
                CellText {
                    text: item.display_name().into_owned(),
                    fg: self.label_color(item),
                    bg: if is_highlighted {
                        self.theme.highlight()
                    } else {
                        Color::Reset
                    },
                    width: slot.width,
                    scrolling: is_highlighted || self.scroll_all,
                },
            );
            if slot.gap {
                surface.set_cell(slot.x + slot.width, slot.y, ' ', Color::Reset, Color::Reset);
            }
        }

        self.registry.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Grid;
    use std::borrow::Cow;

    struct Item {
        name: &'static str,
        dir: bool,
        accessible: bool,
    }

    impl ListItem for Item {
        fn display_name(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.name)
        }
        fn is_container(&self) -> bool {
            self.dir
        }
        fn is_accessible(&self) -> bool {
            self.accessible
        }
    }

    fn items(names: &[&'static str]) -> Vec<Arc<Item>> {
        names
            .iter()
            .map(|&name| {
                Arc::new(Item {
                    name,
                    dir: name.ends_with('/'),
                    accessible: !name.starts_with('!'),
                })
            })
            .collect()
    }

    #[test]
    fn draws_header_and_columns() {
        let superset = items(&["alpha", "beta/", "!gamma", "delta"]);
        let mut view = ListingView::new(12, 3, 6, Theme::default(), false);
        view.update_filter(&superset, "");

        let mut grid = Grid::new(12, 3);
        view.draw(&mut grid, "/media");
        assert_eq!(grid.row_text(0), "/media      ");
        assert_eq!(grid.row_text(1), "alpha !gamma");
        assert_eq!(grid.row_text(2), "beta/ delta ");

        assert_eq!(grid.cell(0, 1), Some(('a', Color::White, Color::Magenta)));
        assert_eq!(grid.cell(0, 2), Some(('b', Color::Cyan, Color::Reset)));
        assert_eq!(grid.cell(6, 1), Some(('!', Color::Red, Color::Reset)));
    }

    #[test]
    fn nomatch_colors_the_header() {
        let superset = items(&["alpha", "beta"]);
        let mut view = ListingView::new(12, 3, 6, Theme::default(), false);
        view.update_filter(&superset, "zzz");

        let mut grid = Grid::new(12, 3);
        view.draw(&mut grid, "/media");
        assert_eq!(grid.cell(0, 0), Some(('/', Color::Red, Color::Blue)));
        // fallback shows everything
        assert_eq!(grid.row_text(1), "alpha       ");
    }

    #[test]
    fn only_highlighted_label_scrolls_by_default() {
        let superset = items(&["a_long_name_1", "a_long_name_2"]);
        let mut view = ListingView::new(12, 3, 6, Theme::default(), false);
        view.update_filter(&superset, "");
        let mut grid = Grid::new(12, 3);
        view.draw(&mut grid, "");

        for _ in 0..5 {
            view.registry().tick();
        }
        assert_eq!(view.registry().offset_at(0, 1), Some(2));
        assert_eq!(view.registry().offset_at(0, 2), Some(0));
    }

    #[test]
    fn window_follows_cursor() {
        let superset = items(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        // two rows, visible columns = 12 / 4 - 1 = 2
        let mut view = ListingView::new(12, 3, 4, Theme::default(), false);
        view.update_filter(&superset, "");
        for _ in 0..3 {
            view.move_cursor(Direction::Right);
        }
        assert_eq!(view.selection().highlight_index(), Some(6));

        let mut grid = Grid::new(12, 3);
        view.draw(&mut grid, "");
        assert_eq!(view.layout().window_start(), 2);
        assert_eq!(grid.row_text(1), "e   g       ");
    }
}

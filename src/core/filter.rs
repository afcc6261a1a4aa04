//! Live filtering of a listing.
//!
//! The typed filter is never regex syntax for the user: every character is literal,
//! and a space stands for "anything in between". `show s01` therefore matches
//! `The.Show.S01E02.mkv`. Matching is case-insensitive.
//!
//! [Selection::recompute] rebuilds the visible subsequence from scratch on every
//! change and carries the highlight over so the cursor stays physically close to
//! where it was in the superset instead of jumping back to the top.

use crate::core::fm::ListItem;

use regex::Regex;
use std::sync::Arc;

/// Turns free text into the pattern used for matching display names.
pub fn build_pattern(input: &str) -> String {
    let literal = regex::escape(input).replace(' ', "(.*)");
    format!("(?i)({literal})")
}

/// Compiles the filter for `input`.
///
/// # Panics
/// The pattern is built from escaped literals, so a compile failure is a bug in
/// [build_pattern] and not something the user can cause.
pub fn compile_filter(input: &str) -> Regex {
    let pattern = build_pattern(input);
    Regex::new(&pattern)
        .unwrap_or_else(|e| panic!("filter pattern {pattern:?} failed to compile: {e}"))
}

/// The filtered, ordered subsequence of a superset plus the highlighted position.
///
/// The highlight, when present, always indexes into `items`.
pub struct Selection<T> {
    items: Vec<Arc<T>>,
    highlight: Option<usize>,
    no_match: bool,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            highlight: None,
            no_match: false,
        }
    }
}

impl<T: ListItem> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // Getters / Accessors

    #[inline]
    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn highlight_index(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&Arc<T>> {
        self.highlight.and_then(|i| self.items.get(i))
    }

    /// Set when the filter matched nothing and the selection fell back to the
    /// whole superset. Only used to warn the user.
    #[inline]
    pub fn no_match(&self) -> bool {
        self.no_match
    }

    /// Forgets the highlighted item; the next recompute highlights the first match.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Rebuilds the selection for `input` against `superset`.
    ///
    /// Highlight carry-over: the previously highlighted item (or the first superset
    /// item when there was none) is remembered. Until the walk passes it, every match
    /// moves the highlight along; the first match at or after it locks the highlight
    /// for the rest of the walk.
    ///
    /// When nothing matches, the whole superset is shown and [Selection::no_match] is
    /// set. An empty superset gives an empty selection without the flag.
    pub fn recompute(&mut self, superset: &[Arc<T>], input: &str) {
        if superset.is_empty() {
            *self = Self::default();
            return;
        }

        let remembered = self
            .highlighted()
            .cloned()
            .or_else(|| superset.first().cloned());
        let is_remembered =
            |item: &Arc<T>| remembered.as_ref().is_some_and(|r| Arc::ptr_eq(r, item));

        let filter = compile_filter(input);
        let mut items = Vec::with_capacity(superset.len());
        let mut highlight = None;
        let mut seen_remembered = false;
        let mut locked = false;

        for item in superset {
            seen_remembered = seen_remembered || is_remembered(item);
            if !filter.is_match(&item.display_name()) {
                continue;
            }
            if !seen_remembered {
                highlight = Some(items.len());
            } else if !locked {
                highlight = Some(items.len());
                locked = true;
            }
            items.push(Arc::clone(item));
        }

        if items.is_empty() {
            self.items = superset.to_vec();
            self.highlight = Some(superset.iter().position(is_remembered).unwrap_or(0));
            self.no_match = true;
        } else {
            self.items = items;
            self.highlight = highlight;
            self.no_match = false;
        }
    }

    /// Moves the highlight by `delta` positions, clamped to the ends.
    /// Returns whether the highlight moved.
    pub fn move_by(&mut self, delta: isize) -> bool {
        let Some(current) = self.highlight else {
            return false;
        };
        let last = self.items.len().saturating_sub(1);
        let target = current.saturating_add_signed(delta).min(last);
        self.highlight = Some(target);
        target != current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    struct Named(&'static str);

    impl ListItem for Named {
        fn display_name(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.0)
        }
        fn is_container(&self) -> bool {
            false
        }
        fn is_accessible(&self) -> bool {
            true
        }
    }

    fn superset(names: &[&'static str]) -> Vec<Arc<Named>> {
        names.iter().map(|n| Arc::new(Named(n))).collect()
    }

    fn names(sel: &Selection<Named>) -> Vec<&'static str> {
        sel.items().iter().map(|i| i.0).collect()
    }

    fn highlighted(sel: &Selection<Named>) -> Option<&'static str> {
        sel.highlighted().map(|i| i.0)
    }

    #[test]
    fn pattern_escapes_and_spaces_become_wildcards() {
        assert_eq!(build_pattern("a.b c"), r"(?i)(a\.b(.*)c)");
        let re = compile_filter("show s01");
        assert!(re.is_match("The.Show.S01E02.mkv"));
        assert!(!re.is_match("The.S01.Show.mkv"));
    }

    #[test]
    fn metacharacters_are_literal() {
        let re = compile_filter("(1080p)[x]");
        assert!(re.is_match("movie (1080p)[x].mkv"));
        assert!(!re.is_match("movie 1080p x.mkv"));
        let star = compile_filter("*");
        assert!(!star.is_match("abc"));
    }

    #[test]
    fn empty_filter_selects_everything_in_order() {
        let s = superset(&["b", "a", "c"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        assert_eq!(names(&sel), vec!["b", "a", "c"]);
        assert_eq!(sel.highlight_index(), Some(0));
        assert!(!sel.no_match());
    }

    #[test]
    fn empty_filter_keeps_prior_highlight() {
        let s = superset(&["a", "b", "c"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(2);
        sel.recompute(&s, "");
        assert_eq!(highlighted(&sel), Some("c"));
        assert_eq!(sel.highlight_index(), Some(2));
    }

    #[test]
    fn highlight_locks_on_first_match_after_old_position() {
        let s = superset(&["apple", "banana", "cherry", "date_x"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(2);
        assert_eq!(highlighted(&sel), Some("cherry"));

        // only apple matches, and it comes before cherry
        sel.recompute(&s, "p");
        assert_eq!(names(&sel), vec!["apple"]);
        assert_eq!(highlighted(&sel), Some("apple"));

        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(2);
        sel.recompute(&s, "a");
        // apple, banana and date_x match; cherry does not
        assert_eq!(names(&sel), vec!["apple", "banana", "date_x"]);
        assert_eq!(highlighted(&sel), Some("date_x"));
    }

    #[test]
    fn highlight_carry_over_a_b_c_d() {
        let a = Arc::new(Named("a1"));
        let b = Arc::new(Named("b"));
        let c = Arc::new(Named("c"));
        let d = Arc::new(Named("d1"));
        let s = vec![a, b, Arc::clone(&c), Arc::clone(&d)];

        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(2);
        assert!(Arc::ptr_eq(sel.highlighted().unwrap(), &c));

        sel.recompute(&s, "1");
        assert_eq!(names(&sel), vec!["a1", "d1"]);
        assert!(Arc::ptr_eq(sel.highlighted().unwrap(), &d));
        assert_eq!(sel.highlight_index(), Some(1));
    }

    #[test]
    fn no_match_falls_back_to_superset() {
        let s = superset(&["a", "b", "c"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(1);
        sel.recompute(&s, "zzz");
        assert!(sel.no_match());
        assert_eq!(names(&sel), vec!["a", "b", "c"]);
        assert_eq!(highlighted(&sel), Some("b"));

        sel.recompute(&s, "c");
        assert!(!sel.no_match());
        assert_eq!(names(&sel), vec!["c"]);
    }

    #[test]
    fn empty_superset_gives_empty_selection() {
        let s: Vec<Arc<Named>> = Vec::new();
        let mut sel = Selection::new();
        sel.recompute(&s, "anything");
        assert!(sel.is_empty());
        assert!(!sel.no_match());
        assert_eq!(sel.highlight_index(), None);
        assert!(!sel.move_by(1));
    }

    #[test]
    fn recompute_is_idempotent() {
        let s = superset(&["one", "two", "three", "four", "five"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(3);
        for query in ["", "o", "t e", "nothing"] {
            sel.recompute(&s, query);
            let first = (names(&sel), sel.highlight_index(), sel.no_match());
            sel.recompute(&s, query);
            let second = (names(&sel), sel.highlight_index(), sel.no_match());
            assert_eq!(first, second, "query {query:?}");
        }
    }

    #[test]
    fn items_with_equal_names_are_distinct() {
        let first = Arc::new(Named("same"));
        let second = Arc::new(Named("same"));
        let s = vec![Arc::clone(&first), Arc::clone(&second)];
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        sel.move_by(1);
        sel.recompute(&s, "sa");
        assert!(Arc::ptr_eq(sel.highlighted().unwrap(), &second));
    }

    #[test]
    fn move_by_clamps_without_wrapping() {
        let s = superset(&["a", "b", "c"]);
        let mut sel = Selection::new();
        sel.recompute(&s, "");
        assert!(!sel.move_by(-1));
        assert_eq!(sel.highlight_index(), Some(0));
        assert!(sel.move_by(10));
        assert_eq!(sel.highlight_index(), Some(2));
        assert!(!sel.move_by(1));
        assert!(sel.move_by(-5));
        assert_eq!(sel.highlight_index(), Some(0));
    }
}

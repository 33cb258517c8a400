//! Single-digit entry cell.
//!
//! A cell is the smallest editing primitive of the PIN control: it holds at
//! most one decimal digit, knows its own position in the row and carries the
//! `rat-focus` flag used to draw and route focus. All cross-cell behavior
//! (advancing, retreating, completion) lives in the owning state.

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Maximum number of characters a cell accepts.
pub const MAX_CELL_CHARS: usize = 1;

/// Input filter applied to every character entering a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitFilter;

impl DigitFilter {
    /// Only ASCII decimal digits pass; other numeric scripts are rejected.
    pub fn accepts(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    /// Filter a programmatic assignment. Mirrors a length filter: anything
    /// past the first character is dropped before the digit check runs.
    pub fn filter(&self, text: &str) -> Option<String> {
        match text.chars().next() {
            None => Some(String::new()),
            Some(ch) if self.accepts(ch) => Some(ch.to_string()),
            Some(_) => None,
        }
    }
}

/// One digit slot inside the PIN row.
#[derive(Debug, Clone)]
pub struct DigitCell {
    index: usize,
    text: String,
    enabled: bool,
    filter: DigitFilter,
    /// Focus flag for this cell; set by the owning state only.
    pub focus: FocusFlag,
    /// Last rendered area, used for mouse hit-testing.
    pub(crate) area: Rect,
}

impl DigitCell {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
            enabled: true,
            filter: DigitFilter,
            focus: FocusFlag::named(&format!("pinview.cell.{index}")),
            area: Rect::default(),
        }
    }

    // ----- Getters -----
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn digit(&self) -> Option<char> {
        self.text.chars().next()
    }
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.text.chars().count() >= MAX_CELL_CHARS
    }
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
    pub fn is_focused(&self) -> bool {
        self.focus.get()
    }
    pub fn area(&self) -> Rect {
        self.area
    }

    // ----- Setters -----
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ----- Editing primitives -----
    //
    // Each returns `true` when the text was accepted, which the owning state
    // treats as a text-change notification.

    /// Append a typed character. Rejected when the cell is full or the
    /// character is not a digit.
    pub(crate) fn insert_char(&mut self, ch: char) -> bool {
        if self.is_full() || !self.filter.accepts(ch) {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Replace the text programmatically through the digit/length filter.
    pub(crate) fn assign(&mut self, text: &str) -> bool {
        match self.filter.filter(text) {
            Some(filtered) => {
                self.text = filtered;
                true
            }
            None => false,
        }
    }

    /// Remove the digit, if any.
    pub(crate) fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Empty the cell.
    pub(crate) fn clear(&mut self) {
        self.text.clear();
    }
}

impl HasFocus for DigitCell {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_single_ascii_digit() {
        let mut cell = DigitCell::new(2);
        assert_eq!(cell.index(), 2);
        assert!(cell.is_empty());
        assert!(cell.is_enabled());

        assert!(!cell.insert_char('a'));
        assert!(!cell.insert_char('٣')); // Arabic-Indic three
        assert!(cell.insert_char('7'));
        assert!(!cell.insert_char('8'));
        assert_eq!(cell.text(), "7");
        assert_eq!(cell.digit(), Some('7'));
    }

    #[test]
    fn assignment_truncates_then_filters() {
        let mut cell = DigitCell::new(0);
        assert!(cell.assign("42"));
        assert_eq!(cell.text(), "4");
        assert!(!cell.assign("x1"));
        assert_eq!(cell.text(), "4");
        assert!(cell.assign(""));
        assert!(cell.is_empty());
    }

    #[test]
    fn backspace_reports_whether_text_changed() {
        let mut cell = DigitCell::new(0);
        assert!(!cell.backspace());
        cell.insert_char('1');
        assert!(cell.backspace());
        assert!(cell.is_empty());
    }
}

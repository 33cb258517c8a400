//! State and event choreography for the PIN code control.
//!
//! `PinCodeState` owns the row of [`DigitCell`]s and implements the rules
//! that tie them together:
//!
//! - **Forward-advance**: a cell whose text becomes non-empty hands focus to
//!   the next cell.
//! - **Backward-delete**: backspace on an already-empty cell clears the
//!   previous cell and moves focus back to it. This is a key-level rule since
//!   an empty cell produces no text change to observe.
//! - **Focus tracking**: every focus gain records the cell index in
//!   `focus_position`, which the backward-delete rule consults.
//! - **Completion**: whenever the last cell's text becomes non-empty the
//!   concatenated code is delivered to the listener.
//!
//! Everything runs synchronously on the thread that owns the state. Focus
//! changes made here are dispatched to [`PinCodeState::on_focus_change`]
//! immediately, the same way a toolkit would deliver them. Focus moved by a
//! host's `rat_focus::Focus` only touches the cell flags; it is picked up by
//! [`PinCodeState::sync_focus`] before the next edit.

use std::rc::Weak;

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::{Position, Rect};
use tracing::{debug, trace, warn};

use super::cell::DigitCell;
use super::listener::CompletionListener;

#[derive(Debug)]
pub struct PinCodeState {
    cells: Vec<DigitCell>,
    /// Index of the focused cell as seen by the focus listener. `None` while
    /// nothing is focused and while a backward-delete is moving focus.
    focus_position: Option<usize>,
    enabled: bool,
    listener: Option<Weak<dyn CompletionListener>>,
    container_focus: FocusFlag,
    pub(crate) area: Rect,
}

impl Default for PinCodeState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PinCodeState {
    /// Create a row of `length` empty, enabled cells. A zero length is a
    /// valid (if useless) control.
    pub fn new(length: usize) -> Self {
        Self {
            cells: (0..length).map(DigitCell::new).collect(),
            focus_position: None,
            enabled: true,
            listener: None,
            container_focus: FocusFlag::named("pinview"),
            area: Rect::default(),
        }
    }

    // ----- Getters -----
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn cells(&self) -> &[DigitCell] {
        &self.cells
    }
    pub fn cell(&self, index: usize) -> Option<&DigitCell> {
        self.cells.get(index)
    }
    pub fn focus_position(&self) -> Option<usize> {
        self.focus_position
    }
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
    pub fn has_listener(&self) -> bool {
        self.listener.as_ref().is_some_and(|listener| listener.strong_count() > 0)
    }

    /// Index of the cell currently holding input focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.cells.iter().position(DigitCell::is_focused)
    }

    /// Every cell's text concatenated in index order. Empty cells contribute
    /// nothing.
    pub fn code(&self) -> String {
        self.cells.iter().map(DigitCell::text).collect()
    }

    /// `true` when every cell holds a digit. A zero-length row is never complete.
    pub fn is_complete(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|cell| !cell.is_empty())
    }

    // ----- Host operations -----

    /// Replace the completion listener. `None` removes it.
    pub fn set_completion_listener(&mut self, listener: Option<Weak<dyn CompletionListener>>) {
        self.listener = listener;
    }

    /// Empty every cell, forget the tracked focus and focus the first cell.
    pub fn clear(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        self.focus_position = None;
        self.cells.iter_mut().for_each(DigitCell::clear);
        debug!(cells = self.cells.len(), "pin code cleared");
        self.request_focus(0);
    }

    /// Enable or disable the control together with every cell.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.cells.iter_mut().for_each(|cell| cell.set_enabled(enabled));
    }

    // ----- Focus -----

    /// Move input focus to the cell at `index`, then dispatch the focus
    /// notifications. Ignored for out-of-range indices and while disabled.
    pub fn request_focus(&mut self, index: usize) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        if !self.enabled {
            trace!(index, "focus request ignored on disabled pin code");
            return false;
        }
        let previous = self.focused_index();
        for cell in &self.cells {
            cell.focus.set(cell.index() == index);
        }
        if let Some(previous) = previous.filter(|previous| *previous != index) {
            self.on_focus_change(previous, false);
        }
        self.on_focus_change(index, true);
        true
    }

    /// Focus-change callback for the cell with the given index.
    ///
    /// Gaining focus records the cell's position; an index that matches no
    /// cell resets the position to `None`. Losing focus does nothing.
    pub fn on_focus_change(&mut self, index: usize, has_focus: bool) {
        if !has_focus {
            return;
        }
        self.focus_position = self.cells.get(index).map(DigitCell::index);
        match self.focus_position {
            Some(position) => trace!(position, "pin cell focused"),
            None => warn!(index, cells = self.cells.len(), "focus gained by unknown pin cell"),
        }
    }

    /// Deliver a focus gain that happened outside `request_focus`, such as a
    /// host focus tree setting a cell flag directly. Returns the focused index.
    pub fn sync_focus(&mut self) -> Option<usize> {
        let focused = self.focused_index();
        if let Some(index) = focused
            && self.focus_position != Some(index)
        {
            self.on_focus_change(index, true);
        }
        focused
    }

    pub fn focus_previous(&mut self) -> bool {
        match self.focused_index() {
            Some(index) if index > 0 => self.request_focus(index - 1),
            _ => false,
        }
    }

    pub fn focus_next(&mut self) -> bool {
        match self.focused_index() {
            Some(index) => self.request_focus(index + 1),
            None => self.request_focus(0),
        }
    }

    pub fn focus_first(&mut self) -> bool {
        self.request_focus(0)
    }

    pub fn focus_last(&mut self) -> bool {
        match self.cells.len() {
            0 => false,
            len => self.request_focus(len - 1),
        }
    }

    /// Record where each cell was drawn. Extra areas are ignored.
    pub(crate) fn set_layout(&mut self, area: Rect, cell_areas: &[Rect]) {
        self.area = area;
        for (cell, cell_area) in self.cells.iter_mut().zip(cell_areas) {
            cell.area = *cell_area;
        }
    }

    /// Cell under the given terminal position, from the last render.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.cells.iter().position(|cell| cell.area().contains(position))
    }

    // ----- Text input -----

    /// Type a character into the focused cell.
    pub fn type_char(&mut self, ch: char) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(index) = self.sync_focus() else {
            return false;
        };
        if !self.cells[index].insert_char(ch) {
            trace!(index, "pin cell rejected input");
            return false;
        }
        self.on_text_changed(index);
        true
    }

    /// Assign a cell's text programmatically. The text goes through the same
    /// single-digit filter as typed input and fires the same observers.
    pub fn set_cell_text(&mut self, index: usize, text: &str) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if !cell.assign(text) {
            trace!(index, "pin cell rejected assignment");
            return false;
        }
        self.on_text_changed(index);
        true
    }

    /// Backspace/delete key handling for the focused cell.
    ///
    /// A non-empty cell loses its digit. An empty cell triggers the
    /// backward-delete rule.
    pub fn handle_backspace(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(index) = self.sync_focus() else {
            return false;
        };
        if self.cells[index].backspace() {
            self.on_text_changed(index);
            return true;
        }
        self.delete_backward()
    }

    /// Clear the cell before the tracked focus position and move focus to it.
    /// Does nothing on the first cell or when the focused cell still holds a
    /// digit.
    fn delete_backward(&mut self) -> bool {
        let Some(position) = self.focus_position else {
            return false;
        };
        if position == 0 || !self.cells[position].is_empty() {
            return false;
        }
        let previous = position - 1;

        // Suspend tracking until the previous cell reports its focus gain.
        self.focus_position = None;
        self.cells[previous].clear();
        self.on_text_changed(previous);
        debug!(from = position, to = previous, "pin backward delete");
        self.request_focus(previous)
    }

    /// Text-change observer shared by every cell. The last cell additionally
    /// reports completion.
    fn on_text_changed(&mut self, index: usize) {
        if self.cells[index].is_empty() {
            return;
        }
        let last = self.cells.len() - 1;
        if index < last {
            self.request_focus(index + 1);
        } else {
            self.notify_completion();
        }
    }

    fn notify_completion(&self) {
        let code = self.code();
        match self.listener.as_ref().and_then(Weak::upgrade) {
            Some(listener) => {
                debug!(digits = code.len(), complete = self.is_complete(), "pin code entered");
                listener.on_entered(&code);
            }
            None => debug!("pin code entered with no live listener"),
        }
    }
}

impl HasFocus for PinCodeState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        self.cells.iter().for_each(|cell| {
            builder.widget(cell);
        });
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::pin_code::listener::weak_listener;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Recorder = Rc<RefCell<Vec<String>>>;

    fn recording_listener() -> (Recorder, Rc<impl Fn(&str)>) {
        let seen: Recorder = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |code: &str| sink.borrow_mut().push(code.to_string())))
    }

    fn type_code(state: &mut PinCodeState, code: &str) {
        for ch in code.chars() {
            assert!(state.type_char(ch), "typing {ch} was rejected");
        }
    }

    #[test]
    fn construction_creates_empty_enabled_cells() {
        for length in 1..=8 {
            let state = PinCodeState::new(length);
            assert_eq!(state.len(), length);
            assert!(state.cells().iter().all(|cell| cell.is_empty() && cell.is_enabled()));
            assert!(state.cells().iter().enumerate().all(|(i, cell)| cell.index() == i));
            assert_eq!(state.focus_position(), None);
        }
    }

    #[test]
    fn typing_advances_focus_to_the_next_cell() {
        let mut state = PinCodeState::new(4);
        state.request_focus(0);
        for index in 0..3 {
            assert_eq!(state.focused_index(), Some(index));
            state.type_char('5');
            assert_eq!(state.focused_index(), Some(index + 1));
            assert_eq!(state.focus_position(), Some(index + 1));
        }
    }

    #[test]
    fn programmatic_text_also_advances_focus() {
        let mut state = PinCodeState::new(3);
        state.request_focus(0);
        assert!(state.set_cell_text(1, "9"));
        assert_eq!(state.focused_index(), Some(2));
    }

    #[test]
    fn typing_all_digits_reports_the_code() {
        let (seen, listener) = recording_listener();
        let mut state = PinCodeState::new(4);
        state.set_completion_listener(Some(weak_listener(&listener)));
        state.request_focus(0);

        let mut focus_trail = vec![state.focused_index()];
        for ch in ['1', '2', '3', '4'] {
            state.type_char(ch);
            focus_trail.push(state.focused_index());
        }

        assert_eq!(focus_trail, [Some(0), Some(1), Some(2), Some(3), Some(3)]);
        assert_eq!(seen.borrow().as_slice(), ["1234".to_string()]);
        assert!(state.is_complete());
    }

    #[test]
    fn last_cell_reports_even_with_gaps() {
        let (seen, listener) = recording_listener();
        let mut state = PinCodeState::new(4);
        state.set_completion_listener(Some(weak_listener(&listener)));

        state.set_cell_text(1, "7");
        state.set_cell_text(3, "2");

        assert_eq!(seen.borrow().as_slice(), ["72".to_string()]);
        assert!(!state.is_complete());
    }

    #[test]
    fn every_non_empty_edit_of_the_last_cell_reports() {
        let (seen, listener) = recording_listener();
        let mut state = PinCodeState::new(2);
        state.set_completion_listener(Some(weak_listener(&listener)));
        state.request_focus(0);
        type_code(&mut state, "12");

        assert!(state.handle_backspace());
        assert!(state.type_char('3'));
        state.set_cell_text(1, "3");

        assert_eq!(seen.borrow().as_slice(), ["12", "13", "13"].map(String::from));
    }

    #[test]
    fn backspace_on_empty_cell_clears_and_focuses_previous() {
        let (seen, listener) = recording_listener();
        let mut state = PinCodeState::new(4);
        state.set_completion_listener(Some(weak_listener(&listener)));
        state.request_focus(0);
        type_code(&mut state, "1234");
        assert_eq!(seen.borrow().len(), 1);

        // Clear the last digit first; focus stays on cell 3.
        assert!(state.handle_backspace());
        assert_eq!(state.cell(3).map(DigitCell::text), Some(""));
        assert_eq!(state.focused_index(), Some(3));

        assert!(state.handle_backspace());
        assert_eq!(state.code(), "12");
        assert_eq!(state.focused_index(), Some(2));
        assert_eq!(state.focus_position(), Some(2));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn backspace_on_empty_first_cell_does_nothing() {
        let mut state = PinCodeState::new(3);
        state.request_focus(0);
        assert!(!state.handle_backspace());
        assert_eq!(state.focused_index(), Some(0));
        assert_eq!(state.focus_position(), Some(0));
    }

    #[test]
    fn backspace_without_tracked_position_is_ignored() {
        let mut state = PinCodeState::new(3);
        state.request_focus(2);
        state.set_cell_text(1, "4");
        // Focus moved to cell 2 again through forward-advance.
        state.on_focus_change(7, true);
        assert_eq!(state.focus_position(), None);
        assert!(!state.handle_backspace());
        assert_eq!(state.code(), "4");
    }

    #[test]
    fn clear_empties_cells_and_focuses_first() {
        for length in 1..=6 {
            let mut state = PinCodeState::new(length);
            state.request_focus(0);
            type_code(&mut state, &"9".repeat(length));
            state.clear();
            assert!(state.cells().iter().all(DigitCell::is_empty));
            assert_eq!(state.focused_index(), Some(0));
            assert_eq!(state.focus_position(), Some(0));
        }
    }

    #[test]
    fn zero_length_control_is_inert() {
        let mut state = PinCodeState::new(0);
        state.clear();
        state.set_enabled(false);
        state.set_enabled(true);
        assert!(!state.request_focus(0));
        assert!(!state.type_char('1'));
        assert!(!state.handle_backspace());
        assert!(!state.focus_last());
        assert_eq!(state.code(), "");
        assert!(!state.is_complete());
    }

    #[test]
    fn enabled_state_propagates_to_every_cell() {
        let mut state = PinCodeState::new(5);
        state.set_enabled(false);
        assert!(!state.is_enabled());
        assert!(state.cells().iter().all(|cell| !cell.is_enabled()));
        assert!(!state.type_char('1'));

        state.set_enabled(true);
        assert!(state.is_enabled());
        assert!(state.cells().iter().all(DigitCell::is_enabled));
    }

    #[test]
    fn replaced_listener_receives_exclusively() {
        let (first_seen, first) = recording_listener();
        let (second_seen, second) = recording_listener();
        let mut state = PinCodeState::new(3);
        state.set_completion_listener(Some(weak_listener(&first)));
        state.request_focus(0);
        type_code(&mut state, "12");

        state.set_completion_listener(Some(weak_listener(&second)));
        state.type_char('3');

        assert!(first_seen.borrow().is_empty());
        assert_eq!(second_seen.borrow().as_slice(), ["123".to_string()]);
    }

    #[test]
    fn dropped_or_missing_listener_is_skipped() {
        let mut state = PinCodeState::new(1);
        state.request_focus(0);
        assert!(state.type_char('1'));

        let (seen, listener) = recording_listener();
        state.set_completion_listener(Some(weak_listener(&listener)));
        assert!(state.has_listener());
        drop(listener);
        assert!(!state.has_listener());
        state.set_cell_text(0, "2");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn full_cell_rejects_more_input_without_moving_focus() {
        let mut state = PinCodeState::new(2);
        state.set_cell_text(0, "1");
        state.request_focus(0);
        assert!(!state.type_char('2'));
        assert!(!state.type_char('x'));
        assert_eq!(state.focused_index(), Some(0));
        assert_eq!(state.code(), "1");
    }

    #[test]
    fn focus_gain_tracks_the_cell_index() {
        let mut state = PinCodeState::new(4);
        state.request_focus(2);
        assert_eq!(state.focus_position(), Some(2));
        assert!(state.cell(2).is_some_and(DigitCell::is_focused));
        assert_eq!(state.cells().iter().filter(|cell| cell.is_focused()).count(), 1);

        state.on_focus_change(1, false);
        assert_eq!(state.focus_position(), Some(2));

        assert!(state.focus_previous());
        assert_eq!(state.focus_position(), Some(1));
        assert!(state.focus_last());
        assert_eq!(state.focus_position(), Some(3));
        assert!(!state.focus_next());
        assert!(state.focus_first());
        assert_eq!(state.focus_position(), Some(0));
    }

    #[test]
    fn disabled_control_does_not_take_focus() {
        let mut state = PinCodeState::new(2);
        state.set_enabled(false);
        assert!(!state.request_focus(1));
        assert_eq!(state.focused_index(), None);
    }

    #[test]
    fn cell_hit_testing_uses_rendered_areas() {
        let mut state = PinCodeState::new(2);
        state.cells[0].area = Rect::new(0, 0, 5, 3);
        state.cells[1].area = Rect::new(6, 0, 5, 3);
        assert_eq!(state.cell_at(2, 1), Some(0));
        assert_eq!(state.cell_at(7, 2), Some(1));
        assert_eq!(state.cell_at(5, 1), None);
    }

    #[test]
    fn host_focus_tree_moves_are_tracked_before_backward_delete() {
        let mut state = PinCodeState::new(4);
        state.request_focus(0);
        type_code(&mut state, "123");
        assert_eq!(state.focus_position(), Some(3));

        let focus = FocusBuilder::build_for(&state);
        focus.focus(state.cell(1).unwrap());
        assert_eq!(state.focused_index(), Some(1));
        assert_eq!(state.sync_focus(), Some(1));
        assert_eq!(state.focus_position(), Some(1));

        focus.focus(state.cell(2).unwrap());
        assert!(state.handle_backspace());
        assert_eq!(state.code(), "12");
        assert_eq!(state.focus_position(), Some(2));

        focus.focus(state.cell(1).unwrap());
        assert!(state.handle_backspace());
        assert_eq!(state.code(), "1");
        assert_eq!(state.focused_index(), Some(1));
        assert!(state.handle_backspace());
        assert_eq!(state.code(), "");
        assert_eq!(state.focused_index(), Some(0));
        assert_eq!(state.focus_position(), Some(0));
    }
}

use std::rc::Weak;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::{CompletionListener, DigitCell, PinCodeState, PinStyle};
use crate::{
    attributes::{AttributesError, PinAttributes},
    ui::{
        components::component::{Component, Effect},
        theme::{Theme, theme_helpers as th},
    },
};

/// Row of single-digit cells for entering a numeric PIN code.
///
/// The component translates terminal input into the operations of
/// [`PinCodeState`]:
/// - digits type into the focused cell and advance focus
/// - Backspace/Delete erase the focused digit, or step back and erase the
///   previous one when the focused cell is already empty
/// - Left/Right/Home/End and Tab/BackTab move between cells
/// - a left click focuses the cell under the pointer
///
/// Key release events are ignored; terminals only report them when keyboard
/// enhancement is enabled, and the press already carried the edit.
#[derive(Debug, Default)]
pub struct PinCodeInput {
    state: PinCodeState,
    style: PinStyle,
}

impl PinCodeInput {
    /// Create a control with `length` cells and the default style.
    pub fn new(length: usize) -> Self {
        Self {
            state: PinCodeState::new(length),
            style: PinStyle::default(),
        }
    }

    /// Create a control from declarative attributes, using the theme's
    /// dimensions for anything the attributes leave unset.
    pub fn from_attributes(attributes: &PinAttributes, theme: &dyn Theme) -> Result<Self, AttributesError> {
        Ok(Self {
            state: PinCodeState::new(attributes.length()),
            style: PinStyle::resolve(attributes, theme)?,
        })
    }

    pub fn with_style(mut self, style: PinStyle) -> Self {
        self.style = style;
        self
    }

    pub fn state(&self) -> &PinCodeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PinCodeState {
        &mut self.state
    }

    pub fn style(&self) -> &PinStyle {
        &self.style
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn code(&self) -> String {
        self.state.code()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn focus_position(&self) -> Option<usize> {
        self.state.focus_position()
    }

    /// Replace the completion listener; `None` removes it.
    pub fn set_completion_listener(&mut self, listener: Option<Weak<dyn CompletionListener>>) {
        self.state.set_completion_listener(listener);
    }

    /// Empty every cell and focus the first one.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Enable or disable the control and all of its cells.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
    }

    pub fn set_cell_text(&mut self, index: usize, text: &str) -> bool {
        self.state.set_cell_text(index, text)
    }

    pub fn request_focus(&mut self, index: usize) -> bool {
        self.state.request_focus(index)
    }

    /// Size the row would like when laid out with fixed-width cells.
    pub fn preferred_size(&self) -> (u16, u16) {
        self.style.preferred_size(self.state.len())
    }

    fn render_cell(&self, frame: &mut Frame, cell: &DigitCell, area: Rect, theme: &dyn Theme) {
        let enabled = cell.is_enabled();
        let focused = cell.is_focused() && enabled;
        let padding = Padding::new(
            self.style.horizontal_padding,
            self.style.horizontal_padding,
            self.style.vertical_padding,
            self.style.vertical_padding,
        );
        let block = match self.style.bordered {
            true => th::cell_block(theme, focused, enabled),
            false => Block::default().style(th::panel_style(theme)),
        };
        let block = block.padding(padding);

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.is_empty() {
            return;
        }

        // Vertically center the single text line.
        let line_area = Rect {
            y: inner.y + inner.height.saturating_sub(1) / 2,
            height: 1,
            ..inner
        };
        let text_style = th::cell_text_style(theme, enabled, self.style.bold, self.style.text_color);
        let digit = Paragraph::new(Line::from(Span::styled(cell.text(), text_style))).alignment(Alignment::Center);
        frame.render_widget(digit, line_area);

        if focused {
            // Caret sits right after the digit, or centered in an empty cell.
            let text_width = u16::try_from(cell.text().width()).unwrap_or(0);
            let column = line_area.x + line_area.width.saturating_sub(text_width) / 2 + text_width;
            let column = column.min(line_area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(column, line_area.y));
        }
    }
}

impl Component for PinCodeInput {
    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.state.type_char(ch);
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.state.handle_backspace();
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.state.focus_previous();
            }
            KeyCode::Right | KeyCode::Tab => {
                self.state.focus_next();
            }
            KeyCode::Home => {
                self.state.focus_first();
            }
            KeyCode::End => {
                self.state.focus_last();
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Vec<Effect> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
            && let Some(index) = self.state.cell_at(mouse.column, mouse.row)
        {
            self.state.request_focus(index);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme) {
        let areas = self.style.cell_areas(rect, self.state.len());
        self.state.set_layout(rect, &areas);
        for (cell, area) in self.state.cells().iter().zip(areas) {
            self.render_cell(frame, cell, area, theme);
        }
    }
}

impl HasFocus for PinCodeInput {
    fn build(&self, builder: &mut FocusBuilder) {
        self.state.build(builder);
    }

    fn focus(&self) -> FocusFlag {
        self.state.focus()
    }

    fn area(&self) -> Rect {
        self.state.area()
    }
}

//! Component system for the PIN view.
//!
//! Components are self-contained UI elements that handle their own events
//! and render themselves into a provided `Rect`, reporting anything the
//! surrounding runtime must act on as [`Effect`]s.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::ui::theme::Theme;

/// Side effects a component asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop and restore the terminal.
    Quit,
}

/// A UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: the runtime routes input through `handle_key_events()`
///    and `handle_mouse_events()`.
/// 2. **Rendering**: `render()` draws the component into the provided frame area.
///
/// All calls happen on the thread running the event loop.
pub trait Component {
    /// Handle a key event while this component has focus.
    fn handle_key_events(&mut self, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event.
    fn handle_mouse_events(&mut self, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations may record layout information (for hit-testing) but
    /// should leave input state untouched.
    fn render(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme);
}

//! PIN code input: a row of single-digit cells with automatic focus
//! movement and a completion callback.

mod cell;
mod listener;
mod pin_code_component;
mod state;
mod style;

pub use cell::{DigitCell, DigitFilter, MAX_CELL_CHARS};
pub use listener::{CompletionListener, weak_listener};
pub use pin_code_component::PinCodeInput;
pub use state::PinCodeState;
pub use style::PinStyle;

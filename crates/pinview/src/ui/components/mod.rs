pub mod component;
pub mod pin_code;

pub use component::{Component, Effect};
pub use pin_code::{CompletionListener, DigitCell, PinCodeInput, PinCodeState, PinStyle, weak_listener};

//! # PinView
//!
//! A numeric PIN code input for ratatui terminals: a single row of
//! one-digit cells that advances focus as digits are typed, steps back on
//! backspace in an empty cell, and hands the assembled code to a completion
//! listener when the last cell is filled.
//!
//! ## Architecture
//!
//! - [`PinCodeState`] holds the cells and implements the focus/text rules.
//! - [`PinCodeInput`] is the [`Component`] that maps key and mouse events onto
//!   the state and renders the row.
//! - [`PinAttributes`] describes a control declaratively (YAML/JSON), and the
//!   [`Theme`] supplies colors plus default dimensions.
//! - [`run`] drives an interactive session in the terminal.
//!
//! Everything is single-threaded: the control holds its listener through
//! `std::rc::Weak` and must stay on the thread that created it.

pub mod attributes;
mod ui;

use anyhow::Result;

pub use attributes::{AttributesError, PinAttributes};
pub use ui::components::pin_code::{DigitFilter, MAX_CELL_CHARS};
pub use ui::components::{CompletionListener, Component, DigitCell, Effect, PinCodeInput, PinCodeState, PinStyle, weak_listener};
pub use ui::main_component::MainView;
pub use ui::runtime::{RunOptions, RunOutcome};
pub use ui::theme;
pub use ui::theme::Theme;

/// Runs an interactive PIN entry session.
///
/// Sets up the terminal, processes input until the user quits, restores the
/// terminal and returns the last code delivered to the completion listener.
///
/// # Errors
///
/// - Terminal setup failures (raw mode, alternate screen)
/// - Invalid styling attributes (for example an unknown text color)
/// - Errors reading terminal events
pub fn run(options: RunOptions) -> Result<RunOutcome> {
    ui::runtime::run_app(options)
}

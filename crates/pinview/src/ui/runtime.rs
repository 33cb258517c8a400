//! Runtime: terminal lifecycle and the event loop for the PIN view.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Block on `crossterm::event::read()` and route each event to the root
//!   component on the current thread.
//! - Execute returned `Effect`s and redraw after every handled event.
//!
//! The loop is deliberately single-threaded: the PIN control keeps its
//! listener behind an `Rc`, and every mutation happens here.
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tracing::{debug, info, warn};

use crate::attributes::PinAttributes;
use crate::ui::components::{Component, Effect, PinCodeInput};
use crate::ui::main_component::MainView;
use crate::ui::theme::{self, Theme};

/// Options for a single interactive session.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Declarative attributes for the PIN control.
    pub attributes: PinAttributes,
    /// Preferred theme id or alias; `TUI_THEME` takes precedence.
    pub theme: Option<String>,
    /// Start with the control disabled.
    pub start_disabled: bool,
    /// Title rendered above the PIN row.
    pub title: Option<String>,
}

/// Result of a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Last code delivered to the completion listener, if any.
    pub last_code: Option<String>,
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Combine the event-loop and cleanup outcomes. A loop error wins; a cleanup
/// failure behind it is only logged.
fn settle(loop_result: Result<()>, cleanup_result: Result<()>) -> Result<()> {
    match (loop_result, cleanup_result) {
        (Err(error), Err(cleanup_error)) => {
            warn!(error = %format!("{cleanup_error:#}"), "failed to restore terminal");
            Err(error)
        }
        (Err(error), Ok(())) => Err(error),
        (Ok(()), cleanup_result) => cleanup_result.context("failed to restore terminal"),
    }
}

/// Route one terminal event to the root view.
fn handle_input_event(main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(mouse_event),
        Event::Resize(width, height) => {
            debug!(width, height, "terminal resized");
            Vec::new()
        }
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, main_view: &mut MainView, theme: &dyn Theme) -> Result<()> {
    loop {
        terminal.draw(|frame| main_view.render(frame, frame.area(), theme))?;
        let input_event = event::read().context("failed to read terminal event")?;
        let effects = handle_input_event(main_view, input_event);
        if effects.contains(&Effect::Quit) {
            return Ok(());
        }
    }
}

/// Build the root view described by `options`.
pub fn build_main_view(options: &RunOptions, theme: &dyn Theme) -> Result<MainView> {
    let pin = PinCodeInput::from_attributes(&options.attributes, theme).context("invalid pin attributes")?;
    let title = options.title.clone().unwrap_or_else(|| "Enter PIN".to_string());
    let mut main_view = MainView::new(pin, title);
    if options.start_disabled {
        main_view.set_input_enabled(false);
    }
    Ok(main_view)
}

/// Entry point: set up the terminal, run the event loop and restore the
/// terminal even when the loop fails.
pub fn run_app(options: RunOptions) -> Result<RunOutcome> {
    let loaded = theme::load(options.theme.as_deref());
    info!(theme = loaded.definition.id, ansi = loaded.definition.is_ansi_fallback, cells = options.attributes.length(), "starting pin view");
    let mut main_view = build_main_view(&options, loaded.theme.as_ref())?;

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut main_view, loaded.theme.as_ref());
    settle(result, cleanup_terminal(&mut terminal))?;

    Ok(RunOutcome {
        last_code: main_view.last_code(),
    })
}

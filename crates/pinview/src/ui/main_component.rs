use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::info;

use super::components::{CompletionListener, Component, Effect, PinCodeInput, weak_listener};
use super::theme::{Theme, theme_helpers as th};

/// Shared slot the completion listener writes into.
type EnteredCode = Rc<RefCell<Option<String>>>;

/// Root view of the demo: a title, the PIN row, a status line and key hints.
///
/// The view owns the listener passed to the PIN control, so the weak
/// reference held by the control stays valid for the view's lifetime.
pub struct MainView {
    pin: PinCodeInput,
    title: String,
    entered: EnteredCode,
    _listener: Rc<dyn CompletionListener>,
}

impl std::fmt::Debug for MainView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainView")
            .field("pin", &self.pin)
            .field("title", &self.title)
            .field("entered", &self.entered)
            .finish_non_exhaustive()
    }
}

impl MainView {
    pub fn new(mut pin: PinCodeInput, title: impl Into<String>) -> Self {
        let entered: EnteredCode = Rc::new(RefCell::new(None));
        let sink = entered.clone();
        let listener = Rc::new(move |code: &str| {
            info!(digits = code.len(), "pin code entered");
            *sink.borrow_mut() = Some(code.to_string());
        });
        pin.set_completion_listener(Some(weak_listener(&listener)));
        pin.clear();
        Self {
            pin,
            title: title.into(),
            entered,
            _listener: listener,
        }
    }

    pub fn pin(&self) -> &PinCodeInput {
        &self.pin
    }

    /// Most recent code delivered by the completion listener.
    pub fn last_code(&self) -> Option<String> {
        self.entered.borrow().clone()
    }

    /// Enable or disable the PIN row; re-enabling restores focus if none is held.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.pin.set_enabled(enabled);
        if enabled && self.pin.state().focused_index().is_none() {
            self.pin.request_focus(0);
        }
        info!(enabled, "pin input toggled");
    }

    fn status_line(&self, theme: &dyn Theme) -> Line<'static> {
        if !self.pin.is_enabled() {
            return Line::from(Span::styled("Input disabled", theme.status_warning()));
        }
        if self.pin.is_empty() {
            return Line::from(Span::styled("No digits configured", theme.status_error()));
        }
        match self.last_code() {
            Some(code) => Line::from(vec![
                Span::styled("Entered ", theme.text_secondary_style()),
                Span::styled(code, theme.status_success()),
            ]),
            None => Line::from(Span::styled(
                format!("Enter {} digits", self.pin.len()),
                theme.text_secondary_style(),
            )),
        }
    }

    fn hints_line(theme: &dyn Theme) -> Line<'static> {
        let hints = [("0-9", "type"), ("⌫", "delete"), ("←/→", "move"), ("^R", "clear"), ("^E", "enable"), ("Esc", "quit")];
        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (key, label) in hints {
            spans.push(Span::styled(key, theme.accent_emphasis_style()));
            spans.push(Span::styled(format!(" {label}"), theme.text_muted_style()));
            spans.push(Span::raw("  "));
        }
        spans.pop();
        Line::from(spans)
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => vec![Effect::Quit],
            KeyCode::Char('c') if control => vec![Effect::Quit],
            KeyCode::Char('r') if control => {
                self.entered.borrow_mut().take();
                self.pin.clear();
                Vec::new()
            }
            KeyCode::Char('e') if control => {
                self.set_input_enabled(!self.pin.is_enabled());
                Vec::new()
            }
            _ => self.pin.handle_key_events(key),
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Vec<Effect> {
        self.pin.handle_mouse_events(mouse)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, theme: &dyn Theme) {
        frame.render_widget(Paragraph::new("").style(th::panel_style(theme)), rect);

        let (pin_width, pin_height) = self.pin.preferred_size();
        let [title_area, pin_area, status_area, hints_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(pin_height),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(rect);

        let title = Paragraph::new(Line::from(Span::styled(self.title.clone(), theme.accent_emphasis_style())))
            .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let pin_area = if self.pin.style().full_width {
            pin_area
        } else {
            let [centered] = Layout::horizontal([Constraint::Length(pin_width)]).flex(Flex::Center).areas(pin_area);
            centered
        };
        self.pin.render(frame, pin_area, theme);

        let status_area = Rect {
            y: status_area.y + 1,
            height: 1,
            ..status_area
        };
        frame.render_widget(Paragraph::new(self.status_line(theme)).alignment(Alignment::Center), status_area);
        frame.render_widget(Paragraph::new(Self::hints_line(theme)).alignment(Alignment::Center), hints_area);
    }
}

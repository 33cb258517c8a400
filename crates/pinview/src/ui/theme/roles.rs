use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Names of the dimensions a theme can provide to widgets.
pub mod dimens {
    /// Default margin around each PIN cell, in columns.
    pub const PIN_PADDING: &str = "pinview_padding";
    /// Default height of each PIN cell, in rows.
    pub const PIN_TEXT: &str = "pinview_text";
}

/// Semantic color roles used throughout the UI.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub focus: Color,
}

/// Theme trait exposes semantic roles, named dimensions and common style builders.
pub trait Theme: Send + Sync + Debug {
    fn roles(&self) -> &ThemeRoles;

    /// Look up a named layout dimension (see [`dimens`]).
    fn dimension(&self, name: &str) -> Option<u16> {
        match name {
            dimens::PIN_PADDING => Some(1),
            dimens::PIN_TEXT => Some(3),
            _ => None,
        }
    }

    // Text styles
    fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles().text)
    }
    fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles().text_secondary)
    }
    fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles().text_muted)
    }

    // Borders and focus
    fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles().focus } else { self.roles().border };
        Style::default().fg(color)
    }

    // Status styles
    fn status_success(&self) -> Style {
        Style::default().fg(self.roles().success)
    }
    fn status_warning(&self) -> Style {
        Style::default().fg(self.roles().warning)
    }
    fn status_error(&self) -> Style {
        Style::default().fg(self.roles().error)
    }

    // Accents
    fn accent_emphasis_style(&self) -> Style {
        Style::default().fg(self.roles().accent_primary).add_modifier(Modifier::BOLD)
    }
}

//! ANSI 256-color fallback theme for terminals without truecolor support.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

/// Indexed-color approximation of the Nord palette.
#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(236),
                surface: Color::Indexed(237),
                surface_muted: Color::Indexed(239),
                border: Color::Indexed(239),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(250),
                text_muted: Color::Indexed(244),

                accent_primary: Color::Indexed(117),

                success: Color::Indexed(114),
                warning: Color::Indexed(215),
                error: Color::Indexed(167),

                focus: Color::Indexed(117),
            },
        }
    }
}

impl Default for Ansi256Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Move an RGB color towards white by `factor` (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn lighten_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |channel: u8| (channel as f32 + (255.0 - channel as f32) * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Border block for one PIN cell. Disabled cells use muted borders.
pub fn cell_block<T: Theme + ?Sized>(theme: &T, focused: bool, enabled: bool) -> Block<'static> {
    let border_style = if enabled {
        theme.border_style(focused)
    } else {
        theme.text_muted_style()
    };
    let border_type = if focused { BorderType::Thick } else { BorderType::Plain };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(panel_style(theme))
}

/// Text style for the digit inside a PIN cell.
///
/// `text_color` overrides the theme's primary text color while enabled.
pub fn cell_text_style<T: Theme + ?Sized>(theme: &T, enabled: bool, bold: bool, text_color: Option<Color>) -> Style {
    let mut style = if !enabled {
        theme.text_muted_style()
    } else if let Some(color) = text_color {
        Style::default().fg(color)
    } else {
        theme.text_primary_style()
    };
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_rgb_moves_towards_white() {
        assert_eq!(lighten_rgb(Color::Rgb(0, 255, 55), 0.5), Color::Rgb(128, 255, 155));
        assert_eq!(lighten_rgb(Color::Indexed(12), 0.5), Color::Indexed(12));
    }
}

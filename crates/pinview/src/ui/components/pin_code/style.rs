//! Visual configuration of the PIN row and the cell layout derived from it.

use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::Color;

use crate::attributes::{AttributesError, PinAttributes};
use crate::ui::theme::{Theme, dimens};

const DEFAULT_MARGIN: u16 = 1;
const DEFAULT_CELL_HEIGHT: u16 = 3;

/// Resolved look of the PIN row. Purely visual; nothing here affects input
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinStyle {
    /// Margin on each side of a cell, in columns.
    pub margin: u16,
    /// Fixed cell width; `None` sizes cells to fit one digit.
    pub cell_width: Option<u16>,
    /// Requested cell height in rows.
    pub cell_height: u16,
    pub horizontal_padding: u16,
    pub vertical_padding: u16,
    pub bold: bool,
    pub full_width: bool,
    pub bordered: bool,
    pub text_color: Option<Color>,
}

impl Default for PinStyle {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            cell_width: None,
            cell_height: DEFAULT_CELL_HEIGHT,
            horizontal_padding: 0,
            vertical_padding: 0,
            bold: true,
            full_width: false,
            bordered: true,
            text_color: None,
        }
    }
}

impl PinStyle {
    /// Build a style from attributes, taking margin and height from the
    /// theme's named dimensions where the attributes leave them unset.
    pub fn resolve(attributes: &PinAttributes, theme: &dyn Theme) -> Result<Self, AttributesError> {
        Ok(Self {
            margin: attributes
                .pin_margin
                .or_else(|| theme.dimension(dimens::PIN_PADDING))
                .unwrap_or(DEFAULT_MARGIN),
            cell_width: attributes.pin_width,
            cell_height: attributes
                .pin_text_size
                .or_else(|| theme.dimension(dimens::PIN_TEXT))
                .unwrap_or(DEFAULT_CELL_HEIGHT),
            horizontal_padding: attributes.pin_horizontal_padding,
            vertical_padding: attributes.pin_vertical_padding,
            bold: attributes.pin_is_bold,
            full_width: attributes.is_full_width,
            bordered: attributes.pin_bordered,
            text_color: attributes.text_color()?,
        })
    }

    fn border_size(&self) -> u16 {
        if self.bordered { 2 } else { 0 }
    }

    /// Smallest width that still shows one digit with padding and borders.
    pub fn min_cell_width(&self) -> u16 {
        1 + 2 * self.horizontal_padding + self.border_size()
    }

    /// Smallest height that still shows one digit with padding and borders.
    pub fn min_cell_height(&self) -> u16 {
        1 + 2 * self.vertical_padding + self.border_size()
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width.unwrap_or(0).max(self.min_cell_width())
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height.max(self.min_cell_height())
    }

    /// Total size the row needs when not in full-width mode.
    pub fn preferred_size(&self, cells: usize) -> (u16, u16) {
        let cells = u16::try_from(cells).unwrap_or(u16::MAX);
        let width = cells.saturating_mul(self.cell_width().saturating_add(2 * self.margin));
        (width, self.cell_height())
    }

    /// Split `area` into one rect per cell, left to right.
    pub fn cell_areas(&self, area: Rect, cells: usize) -> Vec<Rect> {
        if cells == 0 {
            return Vec::new();
        }
        let inner = area.inner(Margin::new(self.margin, 0));
        let constraint = if self.full_width {
            Constraint::Fill(1)
        } else {
            Constraint::Length(self.cell_width())
        };
        let row = Rect {
            height: inner.height.min(self.cell_height()),
            ..inner
        };
        Layout::horizontal(vec![constraint; cells])
            .flex(Flex::Start)
            .spacing(2 * self.margin)
            .split(row)
            .to_vec()
    }
}

//! Declarative attributes for the PIN code control.
//!
//! Attributes describe a control the way a layout file would: how many cells
//! it has and how those cells look. They are read from YAML or JSON (picked by
//! file extension) and accept both `snake_case` keys and the camel-case names
//! used by layout descriptions (`pinLength`, `pinMargin`, ...).
//!
//! ```yaml
//! pin_length: 6
//! pin_margin: 1
//! pin_is_bold: true
//! pin_text_color: "#88C0D0"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Error surfaced when attributes cannot be loaded or interpreted.
#[derive(Debug, Error)]
pub enum AttributesError {
    /// I/O failure while reading the attribute file.
    #[error("attributes I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The YAML document could not be deserialized.
    #[error("attributes YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON document could not be deserialized.
    #[error("attributes JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither YAML nor JSON.
    #[error("unsupported attributes file '{0}': expected .yaml, .yml or .json")]
    UnsupportedFormat(String),
    /// `pin_text_color` is not a color name or `#rrggbb` value.
    #[error("invalid pin text color '{0}'")]
    InvalidColor(String),
}

/// Attributes of a PIN code control. Missing keys take their defaults; in
/// particular a missing `pin_length` means zero cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinAttributes {
    /// Requested number of cells. Negative values produce zero cells.
    #[serde(alias = "pinLength")]
    pub pin_length: i64,
    /// Margin around every cell, in columns. Falls back to the theme's
    /// `pinview_padding` dimension.
    #[serde(alias = "pinMargin")]
    pub pin_margin: Option<u16>,
    /// Fixed cell width in columns, borders included.
    #[serde(alias = "pinWidth")]
    pub pin_width: Option<u16>,
    #[serde(alias = "pinHorizontalPadding")]
    pub pin_horizontal_padding: u16,
    #[serde(alias = "pinVerticalPadding")]
    pub pin_vertical_padding: u16,
    #[serde(alias = "pinIsBold")]
    pub pin_is_bold: bool,
    /// Cells share the full available width instead of using a fixed width.
    #[serde(alias = "isFullWidth")]
    pub is_full_width: bool,
    /// Digit color, as a color name (`cyan`) or hex value (`#88c0d0`).
    #[serde(alias = "pinTextColor")]
    pub pin_text_color: Option<String>,
    /// Cell height in rows. Falls back to the theme's `pinview_text` dimension.
    #[serde(alias = "pinTextSize")]
    pub pin_text_size: Option<u16>,
    /// Draw a border around every cell.
    #[serde(alias = "pinBordered")]
    pub pin_bordered: bool,
}

impl Default for PinAttributes {
    fn default() -> Self {
        Self {
            pin_length: 0,
            pin_margin: None,
            pin_width: None,
            pin_horizontal_padding: 0,
            pin_vertical_padding: 0,
            pin_is_bold: true,
            is_full_width: false,
            pin_text_color: None,
            pin_text_size: None,
            pin_bordered: true,
        }
    }
}

impl PinAttributes {
    /// Attributes for a control with `length` cells and default styling.
    pub fn with_length(length: usize) -> Self {
        Self {
            pin_length: i64::try_from(length).unwrap_or(i64::MAX),
            ..Self::default()
        }
    }

    /// Load attributes from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttributesError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let attributes = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?)?,
            "json" => Self::from_json_str(&fs::read_to_string(path)?)?,
            _ => return Err(AttributesError::UnsupportedFormat(path.display().to_string())),
        };
        debug!(path = %path.display(), length = attributes.length(), "loaded pin attributes");
        Ok(attributes)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, AttributesError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, AttributesError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Number of cells to create; negative lengths clamp to zero.
    pub fn length(&self) -> usize {
        usize::try_from(self.pin_length.max(0)).unwrap_or(usize::MAX)
    }

    /// Parsed `pin_text_color`, if set.
    pub fn text_color(&self) -> Result<Option<Color>, AttributesError> {
        self.pin_text_color
            .as_deref()
            .map(|raw| Color::from_str(raw.trim()).map_err(|_| AttributesError::InvalidColor(raw.to_string())))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_length_defaults_to_zero() {
        let attributes = PinAttributes::from_yaml_str("pin_margin: 2\n").unwrap();
        assert_eq!(attributes.length(), 0);
        assert_eq!(attributes.pin_margin, Some(2));
        assert!(attributes.pin_is_bold);
        assert!(attributes.pin_bordered);
        assert_eq!(PinAttributes::from_yaml_str("").unwrap(), PinAttributes::default());
    }

    #[test]
    fn accepts_layout_style_camel_case_keys() {
        let attributes =
            PinAttributes::from_json_str(r#"{"pinLength": 6, "isFullWidth": true, "pinIsBold": false, "pinTextColor": "cyan"}"#)
                .unwrap();
        assert_eq!(attributes.length(), 6);
        assert!(attributes.is_full_width);
        assert!(!attributes.pin_is_bold);
        assert_eq!(attributes.text_color().unwrap(), Some(Color::Cyan));
    }

    #[test]
    fn negative_length_clamps_to_zero() {
        let attributes = PinAttributes::from_yaml_str("pin_length: -3").unwrap();
        assert_eq!(attributes.length(), 0);
    }

    #[test]
    fn hex_and_invalid_colors() {
        let mut attributes = PinAttributes::with_length(4);
        assert_eq!(attributes.text_color().unwrap(), None);

        attributes.pin_text_color = Some("#88c0d0".into());
        assert_eq!(attributes.text_color().unwrap(), Some(Color::Rgb(0x88, 0xC0, 0xD0)));

        attributes.pin_text_color = Some("not-a-color".into());
        assert!(matches!(attributes.text_color(), Err(AttributesError::InvalidColor(_))));
    }

    #[test]
    fn loads_files_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("pin.yml");
        let mut yaml = fs::File::create(&yaml_path).unwrap();
        writeln!(yaml, "pinLength: 5\npin_width: 7").unwrap();
        let attributes = PinAttributes::from_path(&yaml_path).unwrap();
        assert_eq!(attributes.length(), 5);
        assert_eq!(attributes.pin_width, Some(7));

        let json_path = dir.path().join("pin.json");
        fs::write(&json_path, r#"{"pin_length": 3}"#).unwrap();
        assert_eq!(PinAttributes::from_path(&json_path).unwrap().length(), 3);

        let toml_path = dir.path().join("pin.toml");
        fs::write(&toml_path, "pin_length = 3").unwrap();
        assert!(matches!(
            PinAttributes::from_path(&toml_path),
            Err(AttributesError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            PinAttributes::from_path(dir.path().join("missing.yaml")),
            Err(AttributesError::Io(_))
        ));
    }
}

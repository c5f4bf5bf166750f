//! Card description files: what the user typed into the editor, as TOML.
//!
//! ```toml
//! [design]
//! fillet_radius = 3.0
//! color = "Teal"          # filament name or hex
//! font_color = "#FFFFFF"
//!
//! [content]
//! name = "Alex Maker"
//! show_qr_code = true
//! qr_code_link = "https://alex.dev"
//! ```

use crate::core::store::CardSnapshot;
use crate::domain::model::{
    CardContent, CardDesign, FilamentColor, DEFAULT_FILLET_RADIUS, DEFAULT_FONT_COLOR,
};
use crate::utils::error::{CardError, Result};
use crate::utils::validation::{validate_hex_color, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFile {
    pub design: DesignInput,
    pub content: CardContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInput {
    pub fillet_radius: f64,
    pub color: String,
    pub font_color: String,
    pub font: Option<String>,
    pub font_bold: bool,
}

impl Default for DesignInput {
    fn default() -> Self {
        Self {
            fillet_radius: DEFAULT_FILLET_RADIUS,
            color: FilamentColor::default_primary().hex.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            font: None,
            font_bold: false,
        }
    }
}

/// Palette names resolve to their hex value; anything else must already be hex.
fn resolve_color(field: &str, value: &str) -> Result<String> {
    if let Some(color) = FilamentColor::by_name(value) {
        return Ok(color.hex.to_string());
    }
    validate_hex_color(field, value)?;
    Ok(value.to_string())
}

impl CardFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CardError::config(format!("Card file parsing error: {}", e)))
    }

    pub fn into_snapshot(self) -> Result<CardSnapshot> {
        let primary = resolve_color("design.color", &self.design.color)?;
        let font_color = resolve_color("design.font_color", &self.design.font_color)?;

        // 圓角超出範圍時直接夾住，不回報錯誤
        let design = CardDesign::new(self.design.fillet_radius)
            .with_colors(primary, font_color)
            .with_font(self.design.font, self.design.font_bold);

        Ok(CardSnapshot {
            design,
            content: self.content,
        })
    }
}

impl Validate for CardFile {
    fn validate(&self) -> Result<()> {
        resolve_color("design.color", &self.design.color)?;
        resolve_color("design.font_color", &self.design.font_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_file() {
        let card = CardFile::from_toml_str(
            r#"
[design]
fillet_radius = 40.0
color = "teal"
font_bold = true

[content]
name = "Alex Maker"
job_title = "Prototyper"
github = "github.com/alex"
show_github = true
"#,
        )
        .unwrap();
        assert!(card.validate().is_ok());

        let snapshot = card.into_snapshot().unwrap();
        assert_eq!(snapshot.design.fillet_radius(), 27.0);
        assert_eq!(snapshot.design.primary_color, "#8FD9D9");
        assert_eq!(snapshot.design.font_color, "#FFFFFF");
        assert!(snapshot.design.font_bold);
        assert_eq!(snapshot.content.name, "Alex Maker");
        assert_eq!(snapshot.content.github_value(), Some("github.com/alex"));
        assert!(!snapshot.content.show_qr_code);
    }

    #[test]
    fn test_empty_card_file_uses_defaults() {
        let snapshot = CardFile::from_toml_str("").unwrap().into_snapshot().unwrap();
        assert_eq!(snapshot.design, CardDesign::default());
        assert_eq!(snapshot.content, CardContent::default());
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let card = CardFile::from_toml_str("[design]\ncolor = \"gold\"\n").unwrap();
        assert!(matches!(
            card.validate(),
            Err(CardError::InvalidConfigValueError { .. })
        ));
    }
}

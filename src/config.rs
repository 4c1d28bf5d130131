//! Document configuration read from JSON.

use crate::document::PdfBuilder;
use crate::error::PdfError;
use quire_layout::PageSetup;
use quire_style::StyleLibrary;
use serde::Deserialize;
use serde_json::Value;

/// Page setup, debug flag and an optional stylesheet.
///
/// ```json
/// {
///   "page": {"format": "A4", "orientation": "landscape", "margins": [15, 10, 15, 10]},
///   "debug": false,
///   "styles": {"styles": [{"name": "title", "font_size": 14}]}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub page: PageSetup,
    pub debug: bool,
    pub styles: Option<Value>,
}

impl DocumentConfig {
    pub fn from_json(source: &str) -> Result<Self, PdfError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl PdfBuilder {
    /// A builder preconfigured from `config`. The stylesheet, if any, is
    /// loaded into a fresh library.
    pub fn from_config(config: DocumentConfig) -> Result<Self, PdfError> {
        let mut builder = PdfBuilder::new().page_setup(config.page).debug(config.debug);
        if let Some(sheet) = config.styles {
            builder = builder.styles(StyleLibrary::from_json(&sheet.to_string())?);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_layout::{Orientation, PageFormat};
    use quire_types::Unit;

    #[test]
    fn empty_config_uses_defaults() {
        let config = DocumentConfig::from_json("{}").unwrap();
        assert_eq!(config.page, PageSetup::default());
        assert!(!config.debug);
        assert!(config.styles.is_none());
    }

    #[test]
    fn config_builds_a_document() {
        let config = DocumentConfig::from_json(
            r#"{
                "page": {"format": "letter", "orientation": "landscape", "margins": [0, 0, 0, 0], "unit": "pt"},
                "styles": {"styles": [{"name": "title", "font_size": 14}]}
            }"#,
        )
        .unwrap();
        assert_eq!(config.page.format, PageFormat::Letter);
        assert_eq!(config.page.orientation, Orientation::Landscape);

        let pdf = PdfBuilder::from_config(config).unwrap().build();
        assert_eq!(pdf.setup().unit, Unit::POINT);
        assert_eq!(pdf.width(), 792.0);
        assert!(pdf.styles().has_style("title"));
    }

    #[test]
    fn unknown_style_attributes_are_rejected() {
        let config = DocumentConfig::from_json(r#"{"styles": {"styles": [{"name": "x", "colour": "red"}]}}"#).unwrap();
        assert!(matches!(PdfBuilder::from_config(config), Err(PdfError::Style(_))));
    }
}

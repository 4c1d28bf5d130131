//! Loading a [`StyleLibrary`] from a JSON stylesheet.
//!
//! ```json
//! {
//!   "base": { "font_size": 10 },
//!   "styles": [
//!     { "name": "table", "kind": "table", "border": 1, "border_color": "#000", "padding": "3" },
//!     { "name": "odd", "kind": "row", "inherits": ["table"], "height": 0 },
//!     { "name": "title", "inherits": false, "font_size": 14, "text_align": "center" }
//!   ]
//! }
//! ```

use crate::attrs::AttrValue;
use crate::error::StyleError;
use crate::library::{Inherits, StyleLibrary};
use crate::style::{Style, StyleKind};
use quire_types::Color;
use serde::Deserialize;
use serde_json::{Map, Value};

const COLOR_ATTRIBUTES: &[&str] = &["color", "background_color", "border_color"];

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct StylesheetDef {
    #[serde(default)]
    base: Option<Map<String, Value>>,
    #[serde(default)]
    styles: Vec<StyleDef>,
}

#[derive(Deserialize, Debug)]
struct StyleDef {
    name: String,
    #[serde(default)]
    kind: StyleKind,
    #[serde(default)]
    inherits: Option<InheritsDef>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum InheritsDef {
    Flag(bool),
    Names(Vec<String>),
}

impl From<Option<InheritsDef>> for Inherits {
    fn from(def: Option<InheritsDef>) -> Self {
        match def {
            None | Some(InheritsDef::Flag(true)) => Inherits::Default,
            Some(InheritsDef::Flag(false)) => Inherits::Disabled,
            Some(InheritsDef::Names(names)) => Inherits::Names(names),
        }
    }
}

impl StyleLibrary {
    /// Builds a library from a JSON stylesheet. Styles are defined in the
    /// order they appear, so a style may only inherit from earlier entries.
    pub fn from_json(source: &str) -> Result<Self, StyleError> {
        let sheet: StylesheetDef = serde_json::from_str(source)?;
        let mut library = match sheet.base {
            Some(base) => StyleLibrary::with_base(build_style(StyleKind::Plain, base)?)?,
            None => StyleLibrary::new(),
        };
        library.define_all(sheet.styles)?;
        Ok(library)
    }

    /// Defines every style of a JSON stylesheet on top of the existing entries.
    /// A `base` section is not allowed here since the base is fixed at construction.
    pub fn load_json(&mut self, source: &str) -> Result<(), StyleError> {
        let sheet: StylesheetDef = serde_json::from_str(source)?;
        if sheet.base.is_some() {
            return Err(StyleError::Configuration(
                "A base style can only be given when the library is created".to_string(),
            ));
        }
        self.define_all(sheet.styles)
    }

    fn define_all(&mut self, styles: Vec<StyleDef>) -> Result<(), StyleError> {
        for def in styles {
            let style = build_style(def.kind, def.attributes)?;
            self.define(&def.name, style, def.inherits.into())?;
        }
        Ok(())
    }
}

fn build_style(kind: StyleKind, attributes: Map<String, Value>) -> Result<Style, StyleError> {
    let mut style = Style::of_kind(kind);
    for (name, value) in attributes {
        let value = to_attr_value(&name, value)?;
        style.set(&name, value)?;
    }
    Ok(style)
}

fn to_attr_value(name: &str, value: Value) -> Result<AttrValue, StyleError> {
    if value.is_null() {
        return Ok(AttrValue::Null);
    }
    if COLOR_ATTRIBUTES.contains(&name) {
        let color: Color = serde_json::from_value(value)?;
        return Ok(AttrValue::Color(color));
    }
    match value {
        Value::Number(number) => number
            .as_f64()
            .map(AttrValue::from)
            .ok_or_else(|| StyleError::validation(name, format!("{} is out of range", number))),
        Value::String(text) => Ok(AttrValue::Text(text)),
        other => Err(StyleError::Configuration(format!(
            "Unsupported value for '{}': {}",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attr;

    const SHEET: &str = r##"{
        "base": { "font_size": 10 },
        "styles": [
            { "name": "table", "kind": "table", "border": 1, "border_color": "#000", "padding": 3,
              "background_color": [255, 255, 255] },
            { "name": "odd", "kind": "row", "inherits": ["table"], "height": 0 },
            { "name": "col", "kind": "column", "width": 25, "text_transform": null },
            { "name": "title", "inherits": false, "font_size": 14, "text_align": "center" }
        ]
    }"##;

    #[test]
    fn loads_styles_in_order() {
        let library = StyleLibrary::from_json(SHEET).unwrap();
        assert!(library.has_style("odd"));

        let odd = library.get("odd").unwrap();
        assert_eq!(odd.height(), Some(0.0));
        assert_eq!(odd.border(), Some(1.0));
        assert_eq!(odd.attrs().padding.value().map(String::as_str), Some("3"));
        assert_eq!(odd.attrs().font_size, Attr::Set(10.0));
        assert_eq!(odd.background_color(), Some(Color::white()));

        let title = library.get("title").unwrap();
        assert_eq!(title.attrs().font_size, Attr::Set(14.0));
        assert_eq!(library.get("col").unwrap().attrs().text_transform, Attr::Null);
    }

    #[test]
    fn rejects_attributes_the_kind_does_not_accept() {
        let err = StyleLibrary::from_json(r#"{"styles": [{"name": "x", "border": 1}]}"#).unwrap_err();
        assert!(matches!(err, StyleError::Configuration(_)));

        let err = StyleLibrary::from_json(r##"{"styles": [{"name": "x", "colour": "#fff"}]}"##).unwrap_err();
        assert!(matches!(err, StyleError::Configuration(_)));
    }

    #[test]
    fn missing_mandatory_attribute_fails_validation() {
        let err = StyleLibrary::from_json(r#"{"styles": [{"name": "c", "kind": "column"}]}"#).unwrap_err();
        assert!(matches!(err, StyleError::Validation { ref field, .. } if field == "width"));
    }

    #[test]
    fn load_json_extends_an_existing_library() {
        let mut library = StyleLibrary::new();
        library
            .load_json(r#"{"styles": [{"name": "small", "font_size": 7}]}"#)
            .unwrap();
        assert_eq!(library.get("small").unwrap().attrs().font_size, Attr::Set(7.0));
        assert!(library.load_json(r#"{"base": {}}"#).is_err());
    }
}

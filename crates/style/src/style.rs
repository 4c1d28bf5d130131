//! Style records and the rules attached to each style kind.

use crate::attrs::{Attr, AttrValue, StyleAttrs};
use crate::error::StyleError;
use crate::padding::Padding;
use crate::text::{ParagraphAttributes, TextAlign, TextTransform, VerticalAlign};
use quire_types::{Cmyka, Color, Unit};
use serde::{Deserialize, Serialize};

const KIND_SPECIFIC: &[&str] = &["border", "vertical_align"];

/// The variant a style was created as. It decides which attributes may be
/// set at construction and which ones must be present after inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleKind {
    #[default]
    Plain,
    Table,
    Column,
    ColumnHeader,
    Row,
}

impl StyleKind {
    pub fn label(self) -> &'static str {
        match self {
            StyleKind::Plain => "Style",
            StyleKind::Table => "TableStyle",
            StyleKind::Column => "ColumnStyle",
            StyleKind::ColumnHeader => "ColumnHeaderStyle",
            StyleKind::Row => "RowStyle",
        }
    }

    fn extra_attributes(self) -> &'static [&'static str] {
        match self {
            StyleKind::Table => &["border"],
            StyleKind::Row => &["border", "vertical_align"],
            _ => &[],
        }
    }

    pub fn accepts(self, name: &str) -> bool {
        StyleAttrs::NAMES.contains(&name)
            && (!KIND_SPECIFIC.contains(&name) || self.extra_attributes().contains(&name))
    }

    pub fn required(self) -> &'static [&'static str] {
        match self {
            StyleKind::Table => &["border", "border_color"],
            StyleKind::Column => &["width"],
            StyleKind::Row => &["height"],
            StyleKind::Plain | StyleKind::ColumnHeader => &[],
        }
    }

    /// Library entries every style of this kind inherits from unless
    /// inheritance is disabled.
    pub fn implicit_ancestors(self) -> &'static [&'static str] {
        match self {
            StyleKind::Table => &["table"],
            _ => &[],
        }
    }
}

/// A snapshot of a style that was inherited from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ancestor {
    pub name: Option<String>,
    pub attrs: StyleAttrs,
}

/// A sparse bag of presentation attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    kind: StyleKind,
    name: Option<String>,
    attrs: StyleAttrs,
    inherits: Vec<Ancestor>,
}

macro_rules! typed_setters {
    ($( $setter:ident => $field:ident : $arg:ty ),* $(,)?) => {
        impl Style {
            $(
                pub fn $setter(mut self, value: $arg) -> Self {
                    self.attrs.$field = Attr::Set(value.into());
                    self
                }
            )*
        }
    };
}

typed_setters! {
    with_color => color: Color,
    with_text_align => text_align: impl Into<String>,
    with_text_indent => text_indent: f32,
    with_text_transform => text_transform: impl Into<String>,
    with_font_family => font_family: impl Into<String>,
    with_font_size => font_size: f32,
    with_font_style => font_style: impl Into<String>,
    with_background_color => background_color: Color,
    with_border_color => border_color: Color,
    with_width => width: f32,
    with_height => height: f32,
    with_line_height => line_height: f32,
    with_padding => padding: impl Into<String>,
    with_space_before => space_before: f32,
    with_first_line_indent => first_line_indent: f32,
}

impl Style {
    pub fn new() -> Self {
        Self::of_kind(StyleKind::Plain)
    }

    pub fn table() -> Self {
        Self::of_kind(StyleKind::Table)
    }

    pub fn column() -> Self {
        Self::of_kind(StyleKind::Column)
    }

    pub fn column_header() -> Self {
        Self::of_kind(StyleKind::ColumnHeader)
    }

    pub fn row() -> Self {
        Self::of_kind(StyleKind::Row)
    }

    pub fn of_kind(kind: StyleKind) -> Self {
        let mut style = Self {
            kind,
            ..Default::default()
        };
        if kind == StyleKind::Row {
            style.attrs.vertical_align = Attr::Set("top".to_string());
        }
        style
    }

    /// Builds a style from attribute names, rejecting names the kind does not accept.
    pub fn from_attrs<I, K, V>(kind: StyleKind, attrs: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let mut style = Self::of_kind(kind);
        for (name, value) in attrs {
            style.set(name.as_ref(), value)?;
        }
        Ok(style)
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<(), StyleError> {
        if !self.kind.accepts(name) {
            return Err(StyleError::Configuration(format!(
                "Unknown argument '{}' for {} object",
                name,
                self.kind.label()
            )));
        }
        self.attrs.assign(name, value.into())
    }

    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self, StyleError> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn with_border(self, width: f32) -> Result<Self, StyleError> {
        self.with("border", width)
    }

    pub fn with_vertical_align(self, value: &str) -> Result<Self, StyleError> {
        self.with("vertical_align", value)
    }

    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub fn attrs(&self) -> &StyleAttrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut StyleAttrs {
        &mut self.attrs
    }

    pub fn ancestors(&self) -> &[Ancestor] {
        &self.inherits
    }

    /// Fills unset or null attributes from each ancestor in turn. Earlier
    /// ancestors win because later ones only see the remaining gaps.
    pub fn inherit<'a>(&mut self, ancestors: impl IntoIterator<Item = &'a Style>) {
        for ancestor in ancestors {
            self.attrs.fill_from(&ancestor.attrs);
            self.inherits.push(Ancestor {
                name: ancestor.name.clone(),
                attrs: ancestor.attrs.clone(),
            });
        }
    }

    /// The values each recorded ancestor holds for `name`, in inheritance order.
    pub fn inherited_property(&self, name: &str) -> Result<Vec<AttrValue>, StyleError> {
        if !StyleAttrs::NAMES.contains(&name) {
            return Err(StyleError::Configuration(format!("Unknown style attribute '{}'", name)));
        }
        Ok(self
            .inherits
            .iter()
            .filter_map(|ancestor| match ancestor.attrs.get(name) {
                Some(Attr::Set(value)) => Some(value),
                Some(Attr::Null) => Some(AttrValue::Null),
                _ => None,
            })
            .collect())
    }

    /// Checks the kind's mandatory attributes and the padding shorthand.
    pub fn validate(&self) -> Result<(), StyleError> {
        for field in self.kind.required() {
            let present = matches!(self.attrs.get(field), Some(Attr::Set(_)));
            if !present {
                return Err(StyleError::validation(
                    field,
                    format!("the attribute is mandatory on {}", self.kind.label()),
                ));
            }
        }
        if let Some(padding) = self.attrs.padding.value() {
            Padding::parse(padding)?;
        }
        Ok(())
    }

    pub fn width(&self) -> Option<f32> {
        self.attrs.width.value().copied()
    }

    pub fn height(&self) -> Option<f32> {
        self.attrs.height.value().copied()
    }

    pub fn border(&self) -> Option<f32> {
        self.attrs.border.value().copied()
    }

    pub fn border_color(&self) -> Option<Color> {
        self.attrs.border_color.value().copied()
    }

    pub fn background_color(&self) -> Option<Color> {
        self.attrs.background_color.value().copied()
    }

    pub fn space_before(&self) -> f32 {
        self.attrs.space_before.value().copied().unwrap_or(0.0)
    }

    pub fn alignment(&self) -> Result<TextAlign, StyleError> {
        match self.attrs.text_align.value() {
            Some(value) => TextAlign::parse(value),
            None => Err(StyleError::validation("text_align", "no alignment defined")),
        }
    }

    pub fn text_transform(&self) -> Result<Option<TextTransform>, StyleError> {
        self.attrs
            .text_transform
            .value()
            .map(|value| TextTransform::parse(value))
            .transpose()
    }

    pub fn vertical_align(&self) -> Result<VerticalAlign, StyleError> {
        self.attrs
            .vertical_align
            .value()
            .map_or(Ok(VerticalAlign::Top), |value| VerticalAlign::parse(value))
    }

    /// `line_height`, or 120% of `font_size` when no line height is set.
    pub fn line_height(&self) -> Result<f32, StyleError> {
        if let Some(line_height) = self.attrs.line_height.value() {
            return Ok(*line_height);
        }
        Ok(self.font_size()? * 1.2)
    }

    fn font_size(&self) -> Result<f32, StyleError> {
        self.attrs
            .font_size
            .value()
            .copied()
            .ok_or_else(|| StyleError::validation("font_size", "no font size defined"))
    }

    /// Unset padding counts as zero on every side.
    pub fn padding(&self) -> Result<Padding, StyleError> {
        self.attrs
            .padding
            .value()
            .map_or(Ok(Padding::default()), |value| Padding::parse(value))
    }

    pub fn padding_h(&self) -> Result<f32, StyleError> {
        Ok(self.padding()?.horizontal())
    }

    pub fn padding_v(&self) -> Result<f32, StyleError> {
        Ok(self.padding()?.vertical())
    }

    pub fn left_indent(&self, unit: Unit) -> Result<f32, StyleError> {
        let text_indent = self.attrs.text_indent.value().copied().unwrap_or(0.0);
        Ok(unit.to_pt(text_indent + self.padding()?.left))
    }

    pub fn right_indent(&self, unit: Unit) -> Result<f32, StyleError> {
        Ok(unit.to_pt(self.padding()?.right))
    }

    pub fn first_line_indent(&self, unit: Unit) -> f32 {
        unit.to_pt(self.attrs.first_line_indent.value().copied().unwrap_or(0.0))
    }

    pub fn subtractive_color(&self) -> Option<Cmyka> {
        self.attrs.color.value().map(Color::to_subtractive)
    }

    pub fn paragraph_attributes(&self, unit: Unit) -> Result<ParagraphAttributes, StyleError> {
        let font_family = self
            .attrs
            .font_family
            .value()
            .cloned()
            .ok_or_else(|| StyleError::validation("font_family", "no font family defined"))?;
        let color = self
            .subtractive_color()
            .ok_or_else(|| StyleError::validation("color", "no text color defined"))?;

        Ok(ParagraphAttributes {
            font_family,
            font_style: self.attrs.font_style.value().cloned(),
            font_size: self.font_size()?,
            leading: self.line_height()?,
            color,
            alignment: self.alignment()?,
            transform: self.text_transform()?,
            left_indent: self.left_indent(unit)?,
            right_indent: self.right_indent(unit)?,
            first_line_indent: self.first_line_indent(unit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_style() -> Style {
        Style::new()
            .with_color(Color::black())
            .with_text_align("left")
            .with_text_indent(0.0)
            .with_font_family("Helvetica")
            .with_font_size(9.0)
            .with_font_style("normal")
            .with_padding("0")
    }

    #[test]
    fn construction_rejects_unknown_attributes() {
        let style = Style::from_attrs(StyleKind::Plain, [("text_align", AttrValue::from("center")), ("font_size", 8.into())]).unwrap();
        assert_eq!(style.attrs().font_size, Attr::Set(8.0));

        let err = Style::from_attrs(StyleKind::Plain, [("foo", "bar")]).unwrap_err();
        assert!(matches!(err, StyleError::Configuration(_)));
    }

    #[test]
    fn border_is_only_accepted_by_table_and_row_styles() {
        assert!(Style::new().with_border(1.0).is_err());
        assert!(Style::column().with_border(1.0).is_err());
        assert!(Style::table().with_border(1.0).is_ok());
        assert!(Style::row().with_border(1.0).is_ok());
        assert!(Style::table().with_vertical_align("top").is_err());
    }

    #[test]
    fn row_styles_default_to_top_alignment() {
        assert_eq!(Style::row().vertical_align().unwrap(), VerticalAlign::Top);
        let bottom = Style::row().with_vertical_align("bottom").unwrap();
        assert_eq!(bottom.vertical_align().unwrap(), VerticalAlign::Bottom);
    }

    #[test]
    fn copies_are_independent() {
        let original = Style::new().with_text_align("center");
        let copy = original.clone().with_text_align("right");
        assert_eq!(original.attrs().text_align.value().map(String::as_str), Some("center"));
        assert_eq!(copy.attrs().text_align.value().map(String::as_str), Some("right"));
    }

    #[test]
    fn inherit_fills_gaps_and_keeps_set_values() {
        let mut child = Style::new().with_text_align("center");
        let parent = Style::new().with_text_align("right").with_font_size(10.0);
        child.inherit([&parent]);

        assert_eq!(child.attrs().text_align.value().map(String::as_str), Some("center"));
        assert_eq!(child.attrs().font_size, Attr::Set(10.0));
        assert_eq!(parent.attrs().text_align.value().map(String::as_str), Some("right"));
    }

    #[test]
    fn first_inherit_wins() {
        let mut child = Style::new();
        let first = Style::new().with_font_size(10.0);
        let second = Style::new().with_font_size(14.0).with_width(30.0);
        child.inherit([&first]);
        child.inherit([&second]);

        assert_eq!(child.attrs().font_size, Attr::Set(10.0));
        assert_eq!(child.width(), Some(30.0));
    }

    #[test]
    fn null_values_are_overwritten_by_ancestors() {
        let mut child = Style::new();
        child.set("width", AttrValue::Null).unwrap();
        child.inherit([&Style::new().with_width(12.0)]);
        assert_eq!(child.width(), Some(12.0));
    }

    #[test]
    fn inherited_property_lists_ancestor_values() {
        let mut child = Style::new();
        let mut nullable = Style::new();
        nullable.set("font_size", AttrValue::Null).unwrap();
        child.inherit([&Style::new().with_font_size(10.0), &Style::new(), &nullable]);

        assert_eq!(
            child.inherited_property("font_size").unwrap(),
            vec![AttrValue::Number(10.0), AttrValue::Null]
        );
        assert!(child.inherited_property("bogus").is_err());
    }

    #[test]
    fn validate_checks_mandatory_attributes() {
        assert!(Style::new().validate().is_ok());
        assert!(matches!(
            Style::column().validate(),
            Err(StyleError::Validation { ref field, .. }) if field == "width"
        ));
        assert!(Style::column().with_width(10.0).validate().is_ok());
        assert!(Style::row().validate().is_err());

        let table = Style::table().with_border(1.0).unwrap();
        assert!(table.validate().is_err());
        assert!(table.with_border_color(Color::black()).validate().is_ok());

        let mut nulled = Style::column();
        nulled.set("width", AttrValue::Null).unwrap();
        assert!(nulled.validate().is_err());

        assert!(Style::new().with_padding("1 2 3 4 5").validate().is_err());
    }

    #[test]
    fn derived_properties() {
        let style = full_style().with_padding("1 2 3 4").with_text_indent(1.0);
        assert_eq!(style.alignment().unwrap(), TextAlign::Left);
        assert_eq!(style.text_transform().unwrap(), None);
        assert!((style.line_height().unwrap() - 10.8).abs() < 1e-4);
        assert_eq!(style.padding_h().unwrap(), 6.0);
        assert_eq!(style.padding_v().unwrap(), 4.0);
        assert_eq!(style.left_indent(Unit::POINT).unwrap(), 5.0);
        assert_eq!(style.right_indent(Unit::POINT).unwrap(), 2.0);

        let explicit = full_style().with_line_height(10.0);
        assert_eq!(explicit.line_height().unwrap(), 10.0);

        let cmyk = style.subtractive_color().unwrap();
        assert_eq!(cmyk.black, 1.0);

        assert!(full_style().with_text_align("foo").alignment().is_err());
        assert!(full_style().with_text_transform("foo").text_transform().is_err());
    }

    #[test]
    fn paragraph_attributes_scale_indents() {
        let attrs = full_style()
            .with_padding("0 2")
            .paragraph_attributes(Unit::MILLIMETER)
            .unwrap();
        assert_eq!(attrs.font_family, "Helvetica");
        assert_eq!(attrs.font_size, 9.0);
        assert!((attrs.left_indent - Unit::MILLIMETER.to_pt(2.0)).abs() < 1e-4);
        assert!((attrs.right_indent - Unit::MILLIMETER.to_pt(2.0)).abs() < 1e-4);

        assert!(Style::new().paragraph_attributes(Unit::POINT).is_err());
    }
}

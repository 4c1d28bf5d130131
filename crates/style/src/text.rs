use crate::error::StyleError;
use quire_types::Cmyka;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        match value.to_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(StyleError::validation("text_align", format!("unknown value '{}'", value))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    Uppercase,
    Lowercase,
}

impl TextTransform {
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        match value.to_lowercase().as_str() {
            "uppercase" => Ok(TextTransform::Uppercase),
            "lowercase" => Ok(TextTransform::Lowercase),
            _ => Err(StyleError::validation("text_transform", format!("unknown value '{}'", value))),
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
        }
    }
}

/// Vertical placement of a cell's text inside its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        match value.to_lowercase().as_str() {
            "top" => Ok(VerticalAlign::Top),
            "middle" => Ok(VerticalAlign::Middle),
            "bottom" => Ok(VerticalAlign::Bottom),
            _ => Err(StyleError::validation("vertical_align", format!("unknown value '{}'", value))),
        }
    }
}

/// A fully resolved paragraph style, in points, as consumed by the text
/// wrapper and the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphAttributes {
    pub font_family: String,
    pub font_style: Option<String>,
    pub font_size: f32,
    pub leading: f32,
    pub color: Cmyka,
    pub alignment: TextAlign,
    pub transform: Option<TextTransform>,
    pub left_indent: f32,
    pub right_indent: f32,
    pub first_line_indent: f32,
}

//! The sparse attribute record shared by every style kind.

use crate::error::StyleError;
use quire_types::Color;

/// A single style attribute.
///
/// `Unset` and `Null` are both gaps for inheritance purposes, but only a
/// `Null` attribute counts as "defined" when an ancestor is introspected.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Attr<T> {
    #[default]
    Unset,
    Null,
    Set(T),
}

impl<T: Clone> Attr<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Attr::Unset)
    }

    /// True when inheritance is allowed to fill this attribute.
    pub fn is_gap(&self) -> bool {
        !matches!(self, Attr::Set(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Attr::Set(value) => Some(value),
            _ => None,
        }
    }

    fn fill_from(&mut self, ancestor: &Attr<T>) {
        if self.is_gap() && !ancestor.is_unset() {
            *self = ancestor.clone();
        }
    }

    fn to_value(&self) -> Attr<AttrValue>
    where
        T: AttrType,
    {
        match self {
            Attr::Unset => Attr::Unset,
            Attr::Null => Attr::Null,
            Attr::Set(value) => Attr::Set(value.clone().into_value()),
        }
    }
}

/// A loosely typed attribute value, used by the string-keyed setters and by
/// stylesheet loading.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    Number(f32),
    Text(String),
    Color(Color),
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Number(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value as f32)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value as f32)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        AttrValue::Color(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

/// Conversion between a typed attribute and [`AttrValue`].
pub trait AttrType: Clone + Sized {
    fn from_value(field: &str, value: AttrValue) -> Result<Self, StyleError>;
    fn into_value(self) -> AttrValue;
}

impl AttrType for f32 {
    fn from_value(field: &str, value: AttrValue) -> Result<Self, StyleError> {
        match value {
            AttrValue::Number(n) => Ok(n),
            AttrValue::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| StyleError::validation(field, format!("'{}' is not a number", text))),
            other => Err(StyleError::validation(field, format!("expected a number, got {:?}", other))),
        }
    }

    fn into_value(self) -> AttrValue {
        AttrValue::Number(self)
    }
}

impl AttrType for String {
    fn from_value(field: &str, value: AttrValue) -> Result<Self, StyleError> {
        match value {
            AttrValue::Text(text) => Ok(text),
            AttrValue::Number(n) => Ok(n.to_string()),
            other => Err(StyleError::validation(field, format!("expected text, got {:?}", other))),
        }
    }

    fn into_value(self) -> AttrValue {
        AttrValue::Text(self)
    }
}

impl AttrType for Color {
    fn from_value(field: &str, value: AttrValue) -> Result<Self, StyleError> {
        match value {
            AttrValue::Color(color) => Ok(color),
            other => Err(StyleError::validation(field, format!("expected a color, got {:?}", other))),
        }
    }

    fn into_value(self) -> AttrValue {
        AttrValue::Color(self)
    }
}

macro_rules! style_attrs {
    ($( $field:ident : $ty:ty ),* $(,)?) => {
        /// Every attribute any style kind can carry. Which ones a kind
        /// accepts at construction is decided by [`crate::StyleKind`].
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct StyleAttrs {
            $( pub $field: Attr<$ty>, )*
        }

        impl StyleAttrs {
            pub const NAMES: &'static [&'static str] = &[$( stringify!($field) ),*];

            /// Fill every gap in `self` with what `ancestor` defines.
            pub fn fill_from(&mut self, ancestor: &StyleAttrs) {
                $( self.$field.fill_from(&ancestor.$field); )*
            }

            pub fn get(&self, name: &str) -> Option<Attr<AttrValue>> {
                match name {
                    $( stringify!($field) => Some(self.$field.to_value()), )*
                    _ => None,
                }
            }

            pub(crate) fn assign(&mut self, name: &str, value: AttrValue) -> Result<(), StyleError> {
                match name {
                    $( stringify!($field) => {
                        self.$field = match value {
                            AttrValue::Null => Attr::Null,
                            value => Attr::Set(<$ty as AttrType>::from_value(name, value)?),
                        };
                        Ok(())
                    } )*
                    _ => Err(StyleError::Configuration(format!("Unknown style attribute '{}'", name))),
                }
            }
        }
    };
}

style_attrs! {
    color: Color,
    text_align: String,
    text_indent: f32,
    text_transform: String,
    font_family: String,
    font_size: f32,
    font_style: String,
    background_color: Color,
    border_color: Color,
    width: f32,
    height: f32,
    line_height: f32,
    padding: String,
    space_before: f32,
    first_line_indent: f32,
    border: f32,
    vertical_align: String,
}

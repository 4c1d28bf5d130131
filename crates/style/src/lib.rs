//! Cascading styles: sparse attribute records, per-kind validation and a
//! named library that resolves inheritance chains.

pub mod attrs;
pub mod error;
pub mod library;
pub mod padding;
pub mod style;
pub mod stylesheet;
pub mod text;

pub use attrs::{Attr, AttrValue, StyleAttrs};
pub use error::StyleError;
pub use library::{Inherits, StyleLibrary};
pub use padding::Padding;
pub use style::{Ancestor, Style, StyleKind};
pub use text::{ParagraphAttributes, TextAlign, TextTransform, VerticalAlign};

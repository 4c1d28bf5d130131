//! Cursor bookkeeping, page geometry, paragraph measurement and the two-pass
//! table layout engine.

use quire_style::StyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("The number of values ({found}) doesn't match the number of columns ({expected})")]
    ShapeMismatch { expected: usize, found: usize },
}

pub mod cursor;
pub mod fonts;
pub mod page;
pub mod table;
pub mod target;
pub mod wrap;

pub use self::cursor::Cursor;
pub use self::fonts::StandardFont;
pub use self::page::{Margins, Orientation, PageFormat, PageSetup};
pub use self::table::{Column, ColumnSpec, Row, Table, TableMetrics};
pub use self::target::{BoxPaint, LayoutTarget};
pub use self::wrap::{Line, MeasuredParagraph, ParagraphLayout, ParagraphWrapper, StandardWrapper, measure_paragraph};

#[cfg(test)]
mod test_utils;

//! Styled PDF documents built from paragraphs, tables, lines and barcodes.
//!
//! ```no_run
//! use quire::{ColumnSpec, Inherits, Pdf, Style};
//!
//! # fn main() -> Result<(), quire::PdfError> {
//! let mut pdf = Pdf::new();
//! pdf.add_style("amount", Style::column().with_width(30.0).with_text_align("right"), Inherits::Default)?;
//! pdf.add_paragraph("Invoice", "paragraph", None, None)?;
//!
//! let mut table = pdf.add_table("lines", None)?;
//! table.add_column(ColumnSpec::new().title("Item"))?;
//! table.add_column(ColumnSpec::styled("amount").title("Price").format("{value} EUR"))?;
//! table.add_row(["Paper", "4.20"], None, None)?;
//! table.render()?;
//!
//! pdf.write("invoice.pdf")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod deferred;
mod document;
mod error;
mod flowable;

pub use config::DocumentConfig;
pub use deferred::{PageContext, PageDecoration};
pub use document::{Pdf, PdfBuilder, RectanglePaint, TableBuilder};
pub use error::PdfError;
pub use flowable::Element;

pub use quire_layout::{
    ColumnSpec, Cursor, LayoutError, Margins, Orientation, PageFormat, PageSetup, ParagraphLayout, ParagraphWrapper,
    StandardWrapper, TableMetrics,
};
pub use quire_style::{Inherits, ParagraphAttributes, Style, StyleError, StyleKind, StyleLibrary};
pub use quire_types::{Color, Position, Size, Unit};

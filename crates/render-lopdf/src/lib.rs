//! Drawing surface and document writer built on lopdf.
//!
//! A [`PageCanvas`] collects the operations of one page in PDF points; the
//! [`DocumentWriter`] turns finished canvases into pages sharing one set of
//! standard font resources.

pub mod barcode;
pub mod canvas;
mod error;
mod writer;

pub use barcode::Code128;
pub use canvas::{PageCanvas, PageContent, encode_win_ansi};
pub use error::RenderError;
pub use writer::DocumentWriter;

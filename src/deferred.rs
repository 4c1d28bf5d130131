//! Page decorations rendered once the whole story is known.

use crate::Pdf;
use crate::error::PdfError;

/// Where a deferred decoration is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// The page the decoration was queued for, starting at 1.
    pub page_number: usize,
    pub page_count: usize,
}

/// A header or footer.
///
/// One instance is queued for every page, bound to that page's number, and
/// rendered when the document content is produced. Drawing calls made on
/// `pdf` during `render` land in the decoration's own element.
pub trait PageDecoration {
    fn render(&self, pdf: &mut Pdf, page: &PageContext) -> Result<(), PdfError>;
}

impl<F> PageDecoration for F
where
    F: Fn(&mut Pdf, &PageContext) -> Result<(), PdfError>,
{
    fn render(&self, pdf: &mut Pdf, page: &PageContext) -> Result<(), PdfError> {
        self(pdf, page)
    }
}

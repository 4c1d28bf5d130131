use quire_layout::LayoutError;
use quire_pdf_composer::ComposerError;
use quire_render_lopdf::RenderError;
use quire_style::StyleError;
use thiserror::Error;

/// Everything that can go wrong while building or writing a document.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Background merge failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("Invalid document configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("The table id '{0}' is already used in this document")]
    DuplicateTable(String),
}

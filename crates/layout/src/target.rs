use crate::LayoutError;
use crate::cursor::Cursor;
use quire_style::{Style, StyleLibrary};
use quire_types::{Color, Size};

/// A rectangle drawn at the cursor, in document units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPaint {
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    /// Stroke color and line width in points.
    pub stroke: Option<(Color, f32)>,
}

/// What the table engine needs from the document it lays out into.
pub trait LayoutTarget {
    fn styles(&self) -> &StyleLibrary;

    fn styles_mut(&mut self) -> &mut StyleLibrary;

    fn cursor(&mut self) -> &mut Cursor;

    /// Size of the paragraph box in document units, without drawing anything.
    fn paragraph_size(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<Size, LayoutError>;

    fn draw_box(&mut self, paint: BoxPaint) -> Result<(), LayoutError>;

    fn draw_paragraph(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError>;
}

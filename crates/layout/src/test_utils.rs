//! A layout target that records what it is asked to draw.

use crate::LayoutError;
use crate::cursor::Cursor;
use crate::target::{BoxPaint, LayoutTarget};
use crate::wrap::{Line, ParagraphLayout, ParagraphWrapper, measure_paragraph};
use quire_style::{ParagraphAttributes, Style, StyleLibrary};
use quire_types::{Position, Size, Unit};

/// Lays every paragraph on a single line of `line_height` points, `char_width`
/// points per character.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedWrapper {
    pub char_width: f32,
    pub line_height: f32,
}

impl ParagraphWrapper for FixedWrapper {
    fn wrap(&self, text: &str, _attrs: &ParagraphAttributes, _max_width: f32, max_height: f32) -> ParagraphLayout {
        let width = text.chars().count() as f32 * self.char_width;
        ParagraphLayout {
            lines: vec![Line {
                text: text.to_string(),
                width,
                hard_break: true,
            }],
            width,
            height: self.line_height,
            overflows: max_height > 0.0 && self.line_height > max_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Box { at: Position, paint: BoxPaint },
    Paragraph { at: Position, text: String },
}

/// Measures in points and moves its cursor down by each paragraph's
/// height, the way a replayed page would.
pub(crate) struct RecordingTarget<W> {
    pub styles: StyleLibrary,
    pub cursor: Cursor,
    pub wrapper: W,
    pub available_width: f32,
    pub drawn: Vec<Recorded>,
}

impl<W: ParagraphWrapper> RecordingTarget<W> {
    pub fn new(styles: StyleLibrary, wrapper: W) -> Self {
        Self {
            styles,
            cursor: Cursor::new(),
            wrapper,
            available_width: 500.0,
            drawn: Vec::new(),
        }
    }

    pub fn paragraphs(&self) -> Vec<(Position, &str)> {
        self.drawn
            .iter()
            .filter_map(|item| match item {
                Recorded::Paragraph { at, text, .. } => Some((*at, text.as_str())),
                Recorded::Box { .. } => None,
            })
            .collect()
    }

    pub fn boxes(&self) -> Vec<(Position, BoxPaint)> {
        self.drawn
            .iter()
            .filter_map(|item| match item {
                Recorded::Box { at, paint } => Some((*at, *paint)),
                Recorded::Paragraph { .. } => None,
            })
            .collect()
    }
}

impl<W: ParagraphWrapper> LayoutTarget for RecordingTarget<W> {
    fn styles(&self) -> &StyleLibrary {
        &self.styles
    }

    fn styles_mut(&mut self) -> &mut StyleLibrary {
        &mut self.styles
    }

    fn cursor(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn paragraph_size(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<Size, LayoutError> {
        let measured = measure_paragraph(&self.wrapper, text, style, Unit::POINT, width, height, self.available_width)?;
        Ok(measured.size)
    }

    fn draw_box(&mut self, paint: BoxPaint) -> Result<(), LayoutError> {
        self.drawn.push(Recorded::Box {
            at: self.cursor.real_position(),
            paint,
        });
        Ok(())
    }

    fn draw_paragraph(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError> {
        self.drawn.push(Recorded::Paragraph {
            at: self.cursor.real_position(),
            text: text.to_string(),
        });
        let size = self.paragraph_size(text, style, width, height)?;
        let advance = size.height.max(height.unwrap_or(0.0)) + style.padding_v()?;
        self.cursor.move_by(0.0, advance);
        Ok(())
    }
}

//! Flowable elements: draw calls recorded against a cursor, replayed onto a
//! page canvas when the document is written.
//!
//! Recording never moves the cursor for paragraphs. When an element is
//! replayed, the cursor follows the recorded positions relatively and each
//! paragraph pushes it down by the height it actually took, so content drawn
//! after a paragraph lands below it.

use crate::error::PdfError;
use quire_layout::fonts::StandardFont;
use quire_layout::{Cursor, PageSetup, ParagraphWrapper, measure_paragraph};
use quire_render_lopdf::{Code128, PageCanvas};
use quire_style::Style;
use quire_types::{Color, Position, Rect};

/// Default height of a barcode, in points.
pub(crate) const BARCODE_HEIGHT_PT: f32 = 36.0;
const STRING_FONT_SIZE: f32 = 12.0;
const LINE_WIDTH: f32 = 1.0;
/// Rectangles are drawn slightly larger so that adjacent cells overlap.
const RECT_BLEED: f32 = 0.3;

#[derive(Debug, Clone)]
pub(crate) enum DrawOp {
    Paragraph {
        text: String,
        style: Box<Style>,
        width: Option<f32>,
        height: Option<f32>,
        outline: bool,
    },
    Rectangle {
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    },
    HLine {
        width: f32,
        color: Color,
    },
    VLine {
        height: f32,
        color: Color,
    },
    Text {
        value: String,
    },
    Barcode {
        code: Code128,
        bar_width: f32,
        bar_height: Option<f32>,
    },
    Grid {
        size: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

#[derive(Debug, Clone)]
struct Recorded {
    op: DrawOp,
    position: Position,
}

/// A block of drawing calls sharing one cursor.
#[derive(Debug, Clone, Default)]
pub struct Element {
    cursor: Cursor,
    ops: Vec<Recorded>,
}

/// What replaying needs besides the canvas.
pub(crate) struct Replay<'a> {
    pub setup: &'a PageSetup,
    pub wrapper: &'a dyn ParagraphWrapper,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn record(&mut self, op: DrawOp) {
        self.ops.push(Recorded {
            op,
            position: self.cursor.real_position(),
        });
    }

    pub(crate) fn draw(&self, replay: &Replay, canvas: &mut PageCanvas) -> Result<(), PdfError> {
        let mut cursor = Cursor::new();
        let mut last: Option<Position> = None;
        for recorded in &self.ops {
            let position = recorded.position;
            match last {
                Some(last) => cursor.move_by(position.x - last.x, position.y - last.y),
                None => cursor.move_to(Some(position.x), Some(position.y)),
            }
            last = Some(position);
            draw_op(&recorded.op, &mut cursor, replay, canvas)?;
        }
        Ok(())
    }
}

fn draw_op(op: &DrawOp, cursor: &mut Cursor, replay: &Replay, canvas: &mut PageCanvas) -> Result<(), PdfError> {
    let setup = replay.setup;
    let unit = setup.unit;
    let here = cursor.position();
    match op {
        DrawOp::Paragraph {
            text,
            style,
            width,
            height,
            outline,
        } => {
            let available = setup.printable_width() - cursor.x();
            let measured = measure_paragraph(replay.wrapper, text, style, unit, *width, *height, available)?;
            let box_width = width.unwrap_or(available);
            let top = here.y - style.padding()?.top - style.space_before();
            let top_left = setup.to_page(Position::new(here.x, top));
            canvas.paragraph(top_left, unit.to_pt(box_width), &measured.attrs, &measured.layout);
            if *outline {
                let text_height = unit.to_pt(measured.size.height);
                canvas.rectangle(
                    Rect::new(top_left.x, top_left.y - text_height, unit.to_pt(box_width), text_height),
                    None,
                    Some((Color::new(0.0, 0.0, 0.0, 50.0), LINE_WIDTH)),
                );
            }

            let text_height = measured.size.height;
            cursor.move_by(0.0, text_height + style.padding_v()?);
            let requested = height.unwrap_or(0.0).max(style.height().unwrap_or(0.0));
            if text_height < requested {
                cursor.move_by(0.0, requested - text_height);
            }
        }
        DrawOp::Rectangle {
            width,
            height,
            fill,
            stroke,
        } => {
            let bottom_left = setup.to_page(Position::new(here.x, here.y - height));
            canvas.rectangle(
                Rect::new(
                    bottom_left.x,
                    bottom_left.y,
                    unit.to_pt(*width) + RECT_BLEED,
                    unit.to_pt(*height) + RECT_BLEED,
                ),
                *fill,
                *stroke,
            );
        }
        DrawOp::HLine { width, color } => {
            let from = setup.to_page(here);
            let to = setup.to_page(Position::new(here.x + width, here.y));
            canvas.line(from, to, *color, LINE_WIDTH);
        }
        DrawOp::VLine { height, color } => {
            let from = setup.to_page(here);
            let to = setup.to_page(Position::new(here.x, here.y - height));
            canvas.line(from, to, *color, LINE_WIDTH);
        }
        DrawOp::Text { value } => {
            canvas.text(
                setup.to_page(here),
                StandardFont::Helvetica,
                STRING_FONT_SIZE,
                Color::black(),
                value,
            );
        }
        DrawOp::Barcode {
            code,
            bar_width,
            bar_height,
        } => {
            let bar_height = bar_height.map_or(BARCODE_HEIGHT_PT, |height| unit.to_pt(height));
            canvas.barcode(setup.to_page(here), code, *bar_width, bar_height);
        }
        DrawOp::Grid {
            size,
            width,
            height,
            color,
        } => draw_grid(setup, canvas, here, *size, *width, *height, *color),
    }
    Ok(())
}

fn draw_grid(setup: &PageSetup, canvas: &mut PageCanvas, origin: Position, size: f32, width: f32, height: f32, color: Color) {
    if size <= 0.0 {
        return;
    }
    let columns = (width / size).floor() as usize;
    for i in 1..=columns {
        let x = origin.x + i as f32 * size;
        canvas.line(
            setup.to_page(Position::new(x, origin.y)),
            setup.to_page(Position::new(x, origin.y - height)),
            color,
            LINE_WIDTH,
        );
    }
    let rows = (height / size).floor() as usize;
    for j in 1..=rows {
        let y = origin.y - j as f32 * size;
        canvas.line(
            setup.to_page(Position::new(origin.x, y)),
            setup.to_page(Position::new(origin.x + width, y)),
            color,
            LINE_WIDTH,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_layout::StandardWrapper;
    use quire_style::StyleLibrary;
    use quire_types::Unit;

    fn setup() -> PageSetup {
        PageSetup {
            unit: Unit::POINT,
            margins: [0.0; 4].into(),
            ..PageSetup::default()
        }
    }

    fn paragraph(text: &str) -> DrawOp {
        DrawOp::Paragraph {
            text: text.to_string(),
            style: Box::new(StyleLibrary::new().get("paragraph").unwrap()),
            width: None,
            height: Some(30.0),
            outline: false,
        }
    }

    /// The `Tm` operands of every line drawn on the canvas.
    fn line_origins(canvas: PageCanvas) -> Vec<(f32, f32)> {
        canvas
            .finish()
            .content
            .operations
            .into_iter()
            .filter(|op| op.operator == "Tm")
            .map(|op| (op.operands[4].as_float().unwrap(), op.operands[5].as_float().unwrap()))
            .collect()
    }

    #[test]
    fn replayed_paragraphs_stack() {
        let setup = setup();
        let replay = Replay {
            setup: &setup,
            wrapper: &StandardWrapper,
        };
        let mut element = Element::new();
        element.record(paragraph("first"));
        element.record(paragraph("second"));

        let mut canvas = PageCanvas::new();
        element.draw(&replay, &mut canvas).unwrap();

        let origins = line_origins(canvas);
        let page_top = setup.page_size_pt().height;
        // The requested height of 30 wins over the 10.8 of text.
        assert_eq!(origins.len(), 2);
        assert!((origins[0].1 - (page_top - 7.2)).abs() < 1e-3);
        assert!((origins[1].1 - (page_top - 30.0 - 7.2)).abs() < 1e-3);
    }

    #[test]
    fn recorded_moves_are_replayed_relative_to_each_other() {
        let setup = setup();
        let replay = Replay {
            setup: &setup,
            wrapper: &StandardWrapper,
        };
        let mut element = Element::new();
        element.record(paragraph("left"));
        element.cursor().move_by(100.0, 0.0);
        element.record(paragraph("right"));

        let mut canvas = PageCanvas::new();
        element.draw(&replay, &mut canvas).unwrap();

        let origins = line_origins(canvas);
        assert_eq!(origins[1].0 - origins[0].0, 100.0);
        assert!((origins[0].1 - origins[1].1 - 30.0).abs() < 1e-3);
    }

    #[test]
    fn grid_lines_cover_the_frame() {
        let setup = setup();
        let replay = Replay {
            setup: &setup,
            wrapper: &StandardWrapper,
        };
        let mut element = Element::new();
        element.record(DrawOp::Grid {
            size: 10.0,
            width: 35.0,
            height: 20.0,
            color: Color::gray(150.0),
        });
        let mut canvas = PageCanvas::new();
        element.draw(&replay, &mut canvas).unwrap();

        let strokes = canvas
            .finish()
            .content
            .operations
            .iter()
            .filter(|op| op.operator == "S")
            .count();
        // Three vertical and two horizontal lines.
        assert_eq!(strokes, 5);
    }
}

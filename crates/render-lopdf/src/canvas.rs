//! Collects the drawing operations of one page.
//!
//! Every coordinate here is in points, in PDF space (origin at the bottom
//! left corner of the page, y growing upwards).

use crate::barcode::{Code128, QUIET_ZONE};
use log::warn;
use lopdf::Object;
use lopdf::content::{Content, Operation};
use quire_layout::ParagraphLayout;
use quire_layout::fonts::StandardFont;
use quire_style::{ParagraphAttributes, TextAlign};
use quire_types::{Cmyka, Color, Position, Rect};
use std::collections::BTreeSet;

/// Share of the font size between the top of a line and its baseline.
const ASCENT: f32 = 0.8;

/// Name of `font` in the document's font resources.
pub fn font_resource(font: StandardFont) -> String {
    let index = StandardFont::ALL
        .iter()
        .position(|candidate| *candidate == font)
        .unwrap_or_default();
    format!("F{}", index + 1)
}

/// Name of the graphics state that sets both opacities to `alpha` percent.
pub fn alpha_resource(alpha: u8) -> String {
    format!("GA{}", alpha)
}

/// One page worth of content.
#[derive(Default)]
pub struct PageCanvas {
    operations: Vec<Operation>,
    alphas: BTreeSet<u8>,
}

/// What a finished canvas hands to the writer.
pub struct PageContent {
    pub content: Content,
    /// Opacities, in percent, referenced by the content.
    pub alphas: BTreeSet<u8>,
}

impl PageCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn finish(self) -> PageContent {
        PageContent {
            content: Content {
                operations: self.operations,
            },
            alphas: self.alphas,
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn save(&mut self) {
        self.op("q", vec![]);
    }

    fn restore(&mut self) {
        self.op("Q", vec![]);
    }

    fn set_alpha(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 100.0).round() as u8;
        if alpha < 100 {
            self.alphas.insert(alpha);
            self.op("gs", vec![Object::Name(alpha_resource(alpha).into_bytes())]);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        let rgb = color.to_additive();
        self.op("rg", vec![rgb.red.into(), rgb.green.into(), rgb.blue.into()]);
    }

    fn set_stroke_color(&mut self, color: Color) {
        let rgb = color.to_additive();
        self.op("RG", vec![rgb.red.into(), rgb.green.into(), rgb.blue.into()]);
    }

    fn set_text_color(&mut self, color: Cmyka) {
        self.op(
            "k",
            vec![color.cyan.into(), color.magenta.into(), color.yellow.into(), color.black.into()],
        );
    }

    /// Fills and/or strokes `rect`, whose `y` is its bottom edge.
    pub fn rectangle(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<(Color, f32)>) {
        let painter = match (fill.is_some(), stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => return,
        };
        self.save();
        let alpha = fill.map(|c| c.alpha).or(stroke.map(|(c, _)| c.alpha)).unwrap_or(100.0);
        self.set_alpha(alpha);
        if let Some(color) = fill {
            self.set_fill_color(color);
        }
        if let Some((color, width)) = stroke {
            self.set_stroke_color(color);
            self.op("w", vec![width.into()]);
        }
        self.op(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        );
        self.op(painter, vec![]);
        self.restore();
    }

    pub fn line(&mut self, from: Position, to: Position, color: Color, width: f32) {
        self.save();
        self.set_alpha(color.alpha);
        self.set_stroke_color(color);
        self.op("w", vec![width.into()]);
        self.op("m", vec![from.x.into(), from.y.into()]);
        self.op("l", vec![to.x.into(), to.y.into()]);
        self.op("S", vec![]);
        self.restore();
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        self.op("Tf", vec![Object::Name(font_resource(font).into_bytes()), size.into()]);
    }

    /// Draws a single run of text with its baseline at `origin`.
    pub fn text(&mut self, origin: Position, font: StandardFont, size: f32, color: Color, text: &str) {
        if text.is_empty() {
            return;
        }
        self.save();
        self.set_alpha(color.alpha);
        self.op("BT", vec![]);
        self.set_font(font, size);
        self.set_text_color(color.to_subtractive());
        self.op("Td", vec![origin.x.into(), origin.y.into()]);
        self.op("Tj", vec![Object::string_literal(encode_win_ansi(text))]);
        self.op("ET", vec![]);
        self.restore();
    }

    /// Draws wrapped lines in a box whose top left corner is `top_left`.
    /// `box_width` includes the paragraph's indents.
    pub fn paragraph(&mut self, top_left: Position, box_width: f32, attrs: &ParagraphAttributes, layout: &ParagraphLayout) {
        if layout.lines.is_empty() {
            return;
        }
        let font = StandardFont::resolve(&attrs.font_family, attrs.font_style.as_deref());
        let available = (box_width - attrs.left_indent - attrs.right_indent).max(0.0);

        self.save();
        self.set_alpha(attrs.color.alpha * 100.0);
        self.op("BT", vec![]);
        self.set_font(font, attrs.font_size);
        self.set_text_color(attrs.color);
        for (i, line) in layout.lines.iter().enumerate() {
            let indent = if i == 0 { attrs.first_line_indent } else { 0.0 };
            let room = available - indent;
            let free = (room - line.width).max(0.0);
            let (shift, word_spacing) = match attrs.alignment {
                TextAlign::Left => (0.0, 0.0),
                TextAlign::Center => (free / 2.0, 0.0),
                TextAlign::Right => (free, 0.0),
                TextAlign::Justify => {
                    let gaps = line.text.matches(' ').count();
                    if line.hard_break || gaps == 0 {
                        (0.0, 0.0)
                    } else {
                        (0.0, free / gaps as f32)
                    }
                }
            };
            let x = top_left.x + attrs.left_indent + indent + shift;
            let y = top_left.y - i as f32 * attrs.leading - attrs.font_size * ASCENT;
            self.op("Tw", vec![word_spacing.into()]);
            // Text matrix set absolutely for every line.
            self.op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()]);
            self.op("Tj", vec![Object::string_literal(encode_win_ansi(&line.text))]);
        }
        self.op("ET", vec![]);
        self.restore();
    }

    /// Draws `code` hanging down from `top_left`, quiet zone included.
    pub fn barcode(&mut self, top_left: Position, code: &Code128, bar_width: f32, bar_height: f32) {
        self.save();
        self.set_fill_color(Color::black());
        let left = top_left.x + QUIET_ZONE as f32 * bar_width;
        let bottom = top_left.y - bar_height;
        for (offset, width) in code.bars() {
            self.op(
                "re",
                vec![
                    (left + offset as f32 * bar_width).into(),
                    bottom.into(),
                    (width as f32 * bar_width).into(),
                    bar_height.into(),
                ],
            );
        }
        self.op("f", vec![]);
        self.restore();
    }
}

/// Maps text onto WinAnsiEncoding. Characters the encoding lacks become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut missing = 0;
    let bytes = text
        .chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            _ => {
                missing += 1;
                b'?'
            }
        })
        .collect();
    if missing > 0 {
        warn!("{} character(s) of '{}' have no WinAnsi code", missing, text);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_layout::Line;
    use quire_style::StyleLibrary;
    use quire_types::Unit;

    fn operators(canvas: PageCanvas) -> Vec<String> {
        canvas
            .finish()
            .content
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect()
    }

    #[test]
    fn rectangles_pick_their_painter() {
        let mut canvas = PageCanvas::new();
        canvas.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), None, None);
        assert!(canvas.is_empty());

        canvas.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Some(Color::gray(240.0)), None);
        canvas.rectangle(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Some(Color::white()),
            Some((Color::black(), 1.0)),
        );
        let ops = operators(canvas);
        assert!(ops.contains(&"f".to_string()));
        assert!(ops.contains(&"B".to_string()));
        assert_eq!(ops.iter().filter(|op| *op == "q").count(), 2);
    }

    #[test]
    fn translucent_colors_register_graphics_states() {
        let mut canvas = PageCanvas::new();
        canvas.line(
            Position::new(0.0, 0.0),
            Position::new(5.0, 0.0),
            Color::new(200.0, 0.0, 0.0, 50.0),
            0.5,
        );
        let page = canvas.finish();
        assert_eq!(page.alphas.into_iter().collect::<Vec<_>>(), vec![50]);
        assert!(page.content.operations.iter().any(|op| op.operator == "gs"));
    }

    #[test]
    fn right_aligned_lines_end_at_the_right_indent() {
        let style = StyleLibrary::new()
            .get("paragraph")
            .unwrap()
            .with_text_align("right")
            .with_padding("0 10");
        let attrs = style.paragraph_attributes(Unit::POINT).unwrap();
        let layout = ParagraphLayout {
            lines: vec![Line {
                text: "abc".to_string(),
                width: 30.0,
                hard_break: true,
            }],
            width: 30.0,
            height: attrs.leading,
            overflows: false,
        };
        let mut canvas = PageCanvas::new();
        canvas.paragraph(Position::new(100.0, 500.0), 200.0, &attrs, &layout);

        let page = canvas.finish();
        let tm = page
            .content
            .operations
            .iter()
            .find(|op| op.operator == "Tm")
            .unwrap();
        // 100 + 10 of indent + (180 - 30) of free space.
        assert_eq!(tm.operands[4].as_float().unwrap(), 260.0);
        assert_eq!(tm.operands[5].as_float().unwrap(), 500.0 - 9.0 * ASCENT);
    }

    #[test]
    fn barcode_bars_hang_from_the_top() {
        let code = Code128::encode("42").unwrap();
        let mut canvas = PageCanvas::new();
        canvas.barcode(Position::new(0.0, 100.0), &code, 1.0, 36.0);
        let page = canvas.finish();
        let first = page
            .content
            .operations
            .iter()
            .find(|op| op.operator == "re")
            .unwrap();
        assert_eq!(first.operands[0].as_float().unwrap(), QUIET_ZONE as f32);
        assert_eq!(first.operands[1].as_float().unwrap(), 64.0);
    }

    #[test]
    fn win_ansi_substitutes_unknown_characters() {
        assert_eq!(encode_win_ansi("caf\u{e9} \u{20ac}"), vec![b'c', b'a', b'f', 0xe9, b' ', 0x80]);
        assert_eq!(encode_win_ansi("\u{3b1}"), vec![b'?']);
    }

    #[test]
    fn fonts_get_stable_resource_names() {
        assert_eq!(font_resource(StandardFont::Helvetica), "F1");
        assert_eq!(font_resource(StandardFont::CourierBoldOblique), "F12");
    }
}

//! Paragraph wrapping.

use crate::LayoutError;
use crate::fonts::StandardFont;
use log::trace;
use quire_style::{ParagraphAttributes, Style};
use quire_types::{Size, Unit};

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Natural width of the text, in points.
    pub width: f32,
    /// Set on the last line of a paragraph and on lines ended by a hard break.
    pub hard_break: bool,
}

/// The lines a paragraph broke into. All measures are in points and exclude
/// the left and right indents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphLayout {
    pub lines: Vec<Line>,
    pub width: f32,
    pub height: f32,
    /// Whether the lines need more height than the caller allowed.
    pub overflows: bool,
}

/// Breaks text into lines for a given set of paragraph attributes.
pub trait ParagraphWrapper {
    /// `max_width` is the full box width in points; `max_height` of 0 means
    /// the height is unbounded.
    fn wrap(&self, text: &str, attrs: &ParagraphAttributes, max_width: f32, max_height: f32) -> ParagraphLayout;
}

/// Greedy word wrapping with the standard 14 font metrics.
///
/// `<br/>` and newlines force a break. Words wider than the line are kept
/// whole, so the reported width may exceed the available width.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWrapper;

impl ParagraphWrapper for StandardWrapper {
    fn wrap(&self, text: &str, attrs: &ParagraphAttributes, max_width: f32, max_height: f32) -> ParagraphLayout {
        let font = StandardFont::resolve(&attrs.font_family, attrs.font_style.as_deref());
        let measure = |s: &str| font.text_width(s, attrs.font_size);
        let text = match attrs.transform {
            Some(transform) => transform.apply(text),
            None => text.to_string(),
        };
        let available = (max_width - attrs.left_indent - attrs.right_indent).max(0.0);

        let mut lines: Vec<Line> = Vec::new();
        for segment in split_hard_breaks(&text) {
            let mut current = String::new();
            for word in segment.split_whitespace() {
                let limit = if lines.is_empty() {
                    available - attrs.first_line_indent
                } else {
                    available
                };
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if current.is_empty() || measure(&candidate) <= limit {
                    current = candidate;
                } else {
                    let width = measure(&current);
                    lines.push(Line { text: std::mem::replace(&mut current, word.to_string()), width, hard_break: false });
                }
            }
            let width = measure(&current);
            lines.push(Line { text: current, width, hard_break: true });
        }
        if text.trim().is_empty() {
            lines.clear();
        }

        let width = lines
            .iter()
            .enumerate()
            .map(|(i, line)| if i == 0 { line.width + attrs.first_line_indent } else { line.width })
            .fold(0.0_f32, f32::max);
        let height = lines.len() as f32 * attrs.leading;
        trace!("Wrapped {} chars into {} lines ({:.2} x {:.2}pt)", text.len(), lines.len(), width, height);

        ParagraphLayout {
            lines,
            width,
            height,
            overflows: max_height > 0.0 && height > max_height,
        }
    }
}

fn split_hard_breaks(text: &str) -> Vec<String> {
    text.replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// A paragraph measured for a style: the wrapped lines, plus the size of the
/// paragraph box in document units (indents included).
#[derive(Debug, Clone)]
pub struct MeasuredParagraph {
    pub attrs: ParagraphAttributes,
    pub layout: ParagraphLayout,
    pub size: Size,
}

/// Measures `text` in `style`. Without an explicit `width` the paragraph may
/// use `available_width`; a missing or zero `height` leaves it unbounded.
pub fn measure_paragraph(
    wrapper: &dyn ParagraphWrapper,
    text: &str,
    style: &Style,
    unit: Unit,
    width: Option<f32>,
    height: Option<f32>,
    available_width: f32,
) -> Result<MeasuredParagraph, LayoutError> {
    let attrs = style.paragraph_attributes(unit)?;
    let max_width = unit.to_pt(width.unwrap_or(available_width));
    let max_height = unit.to_pt(height.unwrap_or(0.0));
    let layout = wrapper.wrap(text, &attrs, max_width, max_height);
    let size = Size::new(
        unit.from_pt(layout.width + attrs.left_indent + attrs.right_indent),
        unit.from_pt(layout.height),
    );
    Ok(MeasuredParagraph { attrs, layout, size })
}

//! The document: page geometry, the story of elements, styles and the
//! two-phase build that turns them into PDF bytes.

use crate::deferred::{PageContext, PageDecoration};
use crate::error::PdfError;
use crate::flowable::{DrawOp, Element, Replay};
use log::debug;
use once_cell::unsync::OnceCell;
use quire_layout::{
    BoxPaint, ColumnSpec, Cursor, LayoutError, LayoutTarget, Margins, Orientation, PageFormat, PageSetup,
    ParagraphWrapper, StandardWrapper, Table, TableMetrics, measure_paragraph,
};
use quire_pdf_composer::apply_background;
use quire_render_lopdf::{Code128, DocumentWriter, PageCanvas};
use quire_style::{Inherits, Style, StyleLibrary};
use quire_types::{Color, Size, Unit};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const DEFAULT_BAR_WIDTH: f32 = 0.75;
const DEBUG_GRID_SIZE: f32 = 5.0;

fn debug_grid_color() -> Color {
    Color::new(200.0, 0.0, 0.0, 50.0)
}

fn default_line_color() -> Color {
    Color::gray(50.0)
}

/// Fill and stroke of a free-standing rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectanglePaint {
    pub fill: Color,
    pub stroke: Color,
    pub filled: bool,
    pub stroked: bool,
}

impl Default for RectanglePaint {
    fn default() -> Self {
        Self {
            fill: Color::gray(240.0),
            stroke: Color::gray(150.0),
            filled: true,
            stroked: false,
        }
    }
}

enum StoryItem {
    Element(usize),
    Deferred {
        element: usize,
        page_number: usize,
        decoration: Rc<dyn PageDecoration>,
    },
    PageBreak,
}

/// Measures paragraphs against an empty frame of the document's geometry.
struct Simulation {
    frame_width: f32,
    unit: Unit,
}

impl Simulation {
    fn new(setup: &PageSetup) -> Self {
        debug!("Creating the paragraph simulation frame");
        Self {
            frame_width: setup.printable_width(),
            unit: setup.unit,
        }
    }

    fn paragraph_size(
        &self,
        wrapper: &dyn ParagraphWrapper,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<Size, LayoutError> {
        let measured = measure_paragraph(wrapper, text, style, self.unit, width, height, self.frame_width)?;
        Ok(measured.size)
    }
}

/// Configures a [`Pdf`].
pub struct PdfBuilder {
    setup: PageSetup,
    styles: Option<StyleLibrary>,
    header: Option<Rc<dyn PageDecoration>>,
    footer: Option<Rc<dyn PageDecoration>>,
    wrapper: Option<Rc<dyn ParagraphWrapper>>,
    debug: bool,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBuilder {
    /// A4 portrait, 10mm margins, millimetres.
    pub fn new() -> Self {
        Self {
            setup: PageSetup::default(),
            styles: None,
            header: None,
            footer: None,
            wrapper: None,
            debug: false,
        }
    }

    pub fn page_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    pub fn format(mut self, format: PageFormat) -> Self {
        self.setup.format = format;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.setup.orientation = orientation;
        self
    }

    /// `[top, right, bottom, left]`, in the document unit.
    pub fn margins(mut self, margins: impl Into<Margins>) -> Self {
        self.setup.margins = margins.into();
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.setup.unit = unit;
        self
    }

    pub fn styles(mut self, styles: StyleLibrary) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn header(mut self, header: impl PageDecoration + 'static) -> Self {
        self.header = Some(Rc::new(header));
        self
    }

    pub fn footer(mut self, footer: impl PageDecoration + 'static) -> Self {
        self.footer = Some(Rc::new(footer));
        self
    }

    pub fn wrapper(mut self, wrapper: impl ParagraphWrapper + 'static) -> Self {
        self.wrapper = Some(Rc::new(wrapper));
        self
    }

    /// Draws a grid on every page and outlines every paragraph.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> Pdf {
        let mut pdf = Pdf {
            setup: self.setup,
            styles: self.styles.unwrap_or_default(),
            story: Vec::new(),
            elements: Vec::new(),
            current: None,
            header: self.header,
            footer: self.footer,
            wrapper: self.wrapper.unwrap_or_else(|| Rc::new(StandardWrapper)),
            debug: self.debug,
            page_counter: 1,
            current_height: 0.0,
            table_ids: HashSet::new(),
            background: None,
            simulation: OnceCell::new(),
        };
        pdf.start_page();
        pdf
    }
}

/// A document under construction.
///
/// Drawing calls go into the current element at its cursor. Headers and
/// footers are queued per page and rendered by [`Pdf::content`], once the
/// page count is known.
pub struct Pdf {
    setup: PageSetup,
    styles: StyleLibrary,
    story: Vec<StoryItem>,
    elements: Vec<Element>,
    current: Option<usize>,
    header: Option<Rc<dyn PageDecoration>>,
    footer: Option<Rc<dyn PageDecoration>>,
    wrapper: Rc<dyn ParagraphWrapper>,
    debug: bool,
    page_counter: usize,
    current_height: f32,
    table_ids: HashSet<String>,
    background: Option<PathBuf>,
    simulation: OnceCell<Simulation>,
}

impl Default for Pdf {
    fn default() -> Self {
        Self::new()
    }
}

impl Pdf {
    pub fn new() -> Self {
        PdfBuilder::new().build()
    }

    pub fn builder() -> PdfBuilder {
        PdfBuilder::new()
    }

    fn start_page(&mut self) {
        if self.debug {
            self.add_grid(DEBUG_GRID_SIZE, debug_grid_color());
        }
        if let Some(header) = self.header.clone() {
            self.queue_decoration(header);
        }
    }

    fn queue_decoration(&mut self, decoration: Rc<dyn PageDecoration>) {
        self.elements.push(Element::new());
        self.story.push(StoryItem::Deferred {
            element: self.elements.len() - 1,
            page_number: self.page_counter,
            decoration,
        });
    }

    fn element(&mut self) -> &mut Element {
        let index = match self.current {
            Some(index) => index,
            None => self.push_element(),
        };
        &mut self.elements[index]
    }

    fn push_element(&mut self) -> usize {
        self.elements.push(Element::new());
        let index = self.elements.len() - 1;
        self.story.push(StoryItem::Element(index));
        self.current = Some(index);
        index
    }

    /// Adds the height taken by the last drawing call, plus every cursor
    /// move since the previous call, to the current height.
    fn adapt_height(&mut self, height: f32) {
        let cursor = self.element().cursor();
        let (_, height) = cursor.apply_changes(0.0, height);
        cursor.track_changes();
        self.current_height += height;
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn page_number(&self) -> usize {
        self.page_counter
    }

    /// Width of the printable frame, in document units.
    pub fn width(&self) -> f32 {
        self.setup.printable_width()
    }

    /// Height of the printable frame, in document units.
    pub fn height(&self) -> f32 {
        self.setup.printable_height()
    }

    /// Height used on the current page so far, in document units.
    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    /// The cursor of the current element.
    pub fn cursor(&mut self) -> &mut Cursor {
        self.element().cursor()
    }

    pub fn styles(&self) -> &StyleLibrary {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleLibrary {
        &mut self.styles
    }

    pub fn add_page_break(&mut self) {
        if let Some(footer) = self.footer.clone() {
            self.queue_decoration(footer);
        }
        self.story.push(StoryItem::PageBreak);
        self.page_counter += 1;
        debug!("Starting page {}", self.page_counter);
        self.start_page();
        self.current_height = 0.0;
        self.add_element();
    }

    /// Starts a new element; later drawing calls use its fresh cursor.
    pub fn add_element(&mut self) {
        self.push_element();
    }

    /// Draws a grid of `size` over the printable frame. The grid lives in
    /// its own element, so the current element is left untouched.
    pub fn add_grid(&mut self, size: f32, color: Color) {
        let mut element = Element::new();
        element.record(DrawOp::Grid {
            size,
            width: self.width(),
            height: self.height(),
            color,
        });
        self.elements.push(element);
        self.story.push(StoryItem::Element(self.elements.len() - 1));
    }

    pub fn add_style(&mut self, name: &str, style: Style, inherits: Inherits) -> Result<(), PdfError> {
        Ok(self.styles.define(name, style, inherits)?)
    }

    pub fn get_style(&self, name: &str, inherits: &[&str]) -> Result<Style, PdfError> {
        Ok(self.styles.get_with(name, inherits)?)
    }

    /// Draws `text` at the cursor and reserves its height.
    pub fn add_paragraph(
        &mut self,
        text: &str,
        style: &str,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), PdfError> {
        let style = self.styles.get(style)?;
        Ok(self.queue_paragraph(text, &style, width, height)?)
    }

    fn queue_paragraph(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError> {
        let outline = self.debug;
        self.element().record(DrawOp::Paragraph {
            text: text.to_string(),
            style: Box::new(style.clone()),
            width,
            height,
            outline,
        });
        let size = self.measure(text, style, width, height)?;
        let reserved = [Some(size.height), style.height(), height]
            .into_iter()
            .flatten()
            .fold(0.0, f32::max);
        self.adapt_height(reserved + style.padding_v()?);
        Ok(())
    }

    fn measure(&self, text: &str, style: &Style, width: Option<f32>, height: Option<f32>) -> Result<Size, LayoutError> {
        let simulation = self.simulation.get_or_init(|| Simulation::new(&self.setup));
        simulation.paragraph_size(self.wrapper.as_ref(), text, style, width, height)
    }

    /// Size a paragraph would take, in document units, without drawing it.
    pub fn simulate_paragraph_size(
        &self,
        text: &str,
        style: &str,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<Size, PdfError> {
        let style = self.styles.get(style)?;
        Ok(self.measure(text, &style, width, height)?)
    }

    /// Starts a table drawn at the cursor. `style` defaults to `table`; the
    /// id must be unique within the document.
    pub fn add_table(&mut self, id: &str, style: Option<&str>) -> Result<TableBuilder<'_>, PdfError> {
        if self.table_ids.contains(id) {
            return Err(PdfError::DuplicateTable(id.to_string()));
        }
        let table = Table::new(id, style.unwrap_or("table"), &self.styles)?;
        self.table_ids.insert(id.to_string());
        Ok(TableBuilder { pdf: self, table })
    }

    /// A line across the printable width. Defaults to dark gray.
    pub fn add_h_line(&mut self, color: Option<Color>) {
        let width = self.width();
        self.element().record(DrawOp::HLine {
            width,
            color: color.unwrap_or_else(default_line_color),
        });
    }

    /// A line going down from the cursor. Defaults to dark gray.
    pub fn add_v_line(&mut self, height: f32, color: Option<Color>) {
        self.element().record(DrawOp::VLine {
            height,
            color: color.unwrap_or_else(default_line_color),
        });
    }

    /// Unwrapped text whose baseline sits on the cursor.
    pub fn add_string(&mut self, value: &str) {
        self.element().record(DrawOp::Text {
            value: value.to_string(),
        });
    }

    pub fn add_rectangle(&mut self, width: f32, height: f32, paint: RectanglePaint) {
        self.element().record(DrawOp::Rectangle {
            width,
            height,
            fill: paint.filled.then_some(paint.fill),
            stroke: paint.stroked.then_some((paint.stroke, 1.0)),
        });
    }

    /// A Code 128 barcode hanging from the cursor. `bar_height` is in
    /// document units (36pt when omitted), `bar_width` in points (0.75 when
    /// omitted).
    pub fn add_barcode(&mut self, value: &str, bar_height: Option<f32>, bar_width: Option<f32>) -> Result<(), PdfError> {
        let code = Code128::encode(value)?;
        self.element().record(DrawOp::Barcode {
            code,
            bar_width: bar_width.unwrap_or(DEFAULT_BAR_WIDTH),
            bar_height,
        });
        Ok(())
    }

    /// The first page of the PDF at `path` is drawn beneath every page.
    pub fn define_background(&mut self, path: impl Into<PathBuf>) {
        self.background = Some(path.into());
    }

    /// Renders the decorations, lays out every page and returns the PDF.
    pub fn content(mut self) -> Result<Vec<u8>, PdfError> {
        if let Some(footer) = self.footer.clone() {
            self.queue_decoration(footer);
        }
        self.render_deferred()?;
        let bytes = self.compose()?;
        match &self.background {
            Some(path) => Ok(apply_background(&bytes, path)?),
            None => Ok(bytes),
        }
    }

    pub fn write(self, path: impl AsRef<Path>) -> Result<(), PdfError> {
        let bytes = self.content()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn render_deferred(&mut self) -> Result<(), PdfError> {
        let page_count = self.page_counter;
        let pending: Vec<(usize, usize, Rc<dyn PageDecoration>)> = self
            .story
            .iter()
            .filter_map(|item| match item {
                StoryItem::Deferred {
                    element,
                    page_number,
                    decoration,
                } => Some((*element, *page_number, Rc::clone(decoration))),
                _ => None,
            })
            .collect();
        for (element, page_number, decoration) in pending {
            self.current = Some(element);
            decoration.render(self, &PageContext { page_number, page_count })?;
        }
        Ok(())
    }

    fn compose(&self) -> Result<Vec<u8>, PdfError> {
        let replay = Replay {
            setup: &self.setup,
            wrapper: self.wrapper.as_ref(),
        };
        let mut writer = DocumentWriter::new(self.setup.page_size_pt());
        let mut canvas = PageCanvas::new();
        for item in &self.story {
            match item {
                StoryItem::Element(index) | StoryItem::Deferred { element: index, .. } => {
                    self.elements[*index].draw(&replay, &mut canvas)?;
                }
                StoryItem::PageBreak => {
                    writer.add_page(std::mem::take(&mut canvas))?;
                }
            }
        }
        writer.add_page(canvas)?;
        Ok(writer.finish()?)
    }
}

impl LayoutTarget for Pdf {
    fn styles(&self) -> &StyleLibrary {
        &self.styles
    }

    fn styles_mut(&mut self) -> &mut StyleLibrary {
        &mut self.styles
    }

    fn cursor(&mut self) -> &mut Cursor {
        self.element().cursor()
    }

    fn paragraph_size(
        &mut self,
        text: &str,
        style: &Style,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<Size, LayoutError> {
        self.measure(text, style, width, height)
    }

    fn draw_box(&mut self, paint: BoxPaint) -> Result<(), LayoutError> {
        self.element().record(DrawOp::Rectangle {
            width: paint.width,
            height: paint.height,
            fill: paint.fill,
            stroke: paint.stroke,
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
        self.queue_paragraph(text, style, width, height)
    }
}

/// A table being filled in; [`TableBuilder::render`] draws it into the
/// document.
pub struct TableBuilder<'a> {
    pdf: &'a mut Pdf,
    table: Table,
}

impl TableBuilder<'_> {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn add_column(&mut self, spec: ColumnSpec) -> Result<&mut Self, PdfError> {
        self.table.add_column(&self.pdf.styles, spec)?;
        Ok(self)
    }

    pub fn add_row<I, S>(&mut self, content: I, title: Option<&str>, style: Option<&str>) -> Result<&mut Self, PdfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.add_row(&self.pdf.styles, content, title, style)?;
        Ok(self)
    }

    pub fn add_header_row<I, S>(&mut self, content: I, style: Option<&str>) -> Result<&mut Self, PdfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.add_header_row(&self.pdf.styles, content, style)?;
        Ok(self)
    }

    pub fn render(self) -> Result<TableMetrics, PdfError> {
        let TableBuilder { pdf, table } = self;
        let metrics = table.render(&mut *pdf)?;
        pdf.adapt_height(0.0);
        Ok(metrics)
    }
}

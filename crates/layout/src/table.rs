//! Tables laid out in two passes.
//!
//! Cell text is measured before anything is drawn. Cells that do not fit
//! their declared width or height widen their column or heighten their row
//! through synthesized override styles registered in the style library
//! (`{id}-column-{i}`, `{id}-row-{j}`, `{id}-cell-{i}-{j}`). Every cell then
//! resolves the same chain of styles, highest priority first:
//!
//! cell override, column header style (header rows only), column override,
//! column style, row override, row style, table style, base.

use crate::LayoutError;
use crate::target::{BoxPaint, LayoutTarget};
use log::{debug, trace, warn};
use quire_style::{Inherits, Style, StyleKind, StyleLibrary, VerticalAlign};
use std::collections::HashMap;

/// Options for a new column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSpec {
    pub title: Option<String>,
    pub format: Option<String>,
    pub style: Option<String>,
    pub header_style: Option<String>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styled(style: &str) -> Self {
        Self::new().style(style)
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// A template where `{value}` is replaced by each cell's content.
    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn header_style(mut self, style: &str) -> Self {
        self.header_style = Some(style.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    title: Option<String>,
    format: Option<String>,
    style: Option<String>,
    header_style: Option<String>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn header_style(&self) -> Option<&str> {
        self.header_style.as_deref()
    }

    fn format_value(&self, value: &str) -> String {
        match &self.format {
            Some(format) => format.replace("{value}", value),
            None => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    title: Option<String>,
    style: Option<String>,
    header: bool,
    values: HashMap<String, String>,
}

impl Row {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    pub fn value(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// Final geometry of a rendered table, in document units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableMetrics {
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    id: String,
    style: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

/// A row as it is laid out: header rows keep their raw text, other rows go
/// through each column's format.
struct LaidRow<'a> {
    style: Option<&'a str>,
    header: bool,
    texts: Vec<String>,
}

/// Which synthesized overrides take part in a cell's style chain.
#[derive(Clone, Copy)]
struct Layers {
    cell: bool,
    column: bool,
    row: bool,
}

impl Layers {
    const DECLARED: Layers = Layers { cell: false, column: false, row: false };
    const SIZED_COLUMNS: Layers = Layers { cell: false, column: true, row: false };
    const SIZED: Layers = Layers { cell: false, column: true, row: true };
    const FINAL: Layers = Layers { cell: true, column: true, row: true };
}

#[derive(Clone, Copy, Debug)]
enum Extent {
    Width,
    Height,
}

impl Extent {
    fn read(self, style: &Style) -> Option<f32> {
        match self {
            Extent::Width => style.width(),
            Extent::Height => style.height(),
        }
    }

    fn style(self, value: f32) -> Style {
        match self {
            Extent::Width => Style::new().with_width(value),
            Extent::Height => Style::new().with_height(value),
        }
    }
}

impl Table {
    /// Creates a table whose style must resolve to a valid table style.
    pub fn new(id: &str, style: &str, styles: &StyleLibrary) -> Result<Self, LayoutError> {
        check_kind(styles, style, StyleKind::Table)?;
        Ok(Self {
            id: id.to_string(),
            style: style.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn add_column(&mut self, styles: &StyleLibrary, spec: ColumnSpec) -> Result<&Column, LayoutError> {
        if let Some(style) = &spec.style {
            check_kind(styles, style, StyleKind::Column)?;
        }
        if let Some(style) = &spec.header_style {
            check_kind(styles, style, StyleKind::ColumnHeader)?;
        }
        let index = self.columns.len();
        self.columns.push(Column {
            name: format!("column-{}", index),
            title: spec.title,
            format: spec.format,
            style: spec.style,
            header_style: spec.header_style,
        });
        Ok(&self.columns[index])
    }

    /// Appends a row; `content` holds one value per column, in column order.
    pub fn add_row<I, S>(
        &mut self,
        styles: &StyleLibrary,
        content: I,
        title: Option<&str>,
        style: Option<&str>,
    ) -> Result<(), LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(styles, content, title, style, false)
    }

    /// Appends a row whose cells use the columns' header styles and skip
    /// their formats.
    pub fn add_header_row<I, S>(&mut self, styles: &StyleLibrary, content: I, style: Option<&str>) -> Result<(), LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(styles, content, None, style, true)
    }

    fn push_row<I, S>(
        &mut self,
        styles: &StyleLibrary,
        content: I,
        title: Option<&str>,
        style: Option<&str>,
        header: bool,
    ) -> Result<(), LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let content: Vec<String> = content.into_iter().map(Into::into).collect();
        if content.len() != self.columns.len() {
            return Err(LayoutError::ShapeMismatch {
                expected: self.columns.len(),
                found: content.len(),
            });
        }
        if let Some(style) = style {
            check_kind(styles, style, StyleKind::Row)?;
        }
        let values = self
            .columns
            .iter()
            .map(|column| column.name.clone())
            .zip(content)
            .collect();
        self.rows.push(Row {
            title: title.map(str::to_string),
            style: style.map(str::to_string),
            header,
            values,
        });
        Ok(())
    }

    /// Sizes every cell, then draws the table column by column at the
    /// target's cursor. The cursor ends at x = 0 just below the table.
    pub fn render<T: LayoutTarget + ?Sized>(&self, target: &mut T) -> Result<TableMetrics, LayoutError> {
        let rows = self.laid_rows();
        self.fit_columns(target, &rows)?;
        self.fit_rows(target, &rows)?;
        let extents = self.row_extents(target, &rows)?;
        self.align_cells(target, &rows, &extents)?;
        self.draw(target, &rows, extents)
    }

    fn laid_rows(&self) -> Vec<LaidRow<'_>> {
        let mut laid = Vec::with_capacity(self.rows.len() + 1);
        let titled = self.columns.iter().any(|column| column.title.is_some());
        if titled && !self.rows.iter().any(|row| row.header) {
            laid.push(LaidRow {
                style: None,
                header: true,
                texts: self
                    .columns
                    .iter()
                    .map(|column| column.title.clone().unwrap_or_default())
                    .collect(),
            });
        }
        for row in &self.rows {
            let texts = self
                .columns
                .iter()
                .map(|column| {
                    let value = row.value(&column.name).unwrap_or_default();
                    if row.header {
                        value.to_string()
                    } else {
                        column.format_value(value)
                    }
                })
                .collect();
            laid.push(LaidRow {
                style: row.style.as_deref(),
                header: row.header,
                texts,
            });
        }
        laid
    }

    fn column_override(&self, column: usize) -> String {
        format!("{}-column-{}", self.id, column)
    }

    fn row_override(&self, row: usize) -> String {
        format!("{}-row-{}", self.id, row)
    }

    fn cell_override(&self, column: usize, row: usize) -> String {
        format!("{}-cell-{}-{}", self.id, column, row)
    }

    fn chain(&self, styles: &StyleLibrary, (i, column): (usize, &Column), (j, row): (usize, &LaidRow), layers: Layers) -> Vec<String> {
        let mut names = Vec::new();
        let existing = |name: String| {
            if styles.has_style(&name) {
                Some(name)
            } else {
                None
            }
        };
        if layers.cell {
            names.extend(existing(self.cell_override(i, j)));
        }
        if row.header {
            names.extend(column.header_style.clone());
        }
        if layers.column {
            names.extend(existing(self.column_override(i)));
        }
        names.extend(column.style.clone());
        if layers.row {
            names.extend(existing(self.row_override(j)));
        }
        names.extend(row.style.map(str::to_string));
        names.push(self.style.clone());
        names
    }

    fn cells<'a>(&'a self, rows: &'a [LaidRow<'a>]) -> impl Iterator<Item = ((usize, &'a Column), (usize, &'a LaidRow<'a>))> {
        self.columns
            .iter()
            .enumerate()
            .flat_map(move |column| rows.iter().enumerate().map(move |row| (column, row)))
    }

    fn fit_columns<T: LayoutTarget + ?Sized>(&self, target: &mut T, rows: &[LaidRow]) -> Result<(), LayoutError> {
        for (column, row) in self.cells(rows) {
            let style = resolve(target.styles(), &self.chain(target.styles(), column, row, Layers::DECLARED))?;
            let text = &row.1.texts[column.0];
            let size = target.paragraph_size(text, &style, style.width(), style.height())?;
            trace!("{} cell ({}, {}) measures {:?}", self.id, column.0, row.0, size);
            if style.width().is_none_or(|declared| size.width > declared) {
                widen(target.styles_mut(), &self.column_override(column.0), size.width, Extent::Width)?;
            }
        }
        Ok(())
    }

    fn fit_rows<T: LayoutTarget + ?Sized>(&self, target: &mut T, rows: &[LaidRow]) -> Result<(), LayoutError> {
        for (column, row) in self.cells(rows) {
            let style = resolve(target.styles(), &self.chain(target.styles(), column, row, Layers::SIZED_COLUMNS))?;
            let text = &row.1.texts[column.0];
            let size = target.paragraph_size(text, &style, style.width(), style.height())?;
            if style.height().is_none_or(|declared| size.height > declared) {
                widen(target.styles_mut(), &self.row_override(row.0), size.height, Extent::Height)?;
            }
        }
        Ok(())
    }

    /// Height of every laid row, padding included: the tallest cell box the
    /// row's cells resolve, so that each column advances by the same amount.
    fn row_extents<T: LayoutTarget + ?Sized>(&self, target: &mut T, rows: &[LaidRow]) -> Result<Vec<f32>, LayoutError> {
        let mut extents = vec![0.0_f32; rows.len()];
        for (column, row) in self.cells(rows) {
            let style = resolve(target.styles(), &self.chain(target.styles(), column, row, Layers::SIZED))?;
            let text = &row.1.texts[column.0];
            let size = target.paragraph_size(text, &style, style.width(), style.height())?;
            let content = style.height().unwrap_or(0.0).max(size.height);
            extents[row.0] = extents[row.0].max(content + style.padding_v()?);
        }
        Ok(extents)
    }

    fn align_cells<T: LayoutTarget + ?Sized>(
        &self,
        target: &mut T,
        rows: &[LaidRow],
        extents: &[f32],
    ) -> Result<(), LayoutError> {
        for (column, row) in self.cells(rows) {
            let style = resolve(target.styles(), &self.chain(target.styles(), column, row, Layers::SIZED))?;
            let alignment = style.vertical_align()?;
            if alignment == VerticalAlign::Top {
                continue;
            }
            let text = &row.1.texts[column.0];
            let size = target.paragraph_size(text, &style, style.width(), style.height())?;
            let free = (extents[row.0] - style.padding_v()? - size.height).max(0.0);
            let offset = match alignment {
                VerticalAlign::Middle => free / 2.0,
                _ => free,
            };
            if offset > 0.0 {
                let name = self.cell_override(column.0, row.0);
                let space_before = style.space_before() + offset;
                debug!("Cell override '{}' gets space_before {:.2}", name, space_before);
                target
                    .styles_mut()
                    .define(&name, Style::new().with_space_before(space_before), Inherits::Disabled)?;
            }
        }
        Ok(())
    }

    fn draw<T: LayoutTarget + ?Sized>(
        &self,
        target: &mut T,
        rows: &[LaidRow],
        row_heights: Vec<f32>,
    ) -> Result<TableMetrics, LayoutError> {
        let table_height: f32 = row_heights.iter().sum();

        let mut column_widths = Vec::with_capacity(self.columns.len());
        for column in self.columns.iter().enumerate() {
            // The advance is taken over every cell of the column rather than
            // from whichever row was drawn last.
            let mut advance: Option<f32> = None;
            for row in rows.iter().enumerate() {
                let style = resolve(target.styles(), &self.chain(target.styles(), column, row, Layers::FINAL))?;
                let row_height = row_heights[row.0];
                let width = style.width();
                if let (Some(current), Some(width)) = (advance, width) {
                    if (current - width).abs() > f32::EPSILON {
                        warn!(
                            "{}: cells of column {} resolve different widths ({} and {})",
                            self.id, column.0, current, width
                        );
                    }
                }
                advance = match (advance, width) {
                    (Some(current), Some(width)) => Some(current.max(width)),
                    (current, width) => current.or(width),
                };

                let paint = BoxPaint {
                    width: width.unwrap_or(0.0),
                    height: row_height,
                    fill: style.background_color(),
                    stroke: style.border().zip(style.border_color()).map(|(line, color)| (color, line)),
                };
                if paint.fill.is_some() || paint.stroke.is_some() {
                    target.draw_box(paint)?;
                }
                // The paragraph box fills the row, whatever padding this cell has.
                let content_height = row_height - style.padding_v()?;
                target.draw_paragraph(&row.1.texts[column.0], &style, width, Some(content_height))?;
            }
            let advance = advance.unwrap_or(0.0);
            column_widths.push(advance);
            target.cursor().move_by(advance, -table_height);
        }
        target.cursor().move_to(Some(0.0), None);
        target.cursor().move_by(0.0, table_height);

        let width = column_widths.iter().sum();
        debug!("Rendered table '{}' ({:.2} x {:.2})", self.id, width, table_height);
        Ok(TableMetrics {
            column_widths,
            row_heights,
            width,
            height: table_height,
        })
    }
}

fn check_kind(styles: &StyleLibrary, name: &str, expected: StyleKind) -> Result<(), LayoutError> {
    let style = styles.get(name)?;
    if style.kind() != expected {
        return Err(LayoutError::Configuration(format!(
            "Style '{}' is a {}, expected a {}",
            name,
            style.kind().label(),
            expected.label()
        )));
    }
    style.validate()?;
    Ok(())
}

fn resolve(styles: &StyleLibrary, names: &[String]) -> Result<Style, LayoutError> {
    let (first, rest) = names
        .split_first()
        .ok_or_else(|| LayoutError::Configuration("Empty style chain".to_string()))?;
    Ok(styles.get_with(first, rest)?)
}

/// Registers `value` on the override `name` unless it already holds a value
/// at least as large.
fn widen(styles: &mut StyleLibrary, name: &str, value: f32, extent: Extent) -> Result<(), LayoutError> {
    let current = if styles.has_style(name) {
        extent.read(&styles.get(name)?)
    } else {
        None
    };
    if current.is_some_and(|current| value <= current) {
        return Ok(());
    }
    debug!("Override '{}' {:?} {:?} -> {:.2}", name, extent, current, value);
    styles.define(name, extent.style(value), Inherits::Disabled)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FixedWrapper, RecordingTarget};
    use quire_types::{Color, Position};

    const WRAPPER: FixedWrapper = FixedWrapper {
        char_width: 10.0,
        line_height: 8.0,
    };

    fn library() -> StyleLibrary {
        let mut styles = StyleLibrary::new();
        styles
            .define("grid", Style::table().with_padding("0 3"), Inherits::Default)
            .unwrap();
        styles
            .define("narrow", Style::column().with_width(10.0), Inherits::Default)
            .unwrap();
        styles
            .define("wide", Style::column().with_width(50.0), Inherits::Default)
            .unwrap();
        styles
            .define(
                "head",
                Style::column_header().with_background_color(Color::gray(200.0)),
                Inherits::Default,
            )
            .unwrap();
        for (name, align) in [("tall", "bottom"), ("centered", "middle")] {
            let row = Style::row().with_height(20.0).with_vertical_align(align).unwrap();
            styles.define(name, row, Inherits::Default).unwrap();
        }
        styles
    }

    fn target() -> RecordingTarget<FixedWrapper> {
        RecordingTarget::new(library(), WRAPPER)
    }

    #[test]
    fn table_style_must_be_a_table_style() {
        let styles = library();
        assert!(matches!(
            Table::new("t", "paragraph", &styles),
            Err(LayoutError::Configuration(_))
        ));
        assert!(matches!(Table::new("t", "missing", &styles), Err(LayoutError::Style(_))));
        assert!(Table::new("t", "grid", &styles).is_ok());
    }

    #[test]
    fn columns_and_rows_check_their_styles() {
        let styles = library();
        let mut table = Table::new("t", "grid", &styles).unwrap();
        assert!(table.add_column(&styles, ColumnSpec::styled("tall")).is_err());
        assert!(table.add_column(&styles, ColumnSpec::styled("wide").header_style("wide")).is_err());
        let column = table.add_column(&styles, ColumnSpec::styled("wide")).unwrap();
        assert_eq!(column.name(), "column-0");
        table.add_column(&styles, ColumnSpec::new()).unwrap();

        assert!(table.add_row(&styles, ["a", "b"], None, Some("wide")).is_err());
        assert!(matches!(
            table.add_row(&styles, ["a"], None, None),
            Err(LayoutError::ShapeMismatch { expected: 2, found: 1 })
        ));
        table.add_row(&styles, ["a", "b"], Some("first"), Some("tall")).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.value("column-1"), Some("b"));
        assert_eq!(row.title(), Some("first"));
    }

    #[test]
    fn narrow_columns_are_widened_to_their_content() {
        let mut target = target();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("narrow")).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("wide")).unwrap();
        table.add_row(&target.styles, ["aaaaaa", "aa"], None, None).unwrap();

        let metrics = table.render(&mut target).unwrap();

        // Six characters plus three points of padding on each side.
        assert_eq!(target.styles.get("t-column-0").unwrap().width(), Some(66.0));
        assert!(!target.styles.has_style("t-column-1"));
        assert_eq!(metrics.column_widths, vec![66.0, 50.0]);
        assert_eq!(metrics.height, 8.0);

        let paragraphs = target.paragraphs();
        assert_eq!(paragraphs[0], (Position::new(0.0, 0.0), "aaaaaa"));
        assert_eq!(paragraphs[1], (Position::new(66.0, 0.0), "aa"));
        assert_eq!(target.cursor.real_position(), Position::new(0.0, 8.0));
    }

    #[test]
    fn overrides_only_grow() {
        let mut target = target();
        target
            .styles
            .define("t-column-0", Style::new().with_width(90.0), Inherits::Disabled)
            .unwrap();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("narrow")).unwrap();
        table.add_row(&target.styles, ["aaaaaa"], None, None).unwrap();

        table.render(&mut target).unwrap();

        assert_eq!(target.styles.get("t-column-0").unwrap().width(), Some(90.0));
    }

    #[test]
    fn rows_without_height_take_their_tallest_cell() {
        let mut target = target();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("wide")).unwrap();
        table.add_row(&target.styles, ["a"], None, None).unwrap();
        table.add_row(&target.styles, ["b"], None, Some("tall")).unwrap();

        let metrics = table.render(&mut target).unwrap();

        assert_eq!(target.styles.get("t-row-0").unwrap().height(), Some(8.0));
        assert!(!target.styles.has_style("t-row-1"));
        assert_eq!(metrics.row_heights, vec![8.0, 20.0]);
        let paragraphs = target.paragraphs();
        assert_eq!(paragraphs[1].0, Position::new(0.0, 8.0));
        assert_eq!(target.cursor.real_position(), Position::new(0.0, 28.0));
    }

    #[test]
    fn column_heights_size_unstyled_rows() {
        let mut target = target();
        target
            .styles
            .define("boxy", Style::column().with_width(100.0).with_height(30.0), Inherits::Default)
            .unwrap();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("boxy")).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("boxy")).unwrap();
        table.add_row(&target.styles, ["a", "b"], None, None).unwrap();
        table.add_row(&target.styles, ["c", "d"], None, None).unwrap();

        let metrics = table.render(&mut target).unwrap();

        assert_eq!(metrics.row_heights, vec![30.0, 30.0]);
        assert_eq!(metrics.height, 60.0);
        let paragraphs = target.paragraphs();
        assert_eq!(paragraphs[1], (Position::new(0.0, 30.0), "c"));
        assert_eq!(paragraphs[2], (Position::new(100.0, 0.0), "b"));
        assert_eq!(paragraphs[3], (Position::new(100.0, 30.0), "d"));
        assert!(target.boxes().iter().all(|(_, paint)| paint.height == 30.0));
        assert_eq!(target.cursor.real_position(), Position::new(0.0, 60.0));
    }

    #[test]
    fn column_padding_grows_the_whole_row() {
        let mut target = target();
        target
            .styles
            .define("padded", Style::column().with_width(100.0).with_padding("5"), Inherits::Default)
            .unwrap();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("padded")).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("wide")).unwrap();
        table.add_row(&target.styles, ["a", "b"], None, None).unwrap();
        table.add_row(&target.styles, ["c", "d"], None, None).unwrap();

        let metrics = table.render(&mut target).unwrap();

        // Eight points of text plus five points of padding above and below.
        assert_eq!(metrics.row_heights, vec![18.0, 18.0]);
        assert_eq!(metrics.height, 36.0);
        let paragraphs = target.paragraphs();
        assert_eq!(paragraphs[2], (Position::new(100.0, 0.0), "b"));
        assert_eq!(paragraphs[3], (Position::new(100.0, 18.0), "d"));
        assert!(target.boxes().iter().all(|(_, paint)| paint.height == 18.0));
        assert_eq!(target.cursor.real_position(), Position::new(0.0, 36.0));
    }

    #[test]
    fn vertical_alignment_adds_space_before() {
        let mut target = target();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table.add_column(&target.styles, ColumnSpec::styled("wide")).unwrap();
        table.add_row(&target.styles, ["a"], None, Some("tall")).unwrap();
        table.add_row(&target.styles, ["b"], None, Some("centered")).unwrap();

        table.render(&mut target).unwrap();

        assert_eq!(target.styles.get("t-cell-0-0").unwrap().space_before(), 12.0);
        assert_eq!(target.styles.get("t-cell-0-1").unwrap().space_before(), 6.0);
        let boxes = target.boxes();
        assert_eq!(boxes[0].1.height, 20.0);
    }

    #[test]
    fn column_titles_become_a_header_row() {
        let mut target = target();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        let spec = ColumnSpec::styled("wide").title("Qty").format("#{value}").header_style("head");
        table.add_column(&target.styles, spec).unwrap();
        table.add_row(&target.styles, ["4"], None, None).unwrap();

        let metrics = table.render(&mut target).unwrap();

        assert_eq!(metrics.row_heights.len(), 2);
        let texts: Vec<&str> = target.paragraphs().into_iter().map(|(_, text)| text).collect();
        assert_eq!(texts, vec!["Qty", "#4"]);
        let boxes = target.boxes();
        assert_eq!(boxes[0].1.fill, Some(Color::gray(200.0)));
        assert_eq!(boxes[0].1.stroke, Some((Color::black(), 1.0)));
        assert_eq!(boxes[1].1.fill, None);
    }

    #[test]
    fn explicit_header_rows_replace_titles() {
        let mut target = target();
        let mut table = Table::new("t", "grid", &target.styles).unwrap();
        table
            .add_column(&target.styles, ColumnSpec::styled("wide").title("Qty").format("#{value}"))
            .unwrap();
        table.add_header_row(&target.styles, ["Amount"], None).unwrap();
        table.add_row(&target.styles, ["4"], None, None).unwrap();

        table.render(&mut target).unwrap();

        let texts: Vec<&str> = target.paragraphs().into_iter().map(|(_, text)| text).collect();
        assert_eq!(texts, vec!["Amount", "#4"]);
    }
}

#![allow(dead_code)]

use quire::{Color, Inherits, Pdf, PdfError, Style, Unit};

/// An A4 document measured in points, with 20pt margins.
pub fn points_pdf() -> Pdf {
    Pdf::builder().unit(Unit::POINT).margins([20.0; 4]).build()
}

/// Table, column, header and row styles used by the table tests, in points.
pub fn invoice_styles(pdf: &mut Pdf) -> Result<(), PdfError> {
    pdf.add_style(
        "invoice",
        Style::table().with_border(0.5)?.with_border_color(Color::gray(100.0)).with_padding("2 4"),
        Inherits::Default,
    )?;
    pdf.add_style("item", Style::column().with_width(200.0), Inherits::Default)?;
    pdf.add_style(
        "amount",
        Style::column().with_width(80.0).with_text_align("right"),
        Inherits::Default,
    )?;
    pdf.add_style(
        "heading",
        Style::column_header().with_background_color(Color::gray(220.0)),
        Inherits::Default,
    )?;
    pdf.add_style(
        "tall",
        Style::row().with_height(30.0).with_vertical_align("bottom")?,
        Inherits::Default,
    )?;
    Ok(())
}

/// A single-page document with one rectangle, to be used as a background.
pub fn background_bytes() -> Result<Vec<u8>, PdfError> {
    let mut pdf = points_pdf();
    pdf.add_rectangle(100.0, 50.0, Default::default());
    pdf.content()
}

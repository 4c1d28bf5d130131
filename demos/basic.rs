use clap::Parser;
use quire::{Color, Inherits, PageContext, Pdf, PdfError, RectanglePaint, Style};
use std::env;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Draw the debug grid and paragraph outlines
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Where to write the document
    #[arg(long, default_value = "basic.pdf")]
    output: String,
}

fn footer(pdf: &mut Pdf, page: &PageContext) -> Result<(), PdfError> {
    let top = pdf.height() - 8.0;
    pdf.cursor().move_to(None, Some(top));
    pdf.add_h_line(None);
    pdf.cursor().move_by(0.0, 2.0);
    pdf.add_paragraph(
        &format!("Page {} of {}", page.page_number, page.page_count),
        "footer",
        None,
        None,
    )
}

fn main() -> Result<(), PdfError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "quire=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    println!("Running basic document example...");

    let mut pdf = Pdf::builder().debug(args.debug).footer(footer).build();
    pdf.add_style(
        "title",
        Style::new().with_font_size(18.0).with_font_style("bold").with_padding("0 0 4"),
        Inherits::Default,
    )?;
    pdf.add_style("footer", Style::new().with_font_size(7.0).with_text_align("right"), Inherits::Default)?;
    pdf.add_style(
        "body",
        Style::new().with_text_align("justify").with_padding("2 0"),
        Inherits::Default,
    )?;

    pdf.add_paragraph("Quarterly summary", "title", None, None)?;
    pdf.add_h_line(Some(Color::rgb(0.0, 90.0, 160.0)));
    pdf.cursor().move_by(0.0, 4.0);
    for i in 1..=3 {
        pdf.add_paragraph(
            &format!(
                "Section {}. Paragraphs wrap inside the printable frame and reserve their own height, \
                 so the next call lands right below them.<br/>A forced break starts a new line.",
                i
            ),
            "body",
            None,
            None,
        )?;
    }
    println!("✓ Paragraphs added ({:.1}mm used).", pdf.current_height());

    pdf.add_rectangle(60.0, 12.0, RectanglePaint::default());
    pdf.cursor().move_by(2.0, 8.0);
    pdf.add_string("A plain string on a rectangle");

    pdf.add_page_break();
    pdf.add_paragraph("Shipping label", "title", None, None)?;
    pdf.add_barcode("QUIRE-2024-0042", Some(15.0), None)?;
    println!("✓ Barcode added on page {}.", pdf.page_number());

    pdf.write(&args.output)?;
    println!("✓ Written to {}", args.output);
    Ok(())
}

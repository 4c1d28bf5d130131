use clap::Parser;
use quire::{Color, ColumnSpec, Inherits, Pdf, PdfError, Style};
use std::env;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Draw the debug grid and paragraph outlines
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// JSON stylesheet replacing the built-in styles
    #[arg(long)]
    stylesheet: Option<String>,

    /// Where to write the document
    #[arg(long, default_value = "table.pdf")]
    output: String,
}

fn define_styles(pdf: &mut Pdf) -> Result<(), PdfError> {
    pdf.add_style(
        "invoice",
        Style::table().with_border(0.5)?.with_border_color(Color::gray(120.0)).with_padding("2 3"),
        Inherits::Default,
    )?;
    pdf.add_style("item", Style::column().with_width(90.0), Inherits::Default)?;
    pdf.add_style(
        "amount",
        Style::column().with_width(30.0).with_text_align("right"),
        Inherits::Default,
    )?;
    pdf.add_style(
        "heading",
        Style::column_header()
            .with_background_color(Color::gray(220.0))
            .with_font_style("bold"),
        Inherits::Default,
    )?;
    pdf.add_style(
        "total",
        Style::row().with_height(8.0).with_vertical_align("middle")?,
        Inherits::Default,
    )?;
    Ok(())
}

fn main() -> Result<(), PdfError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "quire=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    println!("Running table example...");

    let mut builder = Pdf::builder().debug(args.debug);
    if let Some(path) = &args.stylesheet {
        let source = std::fs::read_to_string(path)?;
        builder = builder.styles(quire::StyleLibrary::from_json(&source)?);
        println!("✓ Stylesheet loaded from {}", path);
    }
    let mut pdf = builder.build();
    if !pdf.styles().has_style("invoice") {
        define_styles(&mut pdf)?;
    }
    let kind = pdf.get_style("invoice", &[])?.kind();
    println!("✓ Table style is a {}.", kind.label());

    pdf.add_paragraph("Invoice 2024-0042", "paragraph", None, None)?;
    pdf.cursor().move_by(0.0, 3.0);

    let mut table = pdf.add_table("lines", Some("invoice"))?;
    table.add_column(ColumnSpec::styled("item").title("Item").header_style("heading"))?;
    table.add_column(ColumnSpec::new().title("Qty").header_style("heading"))?;
    table.add_column(
        ColumnSpec::styled("amount")
            .title("Price")
            .format("{value} EUR")
            .header_style("heading"),
    )?;
    table.add_row(["Recycled paper, 500 sheets", "4", "4.20"], None, None)?;
    table.add_row(["Ink cartridge, black, high capacity", "1", "31.90"], None, None)?;
    table.add_row(["Shipping", "1", "6.50"], Some("shipping"), None)?;
    table.add_row(["Total", "", "53.20"], Some("total"), Some("total"))?;
    let metrics = table.render()?;
    println!(
        "✓ Table rendered: {} columns, {} rows, {:.1} x {:.1}mm.",
        metrics.column_widths.len(),
        metrics.row_heights.len(),
        metrics.width,
        metrics.height
    );

    pdf.add_paragraph("Thank you for your order.", "paragraph", None, None)?;
    pdf.write(&args.output)?;
    println!("✓ Written to {}", args.output);
    Ok(())
}

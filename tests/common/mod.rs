pub mod fixtures;

use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use quire::Pdf;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// The raw content stream(s) of one page, pages counted from 1.
    pub fn page_content(&self, page: u32) -> Vec<u8> {
        self.doc
            .get_pages()
            .get(&page)
            .and_then(|id| self.doc.get_page_content(*id).ok())
            .unwrap_or_default()
    }

    /// The strings shown on one page, in drawing order.
    pub fn page_strings(&self, page: u32) -> Vec<String> {
        extract_text(&self.page_content(page))
    }

    /// Every string shown in the document, one per line.
    pub fn text(&self) -> String {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_strings(page))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Strings shown on one page with the text position they were shown at,
    /// in PDF points from the bottom left corner.
    pub fn placed_strings(&self, page: u32) -> Vec<(String, f32, f32)> {
        let Ok(content) = Content::decode(&self.page_content(page)) else {
            return Vec::new();
        };
        let mut at = (0.0, 0.0);
        let mut placed = Vec::new();
        for op in &content.operations {
            let number = |i: usize| op.operands.get(i).and_then(|o| o.as_float().ok()).unwrap_or(0.0);
            match op.operator.as_str() {
                "Tm" => at = (number(4), number(5)),
                "Td" => at = (number(0), number(1)),
                "Tj" => {
                    if let Some(Ok(bytes)) = op.operands.first().map(|o| o.as_str()) {
                        placed.push((String::from_utf8_lossy(bytes).into_owned(), at.0, at.1));
                    }
                }
                _ => {}
            }
        }
        placed
    }

    /// Where `text` was shown on `page`.
    pub fn position_of(&self, page: u32, text: &str) -> Option<(f32, f32)> {
        self.placed_strings(page)
            .into_iter()
            .find(|(shown, _, _)| shown == text)
            .map(|(_, x, y)| (x, y))
    }

    /// Operators of one page, in order.
    pub fn operators(&self, page: u32) -> Vec<String> {
        Content::decode(&self.page_content(page))
            .map(|content| content.operations.into_iter().map(|op| op.operator).collect())
            .unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Strings shown by `Tj` operators in a content stream.
pub fn extract_text(content: &[u8]) -> Vec<String> {
    let Ok(content) = Content::decode(content) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

/// Produces the document's bytes and reloads them.
pub fn render(pdf: Pdf) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    GeneratedPdf::from_bytes(pdf.content()?)
}

#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let text = $pdf.text();
        assert!(text.contains($text), "Expected '{}' in the PDF text, got:\n{}", $text, text);
    };
}

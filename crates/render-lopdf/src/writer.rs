use crate::canvas::{PageCanvas, alpha_resource, font_resource};
use crate::error::RenderError;
use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use quire_layout::fonts::StandardFont;
use quire_types::Size;

/// Builds an in-memory document from finished page canvases, then writes it
/// out in one go.
pub struct DocumentWriter {
    document: Document,
    pages_id: ObjectId,
    fonts_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page_size: Size,
}

impl DocumentWriter {
    /// Every page gets `page_size` (in points) and access to the standard
    /// 14 fonts that have metrics.
    pub fn new(page_size: Size) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font_resource(font), font_id);
        }
        let fonts_id = document.add_object(fonts);

        Self {
            document,
            pages_id,
            fonts_id,
            page_ids: Vec::new(),
            page_size,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn add_page(&mut self, canvas: PageCanvas) -> Result<ObjectId, RenderError> {
        let page = canvas.finish();
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, page.content.encode()?));

        let mut resources = dictionary! { "Font" => self.fonts_id };
        if !page.alphas.is_empty() {
            let mut states = Dictionary::new();
            for alpha in &page.alphas {
                let opacity = f32::from(*alpha) / 100.0;
                states.set(
                    alpha_resource(*alpha),
                    dictionary! { "Type" => "ExtGState", "ca" => opacity, "CA" => opacity },
                );
            }
            resources.set("ExtGState", states);
        }

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_size.width.into(), self.page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        debug!("Wrote {} page(s), {} bytes", self.page_ids.len(), buffer.len());
        Ok(buffer)
    }
}

//! PDF composition utilities.
//!
//! The first page of a background document is turned into a form XObject and
//! drawn underneath the existing content of every page of another document.

mod error;

pub use error::ComposerError;

use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Resource name the background form is registered under on every page.
pub const BACKGROUND_FORM: &str = "QuireBg";

/// A helper struct to manage the state of copying objects between documents.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Deep copies an object and everything it references, copying each
    /// source object once.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the id before recursing so that cycles (Page -> Parent ->
        // Kids -> Page) resolve to it.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;

        match self.target_doc.objects.get_mut(&new_id) {
            Some(target_obj) => *target_obj = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }
        Ok(new_id)
    }

    /// Rewrites every reference inside `obj` to point at a copy in the
    /// target document.
    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }
}

/// Looks `key` up on a page, then on its ancestors in the page tree.
fn inherited(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>, lopdf::Error> {
    let mut node = doc.get_dictionary(page_id)?;
    // Page trees are shallow; the bound only guards against broken files.
    for _ in 0..32 {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value.clone()));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node = doc.get_dictionary(parent)?,
            Err(_) => break,
        }
    }
    Ok(None)
}

/// Follows a reference to the dictionary it points at.
fn resolve_dict(doc: &Document, obj: &Object) -> Result<Dictionary, lopdf::Error> {
    match obj {
        Object::Reference(id) => Ok(doc.get_dictionary(*id)?.clone()),
        other => Ok(other.as_dict()?.clone()),
    }
}

/// Builds a form XObject that draws `page_id` of `doc`, with the page's
/// resources and its media box as bounding box.
fn page_as_form(doc: &Document, page_id: ObjectId) -> Result<Stream, ComposerError> {
    let content = doc.get_page_content(page_id)?;
    let media_box = inherited(doc, page_id, b"MediaBox")?
        .ok_or_else(|| ComposerError::Other(format!("Page {:?} has no /MediaBox", page_id)))?;
    let resources = inherited(doc, page_id, b"Resources")?.unwrap_or(Object::Dictionary(Dictionary::new()));

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => media_box,
            "Resources" => resources,
        },
        content,
    ))
}

/// Registers `form_id` as `name` in the page's XObject resources. The page
/// gets its own resource dictionary so shared ones stay untouched.
fn register_xobject(doc: &mut Document, page_id: ObjectId, name: &str, form_id: ObjectId) -> Result<(), ComposerError> {
    let mut resources = match inherited(doc, page_id, b"Resources")? {
        Some(resources) => resolve_dict(doc, &resources)?,
        None => Dictionary::new(),
    };
    let mut xobjects = match resources.get(b"XObject") {
        Ok(xobjects) => resolve_dict(doc, xobjects)?,
        Err(_) => Dictionary::new(),
    };
    xobjects.set(name, form_id);
    resources.set("XObject", xobjects);

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set("Resources", resources);
    Ok(())
}

/// Adds a content stream in front of the page's existing content, so it is
/// drawn underneath it.
pub fn underlay_content(doc: &mut Document, page_id: ObjectId, content_stream: Vec<u8>) -> Result<(), ComposerError> {
    let stream = Stream::new(dictionary! {}, content_stream);
    let new_content_id = doc.add_object(Object::Stream(stream));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let mut contents = match page_dict.get(b"Contents") {
        Ok(Object::Array(streams)) => streams.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => Vec::new(),
    };
    contents.insert(0, Object::Reference(new_content_id));
    page_dict.set("Contents", Object::Array(contents));
    Ok(())
}

/// Draws the first page of `background` underneath every page of `target`.
/// Returns the number of pages that received the background.
pub fn underlay_page(target: &mut Document, background: &Document) -> Result<usize, ComposerError> {
    let background_page = background
        .get_pages()
        .get(&1)
        .copied()
        .ok_or_else(|| ComposerError::Other("The background document has no pages".to_string()))?;

    let form = page_as_form(background, background_page)?;
    let form_id = {
        let mut copier = ObjectCopier::new(background, target);
        let form = copier.remap_references(Object::Stream(form))?;
        copier.target_doc.add_object(form)
    };

    let pages: Vec<ObjectId> = target.get_pages().into_values().collect();
    let draw = format!("q /{} Do Q\n", BACKGROUND_FORM).into_bytes();
    for page_id in &pages {
        register_xobject(target, *page_id, BACKGROUND_FORM, form_id)?;
        underlay_content(target, *page_id, draw.clone())?;
    }
    debug!("Underlaid background on {} page(s)", pages.len());
    Ok(pages.len())
}

/// Loads `foreground`, underlays the first page of the PDF at
/// `background_path` on each of its pages and serializes the result.
///
/// The foreground is spooled through a temporary file before it is parsed.
pub fn apply_background(foreground: &[u8], background_path: &Path) -> Result<Vec<u8>, ComposerError> {
    let background = Document::load(background_path)?;

    let mut spool = tempfile::NamedTempFile::new()?;
    spool.write_all(foreground)?;
    spool.flush()?;
    let mut document = Document::load(spool.path())?;

    underlay_page(&mut document, &background)?;

    let mut output = Vec::new();
    document.save_to(&mut output)?;
    Ok(output)
}

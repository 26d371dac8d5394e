//! Output document assembly using lopdf
//!
//! Every merge and split policy builds its output the same way: import the
//! source document(s) into one renumbered object space, pick an ordered list
//! of output pages (existing pages passed through, or fresh composite pages
//! drawing sources as Form XObjects), then build a new catalog and page tree
//! around that order.
//!
//! Based on the lopdf merge example:
//! https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};

/// Page bounds taken from a page's MediaBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageBounds {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// One Form XObject drawn onto a composite page.
///
/// `tx`/`ty` translate the form's coordinate space, so a form whose BBox
/// starts at the origin is painted with its lower-left corner at `(tx, ty)`.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub xobject: ObjectId,
    pub tx: f32,
    pub ty: f32,
}

/// Accumulates objects from imported documents and an ordered page list,
/// then assembles them into a fresh output document.
pub struct PageAssembler {
    objects: BTreeMap<ObjectId, Object>,
    pages: Vec<ObjectId>,
    next_id: u32,
}

impl PageAssembler {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            pages: Vec::new(),
            next_id: 1,
        }
    }

    /// Absorb a document's objects, renumbered past everything imported so
    /// far, and return its page ids in document order.
    ///
    /// Inheritable page attributes (Resources, MediaBox, CropBox, Rotate) are
    /// materialized onto each page dictionary first: the source page tree is
    /// not carried into the output, so values inherited from it would
    /// otherwise be lost.
    pub fn import(&mut self, mut doc: Document) -> Vec<ObjectId> {
        doc.renumber_objects_with(self.next_id);
        self.next_id = doc.max_id + 1;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            flatten_inherited_attributes(&mut doc, page_id);
        }

        self.objects.extend(doc.objects);
        page_ids
    }

    /// Append an already-imported page to the output page order
    pub fn push_page(&mut self, page_id: ObjectId) {
        self.pages.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        let id = (self.next_id, 0);
        self.next_id += 1;
        self.objects.insert(id, object.into());
        id
    }

    /// Follow reference chains to the underlying object
    fn resolve<'a>(&'a self, mut object: &'a Object) -> &'a Object {
        // Bounded in case of a reference cycle in a malformed file
        for _ in 0..32 {
            match object {
                Object::Reference(id) => match self.objects.get(id) {
                    Some(target) => object = target,
                    None => break,
                },
                _ => break,
            }
        }
        object
    }

    fn page_dict(&self, page_id: ObjectId) -> Result<&Dictionary> {
        match self.objects.get(&page_id) {
            Some(Object::Dictionary(dict)) => Ok(dict),
            _ => Err(Error::General(format!(
                "object {} {} is not a page dictionary",
                page_id.0, page_id.1
            ))),
        }
    }

    /// Read a page's MediaBox (materialized at import time)
    pub fn page_bounds(&self, page_id: ObjectId) -> Result<PageBounds> {
        let dict = self.page_dict(page_id)?;
        let media_box = dict
            .get(b"MediaBox")
            .map_err(|_| Error::General("page has no MediaBox".to_string()))?;

        let values = match self.resolve(media_box) {
            Object::Array(values) => values,
            _ => return Err(Error::General("MediaBox is not an array".to_string())),
        };

        let mut coords = [0.0f32; 4];
        if values.len() != 4 {
            return Err(Error::General("MediaBox must have four entries".to_string()));
        }
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = as_number(self.resolve(value))
                .ok_or_else(|| Error::General("MediaBox entry is not a number".to_string()))?;
        }

        Ok(PageBounds {
            x0: coords[0],
            y0: coords[1],
            x1: coords[2],
            y1: coords[3],
        })
    }

    /// Concatenated content stream bytes of a page.
    ///
    /// Source documents are decompressed before import, so the bytes here are
    /// raw content operators.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let dict = self.page_dict(page_id)?;
        let contents = match dict.get(b"Contents") {
            Ok(contents) => self.resolve(contents).clone(),
            Err(_) => return Ok(Vec::new()),
        };

        let items = match contents {
            Object::Array(items) => items,
            other => vec![other],
        };

        let mut bytes = Vec::new();
        for item in &items {
            if let Object::Stream(stream) = self.resolve(item) {
                bytes.extend_from_slice(&stream.content);
                bytes.push(b'\n');
            }
        }
        Ok(bytes)
    }

    /// Wrap an imported page as a Form XObject so it can be drawn onto
    /// another page. The form's BBox is the page's MediaBox and its
    /// Resources are shared with the source page.
    pub fn embed_page(&mut self, page_id: ObjectId) -> Result<ObjectId> {
        let bounds = self.page_bounds(page_id)?;
        let content = self.page_content(page_id)?;
        let resources = match self.page_dict(page_id)?.get(b"Resources") {
            Ok(resources) => resources.clone(),
            Err(_) => Object::Dictionary(Dictionary::new()),
        };

        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("FormType", Object::Integer(1));
        form.set(
            "BBox",
            Object::Array(vec![
                Object::Real(bounds.x0),
                Object::Real(bounds.y0),
                Object::Real(bounds.x1),
                Object::Real(bounds.y1),
            ]),
        );
        form.set("Resources", resources);

        Ok(self.add_object(Stream::new(form, content)))
    }

    /// Create a new page of the given size whose content draws each placed
    /// form in order, and append it to the output page order.
    pub fn push_composite_page(
        &mut self,
        width: f32,
        height: f32,
        placements: &[Placement],
    ) -> ObjectId {
        let mut operators = String::new();
        let mut xobjects = Dictionary::new();
        for (i, placement) in placements.iter().enumerate() {
            let name = format!("Fx{}", i);
            operators.push_str(&format!(
                "q\n1 0 0 1 {} {} cm\n/{} Do\nQ\n",
                placement.tx, placement.ty, name
            ));
            xobjects.set(name, Object::Reference(placement.xobject));
        }

        let content_id = self.add_object(Stream::new(Dictionary::new(), operators.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ]),
        );
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        let page_id = self.add_object(page);
        self.pages.push(page_id);
        page_id
    }

    /// Build the output document: new catalog and Pages node around the
    /// collected page order, pages reparented, leftover source structure
    /// pruned, streams compressed.
    pub fn finish(self) -> Result<Document> {
        if self.pages.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut doc = Document::with_version("1.5");

        // Add all collected objects first, then make sure new_object_id()
        // hands out ids above everything we just inserted.
        doc.objects.extend(self.objects);
        doc.max_id = self.next_id - 1;

        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.pages.len() as i64));
        pages_object.set("Kids", Object::Array(kids));

        let catalog_id = doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        doc.objects.insert(pages_id, Object::Dictionary(pages_object));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &self.pages {
            if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        // Source catalogs, page trees, and unselected pages are unreachable
        // from the new root now
        doc.prune_objects();
        doc.compress();
        Ok(doc)
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn as_number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

/// Copy attributes a page inherits through its Parent chain onto the page
/// dictionary itself.
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) {
    const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

    for key in INHERITABLE {
        let present = doc
            .get_dictionary(page_id)
            .map(|dict| dict.has(key))
            .unwrap_or(true);
        if present {
            continue;
        }

        if let Some(value) = inherited_attribute(doc, page_id, key) {
            if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
                dict.set(key, value);
            }
        }
    }
}

/// Walk the Parent chain looking for an inheritable attribute
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;

    // Page trees are shallow; the bound guards against Parent cycles
    for _ in 0..32 {
        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
    }
    None
}

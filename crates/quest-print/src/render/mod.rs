//! PDF rendering for composed books
//!
//! This module turns positioned pages into lopdf documents:
//! - Page dictionaries with MediaBox, BleedBox and TrimBox
//! - Grayscale image XObjects for illustrations
//! - Content streams for text, badges, writing lines and keepouts
//! - Optional debug outlines for page edge, trim and safe area

mod content;
mod cover;
mod interior;
mod marks;

pub use cover::render_cover;
pub use interior::render_interior;

use crate::geometry::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Standard fonts shared by every page of one document
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fonts {
    regular: ObjectId,
    bold: ObjectId,
}

impl Fonts {
    pub(crate) const REGULAR: &'static str = "F1";
    pub(crate) const BOLD: &'static str = "F2";

    pub(crate) fn add_to(doc: &mut Document) -> Self {
        Self {
            regular: doc.add_object(font_dict(b"Helvetica")),
            bold: doc.add_object(font_dict(b"Helvetica-Bold")),
        }
    }

    pub(crate) fn dictionary(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        fonts.set(Self::REGULAR, Object::Reference(self.regular));
        fonts.set(Self::BOLD, Object::Reference(self.bold));
        fonts
    }
}

fn font_dict(base_font: &[u8]) -> Dictionary {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(base_font.to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font
}

/// PDF rectangle array `[llx lly urx ury]`
pub(crate) fn box_array(rect: &Rect) -> Object {
    Object::Array(vec![
        Object::Real(rect.x),
        Object::Real(rect.y),
        Object::Real(rect.right()),
        Object::Real(rect.top()),
    ])
}

/// Attach the page tree and catalog once every page exists
pub(crate) fn finish_document(
    doc: &mut Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    doc.trailer.set("Root", catalog_id);
    doc.compress();
}

/// Serialize a document to bytes
pub fn document_bytes(doc: &mut Document) -> crate::types::Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

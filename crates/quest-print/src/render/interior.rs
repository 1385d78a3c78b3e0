//! Interior PDF rendering

use crate::bitmap::Bitmap;
use crate::compose::{ComposedBook, ElementKind, PositionedPage};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::content::{element_ops, image_ops};
use super::marks::debug_page_overlay;
use super::{Fonts, box_array, finish_document};

/// Render a composed book into a PDF document.
///
/// `bitmaps` is indexed by each image element's `image_index`. An image used
/// on several pages is embedded once.
pub fn render_interior(book: &ComposedBook, bitmaps: &[Bitmap], debug: bool) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let fonts = Fonts::add_to(&mut output);
    let mut image_cache: HashMap<usize, ObjectId> = HashMap::new();
    let mut page_refs = Vec::with_capacity(book.pages.len());

    for page in &book.pages {
        let page_id = render_page(
            &mut output,
            page,
            bitmaps,
            &fonts,
            &mut image_cache,
            pages_tree_id,
            debug,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    finish_document(&mut output, pages_tree_id, page_refs);
    log::debug!(
        "rendered interior: {} pages, {} images embedded",
        book.pages.len(),
        image_cache.len()
    );
    Ok(output)
}

fn render_page(
    output: &mut Document,
    page: &PositionedPage,
    bitmaps: &[Bitmap],
    fonts: &Fonts,
    image_cache: &mut HashMap<usize, ObjectId>,
    parent_pages_id: ObjectId,
    debug: bool,
) -> Result<ObjectId> {
    let geometry = &page.geometry;

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set("MediaBox", box_array(&geometry.page_rect));
    page_dict.set("BleedBox", box_array(&geometry.page_rect));
    page_dict.set("TrimBox", box_array(&geometry.trim_rect));

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for element in &page.elements {
        if let ElementKind::Image { image_index } = element.kind {
            let bitmap = bitmaps.get(image_index).ok_or_else(|| {
                QuestPrintError::Layout(format!(
                    "Page {:?} references missing image {}",
                    page.number, image_index
                ))
            })?;
            let image_id = match image_cache.get(&image_index) {
                Some(id) => *id,
                None => {
                    let id = output.add_object(image_xobject(bitmap));
                    image_cache.insert(image_index, id);
                    id
                }
            };
            let name = format!("Im{}", image_index);
            xobjects.set(name.as_bytes(), Object::Reference(image_id));
            content_ops.push(image_ops(
                &name,
                bitmap.width(),
                bitmap.height(),
                &element.rect,
            ));
        } else {
            content_ops.push(element_ops(element));
        }
    }

    if debug {
        content_ops.push(debug_page_overlay(geometry));
    }

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts.dictionary()));
    if !xobjects.is_empty() {
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// 8-bit DeviceGray image XObject
fn image_xobject(bitmap: &Bitmap) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(bitmap.width() as i64));
    dict.set("Height", Object::Integer(bitmap.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    Stream::new(dict, bitmap.pixels().to_vec())
}

//! Wraparound cover rendering

use crate::compose::ComposedCover;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, Stream};

use super::content::element_ops;
use super::marks::debug_cover_overlay;
use super::{Fonts, box_array, finish_document};

/// Render the one-page wraparound cover (back, spine, front)
pub fn render_cover(cover: &ComposedCover, debug: bool) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let fonts = Fonts::add_to(&mut output);
    let geometry = &cover.geometry;

    let mut content = String::new();
    for element in &cover.elements {
        content.push_str(&element_ops(element));
    }
    if debug {
        content.push_str(&debug_cover_overlay(cover));
    }

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts.dictionary()));
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_tree_id));
    page_dict.set("MediaBox", box_array(&geometry.page_rect));
    page_dict.set("BleedBox", box_array(&geometry.page_rect));
    page_dict.set("TrimBox", box_array(&geometry.trim_rect));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));
    let page_id = output.add_object(page_dict);

    finish_document(&mut output, pages_tree_id, vec![Object::Reference(page_id)]);
    Ok(output)
}

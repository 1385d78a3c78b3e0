use crate::compliance::ComplianceEngine;
use crate::geometry::CoverGeometry;
use crate::options::{BookOptions, PrintPolicy};
use crate::types::*;

/// Numbers describing a book before anything is rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookStatistics {
    /// Pages supplied by the caller
    pub content_pages: u32,
    /// Page count after forcing (what the print house sees)
    pub kdp_pages: u32,
    /// Reflection pages added to reach `kdp_pages`
    pub filler_pages: u32,
    pub paper: PaperType,
    pub spine_width_in: f32,
    pub spine_text_allowed: bool,
    /// Allowed and wide enough to set at a readable size
    pub spine_text_printed: bool,
    /// Full cover sheet in inches, bleed included in print mode
    pub cover_size_in: (f32, f32),
}

/// Calculate page and cover numbers for a book
pub fn calculate_statistics(
    options: &BookOptions,
    content_pages: u32,
    policy: &PrintPolicy,
) -> Result<BookStatistics> {
    let engine = ComplianceEngine::new(policy);
    let kdp_pages = engine
        .enforce_page_count(options.requested_pages.max(content_pages))
        .forced;
    if content_pages > kdp_pages {
        return Err(QuestPrintError::InvalidConfiguration(format!(
            "{} content pages exceed the {} page maximum",
            content_pages, policy.max_pages
        )));
    }
    let spine = engine.compute_spine_for_paper(kdp_pages, options.paper, options.trim)?;
    let cover = CoverGeometry::resolve(options.trim, spine.width_in, options.mode, policy);

    Ok(BookStatistics {
        content_pages,
        kdp_pages,
        filler_pages: kdp_pages - content_pages,
        paper: options.paper,
        spine_width_in: spine.width_in,
        spine_text_allowed: spine.text_allowed,
        spine_text_printed: spine.text_size_pt.is_some(),
        cover_size_in: cover.size_in(),
    })
}

//! End-to-end book generation
//!
//! Validation and preflight run first so that a rejected request never
//! produces PDF bytes. Composition and rendering are CPU-bound and run on a
//! blocking task; the bitmaps are dropped as soon as both PDFs exist.

use crate::bitmap::{Bitmap, Passthrough, SketchFilter};
use crate::compose::{PageContent, compose_book, compose_cover};
use crate::geometry::resolve_page_geometry;
use crate::options::{BookOptions, PrintPolicy};
use crate::overlay::TextOverlay;
use crate::preflight::{PreflightChecker, PreflightReport};
use crate::readiness::{ReadinessReport, print_readiness};
use crate::render::{document_bytes, render_cover, render_interior};
use crate::stats::{BookStatistics, calculate_statistics};
use crate::types::*;
use std::sync::Arc;

/// Everything needed to generate one book
#[derive(Clone)]
pub struct GenerateRequest {
    pub options: BookOptions,
    pub policy: PrintPolicy,
    /// Interior pages in reading order
    pub pages: Vec<PageContent>,
    /// Decoded photos in upload order
    pub bitmaps: Vec<Bitmap>,
    /// Photo-to-illustration transform applied after preflight
    pub filter: Arc<dyn SketchFilter>,
}

impl std::fmt::Debug for GenerateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateRequest")
            .field("options", &self.options)
            .field("policy", &self.policy)
            .field("pages", &self.pages)
            .field("bitmaps", &self.bitmaps)
            .finish_non_exhaustive()
    }
}

impl GenerateRequest {
    /// One page per bitmap, each paired with the overlay at the same index
    pub fn from_images(
        options: BookOptions,
        policy: PrintPolicy,
        bitmaps: Vec<Bitmap>,
        overlays: Vec<TextOverlay>,
    ) -> Self {
        let mut overlays = overlays.into_iter();
        let pages = (0..bitmaps.len())
            .map(|index| PageContent {
                image: Some(index),
                overlay: overlays.next(),
                badge: true,
            })
            .collect();

        Self {
            options,
            policy,
            pages,
            bitmaps,
            filter: Arc::new(Passthrough),
        }
    }

    pub fn with_filter(mut self, filter: impl SketchFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }
}

/// Output of a successful generation
#[derive(Debug, Clone)]
pub struct GeneratedBook {
    pub interior_pdf: Vec<u8>,
    pub cover_pdf: Vec<u8>,
    /// Present when the page count was corrected
    pub notice: Option<String>,
    pub preflight: PreflightReport,
    pub readiness: ReadinessReport,
    pub statistics: BookStatistics,
    /// Pages in the interior PDF, QA page included
    pub physical_pages: usize,
}

/// Measure every bitmap against the full-bleed print page it will fill
pub fn preflight_bitmaps(
    bitmaps: &[Bitmap],
    options: &BookOptions,
    policy: &PrintPolicy,
) -> PreflightReport {
    let frame =
        resolve_page_geometry(options.trim, PrintMode::Print, PageSide::Recto, policy).page_rect;
    let mut checker = PreflightChecker::new(policy);
    for bitmap in bitmaps {
        checker.check(bitmap.width(), bitmap.height(), &frame);
    }
    checker.finish()
}

/// Generate the interior and cover PDFs for a request.
///
/// In print mode any image that fails preflight stops the request with
/// [`QuestPrintError::PrintBlocked`] before rendering starts.
pub async fn generate_book(request: GenerateRequest) -> Result<GeneratedBook> {
    let GenerateRequest {
        options,
        policy,
        pages,
        bitmaps,
        filter,
    } = request;

    policy.validate()?;
    options.validate(&policy)?;
    check_image_references(&pages, bitmaps.len())?;

    let preflight = preflight_bitmaps(&bitmaps, &options, &policy);
    if options.mode == PrintMode::Print {
        let failing = preflight.failing();
        if !failing.is_empty() {
            log::error!(
                "print export blocked: {} image(s) below print resolution",
                failing.len()
            );
            return Err(QuestPrintError::PrintBlocked { failing });
        }
    }

    tokio::task::spawn_blocking(move || {
        build_book(options, policy, pages, bitmaps, filter.as_ref(), preflight)
    })
    .await?
}

fn check_image_references(pages: &[PageContent], image_count: usize) -> Result<()> {
    for (index, page) in pages.iter().enumerate() {
        if let Some(image) = page.image {
            if image >= image_count {
                return Err(QuestPrintError::InvalidConfiguration(format!(
                    "Page {} uses image {} but only {} image(s) were supplied",
                    index + 1,
                    image + 1,
                    image_count
                )));
            }
        }
    }
    Ok(())
}

fn build_book(
    options: BookOptions,
    policy: PrintPolicy,
    pages: Vec<PageContent>,
    bitmaps: Vec<Bitmap>,
    filter: &dyn SketchFilter,
    preflight: PreflightReport,
) -> Result<GeneratedBook> {
    let book = compose_book(&pages, &options, &policy, &preflight)?;
    let cover = compose_cover(&options, &policy, &book.spine)?;

    let illustrations: Vec<Bitmap> = bitmaps.into_iter().map(|b| filter.apply(b)).collect();
    let mut interior = render_interior(&book, &illustrations, options.debug_overlay)?;
    drop(illustrations);
    let interior_pdf = document_bytes(&mut interior)?;

    let mut cover_doc = render_cover(&cover, options.debug_overlay)?;
    let cover_pdf = document_bytes(&mut cover_doc)?;

    let readiness = print_readiness(&options, &policy, &preflight, interior_pdf.len());
    let statistics = calculate_statistics(&options, pages.len() as u32, &policy)?;

    log::info!(
        "generated {} interior pages ({} for print), cover {:.3}\" x {:.3}\"",
        book.physical_page_count(),
        book.kdp_page_count(),
        statistics.cover_size_in.0,
        statistics.cover_size_in.1
    );

    Ok(GeneratedBook {
        interior_pdf,
        cover_pdf,
        notice: book.notice(),
        preflight,
        readiness,
        statistics,
        physical_pages: book.physical_page_count(),
    })
}

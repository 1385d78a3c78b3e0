//! Print-house compliance: page-count forcing and spine numbers
//!
//! Page count problems are corrected, never rejected, and the correction is
//! reported as a notice. Spine problems come from configuration and fail
//! the request.

use crate::constants::{HELVETICA_CAP_HEIGHT_RATIO, SPINE_TEXT_MAX_PT, in_to_pt};
use crate::geometry::{CoverGeometry, Rect};
use crate::options::PrintPolicy;
use crate::types::*;

/// Outcome of forcing a requested page count onto the print rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCountAdjustment {
    pub requested: u32,
    pub forced: u32,
}

impl PageCountAdjustment {
    pub fn changed(&self) -> bool {
        self.requested != self.forced
    }

    /// User-facing notice, present only when the count moved
    pub fn notice(&self) -> Option<String> {
        self.changed().then(|| {
            format!(
                "page count adjusted from {} to {}",
                self.requested, self.forced
            )
        })
    }
}

/// Derived spine numbers for one book
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineSpec {
    pub page_count: u32,
    pub thickness_per_page_in: f32,
    pub width_in: f32,
    /// Whether the page count is high enough for a spine title
    pub text_allowed: bool,
    /// Title size that fits the spine safe width, `None` when the title
    /// is not allowed or would be set below the policy minimum
    pub text_size_pt: Option<f32>,
    /// Barcode keepout in back-panel coordinates (origin at the panel's
    /// lower-left trim corner, points)
    pub barcode_keepout: Rect,
}

impl SpineSpec {
    pub fn width_pt(&self) -> f32 {
        in_to_pt(self.width_in)
    }
}

/// Applies the page-count and spine rules of a [`PrintPolicy`]
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEngine<'a> {
    policy: &'a PrintPolicy,
}

impl<'a> ComplianceEngine<'a> {
    pub fn new(policy: &'a PrintPolicy) -> Self {
        Self { policy }
    }

    /// Clamp into `min_pages..=max_pages`, then make the count even.
    ///
    /// Odd counts round up, except at an odd maximum, which rounds down.
    pub fn enforce_page_count(&self, requested: u32) -> PageCountAdjustment {
        let max = self.policy.max_pages;
        let mut forced = requested.max(self.policy.min_pages).min(max);
        if forced % 2 == 1 {
            forced = if forced < max { forced + 1 } else { forced - 1 };
        }
        if forced != requested {
            log::info!("page count adjusted from {} to {}", requested, forced);
        }
        PageCountAdjustment { requested, forced }
    }

    /// Spine width, text eligibility and barcode keepout.
    ///
    /// Fails with `InvalidConfiguration` when `page_count` is zero or the
    /// thickness is not positive.
    pub fn compute_spine(
        &self,
        page_count: u32,
        thickness_per_page_in: f32,
        trim: TrimSize,
    ) -> Result<SpineSpec> {
        if page_count < 1 {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Page count must be at least 1, got {}",
                page_count
            )));
        }
        if !(thickness_per_page_in > 0.0) {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Paper thickness must be positive, got {}",
                thickness_per_page_in
            )));
        }

        let width_in = page_count as f32 * thickness_per_page_in;
        let text_allowed = page_count >= self.policy.spine_text_min_pages;
        let text_size_pt = text_allowed
            .then(|| self.spine_text_size(width_in))
            .filter(|size| *size >= self.policy.spine_text_min_pt);

        // Keepout relative to the back panel is independent of the spine,
        // so resolve it on a zero-width spine in preview coordinates.
        let cover = CoverGeometry::resolve(trim, 0.0, PrintMode::Preview, self.policy);
        let barcode_keepout = cover
            .barcode_keepout
            .translate(-cover.back_panel.x, -cover.back_panel.y);

        log::debug!(
            "spine: {} pages x {}\" = {:.4}\" (text {})",
            page_count,
            thickness_per_page_in,
            width_in,
            match text_size_pt {
                Some(_) => "printed",
                None if text_allowed => "too small, omitted",
                None => "omitted",
            }
        );

        Ok(SpineSpec {
            page_count,
            thickness_per_page_in,
            width_in,
            text_allowed,
            text_size_pt,
            barcode_keepout,
        })
    }

    /// Largest title size whose cap height fits between the spine margins
    fn spine_text_size(&self, width_in: f32) -> f32 {
        let room_pt = in_to_pt(width_in - 2.0 * self.policy.spine_safe_margin_in);
        (room_pt / HELVETICA_CAP_HEIGHT_RATIO).min(SPINE_TEXT_MAX_PT)
    }

    /// Spine for a paper stock, looking the thickness up in the policy
    pub fn compute_spine_for_paper(
        &self,
        page_count: u32,
        paper: PaperType,
        trim: TrimSize,
    ) -> Result<SpineSpec> {
        let thickness = self.policy.thickness_for(paper)?;
        self.compute_spine(page_count, thickness, trim)
    }
}

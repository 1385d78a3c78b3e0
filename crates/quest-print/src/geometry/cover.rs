//! Wraparound cover geometry: back panel, spine, front panel

use crate::constants::in_to_pt;
use crate::options::PrintPolicy;
use crate::types::{PrintMode, TrimSize};

use super::{Edges, Rect};

/// Resolved boxes for the one-piece cover, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverGeometry {
    /// Full cover sheet including bleed
    pub page_rect: Rect,
    /// Cut line around the whole wraparound
    pub trim_rect: Rect,
    pub back_panel: Rect,
    pub spine: Rect,
    pub front_panel: Rect,
    pub back_safe: Rect,
    pub spine_safe: Rect,
    pub front_safe: Rect,
    /// Reserved barcode area on the back panel
    pub barcode_keepout: Rect,
}

impl CoverGeometry {
    /// Lay out the cover for a given spine width (inches).
    ///
    /// The back panel starts at the left trim edge, so the barcode keepout
    /// anchored to its lower-right corner does not move when the spine grows.
    pub fn resolve(
        trim: TrimSize,
        spine_width_in: f32,
        mode: PrintMode,
        policy: &PrintPolicy,
    ) -> Self {
        let bleed = match mode {
            PrintMode::Preview => 0.0,
            PrintMode::Print => in_to_pt(policy.bleed_in),
        };

        let panel_w = in_to_pt(trim.width_in);
        let panel_h = in_to_pt(trim.height_in);
        let spine_w = in_to_pt(spine_width_in);
        let safe = in_to_pt(policy.safe_margin_in);

        let back_panel = Rect::new(bleed, bleed, panel_w, panel_h);
        let spine = Rect::new(back_panel.right(), bleed, spine_w, panel_h);
        let front_panel = Rect::new(spine.right(), bleed, panel_w, panel_h);
        let trim_rect = back_panel.union(&front_panel);
        let page_rect = trim_rect.outset_edges(Edges::uniform(bleed));

        let spine_safe = spine.inset_edges(Edges {
            left: in_to_pt(policy.spine_safe_margin_in),
            right: in_to_pt(policy.spine_safe_margin_in),
            bottom: safe,
            top: safe,
        });

        let barcode = &policy.barcode;
        let inset = in_to_pt(barcode.inset_in);
        let keepout_w = in_to_pt(barcode.width_in);
        let keepout_h = in_to_pt(barcode.height_in);
        let barcode_keepout = Rect::new(
            back_panel.right() - inset - keepout_w,
            back_panel.y + inset,
            keepout_w,
            keepout_h,
        );

        Self {
            page_rect,
            trim_rect,
            back_panel,
            spine,
            front_panel,
            back_safe: back_panel.inset(safe),
            spine_safe,
            front_safe: front_panel.inset(safe),
            barcode_keepout,
        }
    }

    /// Cover sheet size in inches (width, height)
    pub fn size_in(&self) -> (f32, f32) {
        (
            crate::constants::pt_to_in(self.page_rect.width),
            crate::constants::pt_to_in(self.page_rect.height),
        )
    }
}

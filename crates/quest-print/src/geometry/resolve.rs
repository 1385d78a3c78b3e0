//! Print-mode resolution for interior pages
//!
//! One pure function turns (trim, mode) into the three page boxes. Preview
//! and Print share the same code path; Print only differs by a non-zero
//! bleed, which both grows the page and shifts the trim and safe boxes
//! inward by the bleed on the low edges.

use crate::constants::in_to_pt;
use crate::options::PrintPolicy;
use crate::types::{BleedEdges, PageSide, PrintMode, TrimSize};

use super::{Edges, Rect};

/// Resolved boxes for a single interior page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Full page including bleed (MediaBox / BleedBox)
    pub page_rect: Rect,
    /// Cut line (TrimBox)
    pub trim_rect: Rect,
    /// Area guaranteed to survive trimming
    pub safe_rect: Rect,
    /// Bleed applied per edge (all zero in preview)
    pub bleed: Edges,
}

impl PageGeometry {
    /// Distance from the safe box to the trim line, per edge
    pub fn safe_to_trim(&self) -> Edges {
        self.trim_rect.gaps_to(&self.safe_rect)
    }
}

/// Bleed per edge for a page in the given mode
pub fn bleed_edges(mode: PrintMode, side: PageSide, policy: &PrintPolicy) -> Edges {
    match mode {
        PrintMode::Preview => Edges::default(),
        PrintMode::Print => {
            let bleed = in_to_pt(policy.bleed_in);
            let mut edges = Edges::uniform(bleed);
            if policy.bleed_edges == BleedEdges::ExceptSpine {
                match side {
                    PageSide::Recto => edges.left = 0.0,
                    PageSide::Verso => edges.right = 0.0,
                }
            }
            edges
        }
    }
}

/// Compute page, trim and safe boxes for an interior page.
///
/// The safe box is the trim box inset by the safe margin; in print mode the
/// trim box sits `bleed` points inside the page edge, so the safe box moves
/// with it and never falls into the bleed region.
pub fn resolve_page_geometry(
    trim: TrimSize,
    mode: PrintMode,
    side: PageSide,
    policy: &PrintPolicy,
) -> PageGeometry {
    let bleed = bleed_edges(mode, side, policy);

    let trim_rect = Rect::from_size(in_to_pt(trim.width_in), in_to_pt(trim.height_in))
        .translate(bleed.left, bleed.bottom);
    let page_rect = trim_rect.outset_edges(bleed);
    let safe_rect = trim_rect.inset(in_to_pt(policy.safe_margin_in));

    PageGeometry {
        page_rect,
        trim_rect,
        safe_rect,
        bleed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_page_is_trim() {
        let policy = PrintPolicy::default();
        let g = resolve_page_geometry(
            TrimSize::square(8.5),
            PrintMode::Preview,
            PageSide::Recto,
            &policy,
        );
        assert_eq!(g.page_rect, Rect::from_size(612.0, 612.0));
        assert_eq!(g.trim_rect, g.page_rect);
        assert_eq!(g.safe_rect, Rect::new(27.0, 27.0, 558.0, 558.0));
    }

    #[test]
    fn test_print_safe_shifted_by_bleed() {
        let policy = PrintPolicy::default();
        let g = resolve_page_geometry(
            TrimSize::square(8.5),
            PrintMode::Print,
            PageSide::Recto,
            &policy,
        );
        assert_eq!(g.page_rect, Rect::from_size(630.0, 630.0));
        assert_eq!(g.trim_rect, Rect::new(9.0, 9.0, 612.0, 612.0));
        assert_eq!(g.safe_rect, Rect::new(36.0, 36.0, 558.0, 558.0));
    }

    #[test]
    fn test_except_spine_skips_binding_edge() {
        let policy = PrintPolicy {
            bleed_edges: BleedEdges::ExceptSpine,
            ..Default::default()
        };
        let trim = TrimSize::square(8.5);

        let recto = resolve_page_geometry(trim, PrintMode::Print, PageSide::Recto, &policy);
        assert_eq!(recto.page_rect.width, 621.0);
        assert_eq!(recto.trim_rect.x, 0.0);

        let verso = resolve_page_geometry(trim, PrintMode::Print, PageSide::Verso, &policy);
        assert_eq!(verso.page_rect.width, 621.0);
        assert_eq!(verso.trim_rect.x, 9.0);
        assert_eq!(verso.page_rect.right() - verso.trim_rect.right(), 0.0);
    }
}

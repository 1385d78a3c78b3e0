//! Debug outlines and shared path helpers
//!
//! The debug overlay strokes the page edge in blue, the trim line in red and
//! the safe area in green so placement can be checked by eye.

use crate::compose::ComposedCover;
use crate::constants::{BEZIER_CIRCLE_FACTOR, OVERLAY_LINE_WIDTH};
use crate::geometry::{PageGeometry, Rect};

const PAGE_EDGE_RGB: (f32, f32, f32) = (0.0, 0.0, 1.0);
const TRIM_RGB: (f32, f32, f32) = (1.0, 0.0, 0.0);
const SAFE_RGB: (f32, f32, f32) = (0.0, 0.6, 0.0);
const KEEPOUT_RGB: (f32, f32, f32) = (1.0, 0.5, 0.0);

/// Outline page edge, trim and safe boxes of an interior page
pub(crate) fn debug_page_overlay(geometry: &PageGeometry) -> String {
    let mut ops = format!("q {} w\n", OVERLAY_LINE_WIDTH);
    ops.push_str(&outline(&geometry.page_rect, PAGE_EDGE_RGB));
    ops.push_str(&outline(&geometry.trim_rect, TRIM_RGB));
    ops.push_str(&outline(&geometry.safe_rect, SAFE_RGB));
    ops.push_str("Q\n");
    ops
}

/// Outline the cover sheet, each panel, the safe areas and the barcode keepout
pub(crate) fn debug_cover_overlay(cover: &ComposedCover) -> String {
    let geometry = &cover.geometry;
    let mut ops = format!("q {} w\n", OVERLAY_LINE_WIDTH);
    ops.push_str(&outline(&geometry.page_rect, PAGE_EDGE_RGB));
    for panel in [geometry.back_panel, geometry.spine, geometry.front_panel] {
        ops.push_str(&outline(&panel, TRIM_RGB));
    }
    for safe in [geometry.back_safe, geometry.spine_safe, geometry.front_safe] {
        if safe.width > 0.0 && safe.height > 0.0 {
            ops.push_str(&outline(&safe, SAFE_RGB));
        }
    }
    ops.push_str(&outline(&geometry.barcode_keepout, KEEPOUT_RGB));
    ops.push_str("Q\n");
    ops
}

fn outline(rect: &Rect, (r, g, b): (f32, f32, f32)) -> String {
    format!(
        "{} {} {} RG {} {} {} {} re S\n",
        r, g, b, rect.x, rect.y, rect.width, rect.height
    )
}

/// Closed circle path from four Bézier arcs (no paint operator)
pub(crate) fn circle_path(cx: f32, cy: f32, r: f32) -> String {
    let k = r * BEZIER_CIRCLE_FACTOR;
    let mut ops = format!("{} {} m\n", cx + r, cy);
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx + r,
        cy + k,
        cx + k,
        cy + r,
        cx,
        cy + r
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx - k,
        cy + r,
        cx - r,
        cy + k,
        cx - r,
        cy
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx - r,
        cy - k,
        cx - k,
        cy - r,
        cx,
        cy - r
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx + k,
        cy - r,
        cx + r,
        cy - k,
        cx + r,
        cy
    ));
    ops.push_str("h\n");
    ops
}

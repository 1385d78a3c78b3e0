//! Shared constants for print geometry
//!
//! This module centralizes unit conversions and the default policy values
//! used when no policy file is supplied.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (PDF native unit)
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// Convert points to inches
#[inline]
pub fn pt_to_in(pt: f32) -> f32 {
    pt / POINTS_PER_INCH
}

/// Convert inches to millimeters
#[inline]
pub fn in_to_mm(inches: f32) -> f32 {
    inches * MM_PER_INCH
}

/// Pixels needed to cover `inches` at `dpi`, rounded up
#[inline]
pub fn pixels_for(inches: f32, dpi: f32) -> u32 {
    (inches * dpi).ceil().max(0.0) as u32
}

/// Resolution achieved when `pixels` are stretched over `inches`
#[inline]
pub fn dpi_for(pixels: u32, inches: f32) -> f32 {
    pixels as f32 / inches
}

// =============================================================================
// Default Print Policy (KDP square interior)
// =============================================================================

/// Default trim edge in inches (8.5" × 8.5" square)
pub const DEFAULT_TRIM_IN: f32 = 8.5;

/// Bleed added beyond the trim line in print mode
pub const DEFAULT_BLEED_IN: f32 = 0.125;

/// Safe margin measured from the trim line
pub const DEFAULT_SAFE_IN: f32 = 0.375;

/// Safe margin on each side of the spine panel
pub const DEFAULT_SPINE_SAFE_IN: f32 = 0.0625;

/// Minimum interior page count accepted by the print house
pub const DEFAULT_MIN_PAGES: u32 = 24;

/// Maximum interior page count accepted by the print house
pub const DEFAULT_MAX_PAGES: u32 = 828;

/// Page count at which spine text becomes allowed
pub const DEFAULT_SPINE_TEXT_MIN_PAGES: u32 = 79;

/// Smallest spine title size worth printing (points)
pub const DEFAULT_SPINE_TEXT_MIN_PT: f32 = 6.0;

/// Spine title size on wide spines (points)
pub const SPINE_TEXT_MAX_PT: f32 = 14.0;

/// Smallest trim edge the page layout has room for (inches)
pub const MIN_TRIM_IN: f32 = 4.0;

/// Barcode keepout width and height (inches)
pub const DEFAULT_BARCODE_SIZE_IN: (f32, f32) = (2.0, 1.2);

/// Barcode keepout inset from the back panel's trim corner (inches)
pub const DEFAULT_BARCODE_INSET_IN: f32 = 0.25;

/// Preflight target resolution
pub const DEFAULT_TARGET_DPI: f32 = 300.0;

/// Fraction of the target DPI below which an image fails preflight
pub const DEFAULT_WARN_RATIO: f32 = 0.6;

/// Interior PDF size budget in megabytes
pub const DEFAULT_PDF_BUDGET_MB: f32 = 40.0;

// =============================================================================
// Paper Thickness (inches per page)
// =============================================================================

pub const WHITE_PAPER_IN: f32 = 0.002252;
pub const CREAM_PAPER_IN: f32 = 0.0025;
pub const STANDARD_COLOR_PAPER_IN: f32 = 0.002252;
pub const PREMIUM_COLOR_PAPER_IN: f32 = 0.002347;

// =============================================================================
// Composition
// =============================================================================

/// Height of the overlay header band at the top of the safe area (inches)
pub const HEADER_HEIGHT_IN: f32 = 0.6;

/// Diameter of the corner badge icon (inches)
pub const BADGE_SIZE_IN: f32 = 0.56;

/// Gap between composed elements (inches)
pub const ELEMENT_GAP_IN: f32 = 0.15;

/// Default overlay font size (points)
pub const OVERLAY_FONT_SIZE: f32 = 14.0;

/// Font size for QA page lines (points)
pub const QA_FONT_SIZE: f32 = 11.0;

/// Writing line spacing on filler pages (points)
pub const WRITING_LINE_SPACING: f32 = 18.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Helvetica cap height as a fraction of the font size
pub const HELVETICA_CAP_HEIGHT_RATIO: f32 = 0.72;

/// Line height as a multiple of font size
pub const LINE_HEIGHT_RATIO: f32 = 1.25;

// =============================================================================
// Debug Overlay
// =============================================================================

/// Line width for the page/trim/safe outlines (points)
pub const OVERLAY_LINE_WIDTH: f32 = 0.7;

/// Line width for writing lines (points)
pub const WRITING_LINE_WIDTH: f32 = 0.5;

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Control point factor for approximating circles with Bezier curves.
/// 4 * (sqrt(2) - 1) / 3 ≈ 0.552284749831
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_point_conversion() {
        assert_eq!(in_to_pt(8.5), 612.0);
        assert_eq!(in_to_pt(0.125), 9.0);
        assert_eq!(pt_to_in(612.0), 8.5);
    }

    #[test]
    fn test_pixels_and_dpi() {
        assert_eq!(pixels_for(8.75, 300.0), 2625);
        assert_eq!(pixels_for(1.0, 299.5), 300);
        assert_eq!(dpi_for(2625, 8.75), 300.0);
    }
}

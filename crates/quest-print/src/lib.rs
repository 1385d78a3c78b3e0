mod bitmap;
pub mod compliance;
pub mod compose;
pub mod constants;
mod generate;
pub mod geometry;
mod io;
mod options;
mod overlay;
pub mod preflight;
mod readiness;
pub mod render;
mod stats;
mod types;

pub use bitmap::{Bitmap, Passthrough, PencilSketch, SketchFilter};
pub use compliance::{ComplianceEngine, PageCountAdjustment, SpineSpec};
pub use compose::{ComposedBook, ComposedCover, PageContent, compose_book, compose_cover};
pub use generate::{GenerateRequest, GeneratedBook, generate_book, preflight_bitmaps};
pub use geometry::{CoverGeometry, PageGeometry, Rect, resolve_page_geometry};
pub use io::{load_bitmap, load_bitmaps, save_pdf};
pub use options::*;
pub use overlay::{TextOverlay, load_overlays, parse_overlays};
pub use preflight::{PreflightChecker, PreflightReport, PreflightResult, Verdict, check_image};
pub use readiness::{CheckLevel, ReadinessCheck, ReadinessReport, print_readiness};
pub use render::{render_cover, render_interior};
pub use stats::{BookStatistics, calculate_statistics};
pub use types::*;

//! Geometry for interior pages and the wraparound cover
//!
//! - Rectangle primitives in points
//! - Print-mode resolution (bleed, trim and safe boxes)
//! - Cover panels, spine and barcode keepout

mod cover;
mod rect;
mod resolve;

pub use cover::*;
pub use rect::*;
pub use resolve::*;

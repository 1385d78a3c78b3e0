//! File I/O for bitmaps and finished PDFs

use crate::bitmap::Bitmap;
use crate::types::*;
use std::path::Path;

/// Load and decode one image into a grayscale bitmap
pub async fn load_bitmap(path: impl AsRef<Path>) -> Result<Bitmap> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let bitmap = tokio::task::spawn_blocking(move || Bitmap::decode(&bytes)).await??;
    Ok(bitmap)
}

/// Load images in the given order
pub async fn load_bitmaps(paths: &[impl AsRef<Path>]) -> Result<Vec<Bitmap>> {
    let mut bitmaps = Vec::with_capacity(paths.len());
    for path in paths {
        bitmaps.push(load_bitmap(path).await?);
    }
    Ok(bitmaps)
}

/// Write finished PDF bytes
pub async fn save_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path.as_ref(), bytes).await?;
    Ok(())
}

//! Grayscale page bitmaps and the photo-to-sketch seam

use crate::types::*;
use image::{GrayImage, Luma, imageops};

/// 8-bit grayscale bitmap, row-major, top row first
#[derive(Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Bitmap {}x{} needs {} bytes, got {}",
                width,
                height,
                width as usize * height as usize,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Uniform bitmap, mostly useful for tests and placeholders
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize],
        }
    }

    /// Decode any supported image format into grayscale
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let gray = image::load_from_memory(bytes)?.to_luma8();
        Ok(Self::from_gray(gray))
    }

    pub fn from_gray(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn into_gray(self) -> std::result::Result<GrayImage, Self> {
        let (width, height) = (self.width, self.height);
        GrayImage::from_raw(width, height, self.pixels).ok_or(Self {
            width,
            height,
            pixels: Vec::new(),
        })
    }
}

/// Turns a photo into line art. Implementations must be deterministic.
pub trait SketchFilter: Send + Sync {
    fn apply(&self, photo: Bitmap) -> Bitmap;
}

/// Leaves the bitmap untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SketchFilter for Passthrough {
    fn apply(&self, photo: Bitmap) -> Bitmap {
        photo
    }
}

/// Pencil look: invert, blur, then colour-dodge the blur onto the original
#[derive(Debug, Clone, Copy)]
pub struct PencilSketch {
    pub blur_sigma: f32,
}

impl Default for PencilSketch {
    fn default() -> Self {
        Self { blur_sigma: 7.0 }
    }
}

impl SketchFilter for PencilSketch {
    fn apply(&self, photo: Bitmap) -> Bitmap {
        let gray = match photo.into_gray() {
            Ok(gray) => gray,
            Err(original) => return original,
        };

        let mut inverted = gray.clone();
        imageops::invert(&mut inverted);
        let blurred = imageops::blur(&inverted, self.blur_sigma);

        let sketch = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            let base = gray.get_pixel(x, y)[0] as u32;
            let blur = blurred.get_pixel(x, y)[0] as u32;
            let value = if blur >= 255 {
                255
            } else {
                (base * 256 / (255 - blur)).min(255)
            };
            Luma([value as u8])
        });

        Bitmap::from_gray(sketch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(Bitmap::new(4, 4, vec![0; 15]).is_err());
        assert!(Bitmap::new(4, 4, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_pencil_sketch_keeps_size_and_whitens_flat_areas() {
        let photo = Bitmap::filled(32, 16, 200);
        let sketch = PencilSketch::default().apply(photo);
        assert_eq!((sketch.width(), sketch.height()), (32, 16));
        // A flat photo has no edges, so the dodge lands near paper white
        assert!(sketch.pixels().iter().all(|&p| p >= 250));
    }
}

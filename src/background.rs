// The image revealed wherever the keyer makes the live feed transparent.
// Always held at the camera resolution so compositing is a straight
// pixel-for-pixel blend.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

pub struct Background {
    frame: FrameBuffer,
}

impl Background {
    /// Procedural gradient used when no image is configured (or loading
    /// fails at startup). Visual: a smooth warm-to-cool diagonal wash.
    pub fn fallback(width: usize, height: usize) -> Self {
        let mut frame = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 180 / width.max(1)) as u32 + 40;
                let g = (y * 180 / height.max(1)) as u32 + 40;
                let b = 150u32;
                frame.pixels[y * width + x] = (r << 16) | (g << 8) | b;
            }
        }
        Self { frame }
    }

    /// Load an image file and fit it to the frame size.
    pub fn load(path: &Path, width: usize, height: usize) -> Result<Self> {
        Ok(Self { frame: decode_to_frame(path, width, height)? })
    }

    /// Swap in a new image without touching anything else.
    /// On failure the previous background stays in place.
    pub fn replace_from(&mut self, path: &Path) -> Result<()> {
        self.frame = decode_to_frame(path, self.frame.width, self.frame.height)?;
        Ok(())
    }

    /// Back to the procedural gradient.
    pub fn reset(&mut self) {
        *self = Self::fallback(self.frame.width, self.frame.height);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

/// Decode an image file, resize it to the target grid, pack to 0x00RRGGBB.
fn decode_to_frame(path: &Path, width: usize, height: usize) -> Result<FrameBuffer> {
    let decoded = image::open(path)
        .map_err(|e| background_error(path, format!("open/decode: {e}")))?
        .to_rgb8();

    // Stretch to the camera grid; the triangle filter is plenty for a
    // full-frame backdrop.
    let resized = image::imageops::resize(
        &decoded,
        width as u32,
        height as u32,
        FilterType::Triangle,
    );

    let mut pixels = Vec::with_capacity(width * height);
    for px in resized.as_raw().chunks_exact(3) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        pixels.push((r << 16) | (g << 8) | b);
    }

    Ok(FrameBuffer { width, height, pixels })
}

fn background_error(path: &Path, message: String) -> Error {
    Error::Background { message, path: PathBuf::from(path) }
}

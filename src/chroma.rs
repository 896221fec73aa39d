// Chroma-key compositing: pixels near the key color turn transparent and
// reveal the background; pixels far from it keep the live camera color.
// Visual: whatever in the scene matches the key color becomes a window
// onto the background image.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::types::{pack_rgb, unpack_rgb, FrameBuffer, Rgb};

/// Color distance at which alpha starts rising from zero.
/// Samples within this distance of the key are fully keyed out.
const RAMP_START: f32 = 0.5;

/// Slope of the alpha ramp. Steeper means a harder cutout edge; the ramp
/// reaches full opacity at distance RAMP_START + 1/RAMP_SLOPE.
const RAMP_SLOPE: f32 = 7.0;

/// Per-pixel chroma keyer. Holds the key color for its whole lifetime and
/// nothing else; shading is a pure function of the sample.
pub struct ChromaKey {
    key: Rgb,
}

impl ChromaKey {
    pub fn new(key: Rgb) -> Self {
        Self { key }
    }

    pub fn key(&self) -> Rgb {
        self.key
    }

    /// Raw alpha for a sample: a linear ramp in the sample's Euclidean
    /// distance from the key color. Unclamped: negative inside the keyed-out
    /// zone, above 1.0 once fully opaque. The blend stage clamps, the same
    /// way fixed-function blending hardware would.
    #[inline]
    pub fn alpha(&self, sample: Rgb) -> f32 {
        let dr = sample[0] - self.key[0];
        let dg = sample[1] - self.key[1];
        let db = sample[2] - self.key[2];
        let distance = (dr * dr + dg * dg + db * db).sqrt();
        (distance - RAMP_START) * RAMP_SLOPE
    }

    /// Shade one sample: the live color passes through verbatim, paired with
    /// its unclamped alpha.
    #[inline]
    pub fn shade(&self, sample: Rgb) -> (Rgb, f32) {
        (sample, self.alpha(sample))
    }

    /// Key one packed live pixel over one packed background pixel.
    /// Alpha is clamped to [0, 1] here before mixing.
    #[inline]
    pub fn blend_pixel(&self, live: u32, background: u32) -> u32 {
        let (sample, alpha) = self.shade(unpack_rgb(live));
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return background; // fully keyed out: background shows through
        }
        if a >= 1.0 {
            return live; // fully opaque: live pixel untouched
        }
        let back = unpack_rgb(background);
        let inv = 1.0 - a;
        pack_rgb([
            a * sample[0] + inv * back[0],
            a * sample[1] + inv * back[1],
            a * sample[2] + inv * back[2],
        ])
    }

    /// Composite a live frame over a background into `out`.
    /// Each pixel is shaded independently (parallel map, no shared state
    /// between pixels, no ordering between them).
    pub fn composite_over(
        &self,
        live: &FrameBuffer,
        background: &FrameBuffer,
        out: &mut FrameBuffer,
    ) -> Result<()> {
        if !live.same_size(background) {
            return Err(Error::SizeMismatch("composite: live vs background".into()));
        }
        if !live.same_size(out) {
            return Err(Error::SizeMismatch("composite: live vs output".into()));
        }

        out.pixels
            .par_iter_mut()
            .zip(live.pixels.par_iter().zip(background.pixels.par_iter()))
            .for_each(|(dst, (&fg, &bg))| {
                *dst = self.blend_pixel(fg, bg);
            });

        Ok(())
    }
}

/// Parse a `#rrggbb` hex string (leading `#` optional) into normalized RGB.
pub fn parse_hex_color(s: &str) -> Result<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(format!("expected #rrggbb, got {s:?}")));
    }
    let channel = |i: usize| -> f32 {
        // Slicing is in bounds: length checked above.
        u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0) as f32 / 255.0
    };
    Ok([channel(0), channel(2), channel(4)])
}

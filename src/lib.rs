// chromacam: a live chroma-key camera demo.
//
// The camera feed is keyed against a reference color; matching pixels turn
// transparent and reveal a background image the user can swap at runtime.
// `chroma` holds the per-pixel math, everything else is plumbing around it.

pub mod background;
pub mod camera;
pub mod chroma;
pub mod draw;
pub mod error;
pub mod picker;
pub mod types;

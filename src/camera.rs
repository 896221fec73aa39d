// Opens a capture device and converts each frame into the packed buffer the
// window understands. Visual: every `next_frame()` is one step of the live
// feed on screen.

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open device `index` near the requested resolution and start streaming.
    /// The driver may settle on a nearby format; `resolution()` reports what
    /// it actually delivers.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self> {
        let wanted = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed, cheap to convert to RGB
            30,
        );
        let request = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));

        let mut cam = Camera::new(CameraIndex::Index(index), request)
            .map_err(|e| Error::CameraInit(format!("create camera {index}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("open stream: {e}")))?;

        let actual = cam.resolution();
        log::debug!(
            "camera {index} streaming at {}x{}",
            actual.width(),
            actual.height()
        );

        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }

    /// Block until the camera has a new frame, then pack it as 0x00RRGGBB.
    pub fn next_frame(&mut self) -> Result<FrameBuffer> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;

        let rgb = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode RGB: {e}")))?;

        let (w, h) = rgb.dimensions();
        let mut pixels = Vec::with_capacity((w as usize) * (h as usize));
        for px in rgb.as_raw().chunks_exact(3) {
            let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
            pixels.push((r << 16) | (g << 8) | b);
        }

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    /// The resolution the stream actually negotiated.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

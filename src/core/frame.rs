use serde::Serialize;

/// Pixel dimensions of a frame or surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Create a resolution
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes for an RGBA buffer at this resolution
    pub fn rgba_len(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Bytes for an NV21 buffer at this resolution
    ///
    /// One byte per pixel of Y plus a half-resolution interleaved VU plane.
    pub fn nv21_len(&self) -> usize {
        self.pixel_count() * 3 / 2
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Camera-format frame: planar Y followed by interleaved VU bytes
#[derive(Debug, Clone)]
pub struct Nv21Frame {
    pub data: Vec<u8>,
    pub resolution: Resolution,
}

impl Nv21Frame {
    pub fn new(data: Vec<u8>, resolution: Resolution) -> Self {
        Self { data, resolution }
    }
}

/// Decoded RGBA frame ready for processing or display
#[derive(Debug, Clone)]
pub struct FeedFrame {
    pub pixels: Vec<u8>,
    pub resolution: Resolution,
}

impl FeedFrame {
    pub fn new(pixels: Vec<u8>, resolution: Resolution) -> Self {
        Self { pixels, resolution }
    }
}

/// Frame at the viewer boundary: encoded payload plus declared dimensions
///
/// The payload is base64 JPEG text and the dimensions are whatever the
/// producer declared. Nothing downstream validates one against the other;
/// the viewer passes both through uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub payload: String,
    pub width: u32,
    pub height: u32,
}

impl EncodedFrame {
    pub fn new(payload: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            payload: payload.into(),
            width,
            height,
        }
    }
}

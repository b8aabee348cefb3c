//! Display payload construction: data URIs and JPEG encoding
//!
//! The viewer consumes opaque base64 text; this module is where pixel
//! buffers become that text. Keeping encoding out of the viewer keeps the
//! viewer free of image dependencies and trivially testable.

use anyhow::{ensure, Context};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::core::frame::{EncodedFrame, FeedFrame};

/// 1x1 transparent GIF shown before the first real frame arrives
pub const PLACEHOLDER_GIF_BASE64: &str =
    "R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// JPEG quality used when no override is given
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Data URI for the transparent placeholder
pub fn placeholder_data_uri() -> String {
    gif_data_uri(PLACEHOLDER_GIF_BASE64)
}

/// Wrap base64 GIF bytes in a data URI
pub fn gif_data_uri(base64_payload: &str) -> String {
    format!("data:image/gif;base64,{base64_payload}")
}

/// Wrap base64 JPEG bytes in a data URI
pub fn jpeg_data_uri(base64_payload: &str) -> String {
    format!("data:image/jpeg;base64,{base64_payload}")
}

/// Encode an RGBA frame as base64 JPEG with its dimensions attached
pub fn encode_frame(frame: &FeedFrame, quality: u8) -> anyhow::Result<EncodedFrame> {
    let res = frame.resolution;
    ensure!(
        frame.pixels.len() == res.rgba_len(),
        "frame buffer is {} bytes, expected {} for {}",
        frame.pixels.len(),
        res.rgba_len(),
        res
    );

    // JPEG has no alpha channel; drop it up front
    let mut rgb = Vec::with_capacity(res.pixel_count() * 3);
    for px in frame.pixels.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(&rgb, res.width, res.height, ColorType::Rgb8)
        .with_context(|| format!("jpeg encode failed for {res}"))?;

    Ok(EncodedFrame::new(
        BASE64.encode(&jpeg),
        res.width,
        res.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::Resolution;

    #[test]
    fn placeholder_uri_is_stable() {
        assert_eq!(
            placeholder_data_uri(),
            "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7"
        );
    }

    #[test]
    fn jpeg_uri_wraps_payload_verbatim() {
        assert_eq!(jpeg_data_uri("AAAA"), "data:image/jpeg;base64,AAAA");
        assert_eq!(jpeg_data_uri(""), "data:image/jpeg;base64,");
    }

    #[test]
    fn encode_produces_jpeg_with_frame_dimensions() {
        let res = Resolution::new(8, 8);
        let frame = FeedFrame::new(vec![200u8; res.rgba_len()], res);

        let encoded = encode_frame(&frame, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(encoded.width, 8);
        assert_eq!(encoded.height, 8);

        // SOI marker proves the payload really is JPEG
        let bytes = BASE64.decode(&encoded.payload).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_rejects_wrong_buffer_size() {
        let res = Resolution::new(8, 8);
        let frame = FeedFrame::new(vec![0u8; 7], res);
        assert!(encode_frame(&frame, DEFAULT_JPEG_QUALITY).is_err());
    }
}

//! Pixel format conversions between camera, processing, and display formats
//!
//! The NV21 path uses integer fixed-point YUV math so output bytes are
//! exactly reproducible across platforms. Grayscale conversion uses a
//! 256-denominator luma weighting for the same reason.

use anyhow::ensure;

use crate::core::frame::{FeedFrame, Nv21Frame, Resolution};

/// Convert an NV21 camera frame to RGBA
///
/// BT.601 fixed-point conversion: chroma is shared by each 2x2 pixel
/// block, intermediate products are clamped to 18 bits, then shifted down
/// by 10. Alpha is always opaque.
pub fn nv21_to_rgba(frame: &Nv21Frame) -> anyhow::Result<FeedFrame> {
    let res = frame.resolution;
    ensure!(
        res.width % 2 == 0 && res.height % 2 == 0,
        "nv21 requires even dimensions, got {res}"
    );
    ensure!(
        frame.data.len() == res.nv21_len(),
        "nv21 buffer is {} bytes, expected {} for {}",
        frame.data.len(),
        res.nv21_len(),
        res
    );

    let width = res.width as usize;
    let height = res.height as usize;
    let frame_size = width * height;
    let data = &frame.data;

    let mut rgba = vec![0u8; res.rgba_len()];
    let mut yp = 0;
    for j in 0..height {
        let mut uvp = frame_size + (j >> 1) * width;
        let mut u: i32 = 0;
        let mut v: i32 = 0;
        for i in 0..width {
            let y = (i32::from(data[yp]) - 16).max(0);
            if i & 1 == 0 {
                v = i32::from(data[uvp]) - 128;
                u = i32::from(data[uvp + 1]) - 128;
                uvp += 2;
            }

            let y1192 = 1192 * y;
            let r = (y1192 + 1634 * v).clamp(0, 262_143);
            let g = (y1192 - 833 * v - 400 * u).clamp(0, 262_143);
            let b = (y1192 + 2066 * u).clamp(0, 262_143);

            let out = yp * 4;
            rgba[out] = (r >> 10) as u8;
            rgba[out + 1] = (g >> 10) as u8;
            rgba[out + 2] = (b >> 10) as u8;
            rgba[out + 3] = 0xff;
            yp += 1;
        }
    }

    Ok(FeedFrame::new(rgba, res))
}

/// Collapse RGBA to a single-channel grayscale buffer
pub fn rgba_to_gray(rgba: &[u8], resolution: Resolution) -> anyhow::Result<Vec<u8>> {
    ensure!(
        rgba.len() == resolution.rgba_len(),
        "rgba buffer is {} bytes, expected {} for {}",
        rgba.len(),
        resolution.rgba_len(),
        resolution
    );

    let mut gray = Vec::with_capacity(resolution.pixel_count());
    for px in rgba.chunks_exact(4) {
        let luma = (77 * u32::from(px[0]) + 150 * u32::from(px[1]) + 29 * u32::from(px[2])) >> 8;
        gray.push(luma as u8);
    }
    Ok(gray)
}

/// Expand grayscale back to opaque RGBA for display
pub fn gray_to_rgba(gray: &[u8], resolution: Resolution) -> anyhow::Result<Vec<u8>> {
    ensure!(
        gray.len() == resolution.pixel_count(),
        "gray buffer is {} bytes, expected {} for {}",
        gray.len(),
        resolution.pixel_count(),
        resolution
    );

    let mut rgba = Vec::with_capacity(resolution.rgba_len());
    for &g in gray {
        rgba.extend_from_slice(&[g, g, g, 0xff]);
    }
    Ok(rgba)
}

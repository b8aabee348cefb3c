//! Canny edge detection over grayscale buffers
//!
//! Classic four stage pipeline: Gaussian smoothing, Sobel gradients,
//! non-maximum suppression along the gradient direction, then double
//! threshold hysteresis. Output is a binary mask, 255 on edges and 0
//! elsewhere.

use anyhow::ensure;

use crate::core::frame::Resolution;

/// 5x5 Gaussian smoothing kernel, normalized by [`GAUSSIAN_NORM`]
const GAUSSIAN_KERNEL: [[u32; 5]; 5] = [
    [2, 4, 5, 4, 2],
    [4, 9, 12, 9, 4],
    [5, 12, 15, 12, 5],
    [4, 9, 12, 9, 4],
    [2, 4, 5, 4, 2],
];
const GAUSSIAN_NORM: u32 = 159;

/// Canny detector with configurable hysteresis thresholds
///
/// Magnitudes are L1 (|gx| + |gy|), so thresholds are on that scale.
/// The defaults of 50/150 work well for camera-style footage.
pub struct EdgeDetector {
    low_threshold: f32,
    high_threshold: f32,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(50.0, 150.0)
    }
}

impl EdgeDetector {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }

    /// Run the detector over a grayscale buffer
    ///
    /// Frames smaller than the smoothing window come back as an all-zero
    /// mask rather than an error.
    pub fn detect(&self, gray: &[u8], resolution: Resolution) -> anyhow::Result<Vec<u8>> {
        ensure!(
            gray.len() == resolution.pixel_count(),
            "gray buffer is {} bytes, expected {} for {}",
            gray.len(),
            resolution.pixel_count(),
            resolution
        );

        let width = resolution.width as usize;
        let height = resolution.height as usize;
        if width < 5 || height < 5 {
            return Ok(vec![0; resolution.pixel_count()]);
        }

        let blurred = gaussian_blur(gray, width, height);
        let (magnitude, direction) = sobel_gradients(&blurred, width, height);
        let thinned = suppress_non_maxima(&magnitude, &direction, width, height);
        Ok(self.apply_hysteresis(&thinned, width, height))
    }

    /// Grow edges from strong seeds through connected weak pixels
    fn apply_hysteresis(&self, thinned: &[f32], width: usize, height: usize) -> Vec<u8> {
        let mut edges = vec![0u8; thinned.len()];
        let mut stack = Vec::new();

        for (idx, &mag) in thinned.iter().enumerate() {
            if mag < self.high_threshold || edges[idx] != 0 {
                continue;
            }
            edges[idx] = 255;
            stack.push(idx);

            while let Some(seed) = stack.pop() {
                let x = (seed % width) as isize;
                let y = (seed / width) as isize;
                for dy in -1..=1isize {
                    for dx in -1..=1isize {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                            continue;
                        }
                        let n = ny as usize * width + nx as usize;
                        if edges[n] == 0 && thinned[n] >= self.low_threshold {
                            edges[n] = 255;
                            stack.push(n);
                        }
                    }
                }
            }
        }

        edges
    }
}

/// Smooth with the 5x5 kernel, clamping samples at the borders
fn gaussian_blur(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; gray.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (ky, row) in GAUSSIAN_KERNEL.iter().enumerate() {
                let sy = (y + ky).saturating_sub(2).min(height - 1);
                for (kx, &weight) in row.iter().enumerate() {
                    let sx = (x + kx).saturating_sub(2).min(width - 1);
                    acc += weight * u32::from(gray[sy * width + sx]);
                }
            }
            out[y * width + x] = (acc / GAUSSIAN_NORM) as u8;
        }
    }
    out
}

/// L1 gradient magnitude and quantized direction per interior pixel
fn sobel_gradients(blurred: &[u8], width: usize, height: usize) -> (Vec<f32>, Vec<u8>) {
    let mut magnitude = vec![0.0f32; blurred.len()];
    let mut direction = vec![0u8; blurred.len()];

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = |dx: isize, dy: isize| -> i32 {
                let sx = (x as isize + dx) as usize;
                let sy = (y as isize + dy) as usize;
                i32::from(blurred[sy * width + sx])
            };
            let gx = (p(1, -1) + 2 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2 * p(-1, 0) + p(-1, 1));
            let gy = (p(-1, 1) + 2 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2 * p(0, -1) + p(1, -1));

            let idx = y * width + x;
            magnitude[idx] = (gx.abs() + gy.abs()) as f32;
            direction[idx] = gradient_sector(gx as f32, gy as f32);
        }
    }

    (magnitude, direction)
}

/// Quantize a gradient angle into one of four neighbor sectors
///
/// 0 compares left/right, 1 the down-right diagonal, 2 up/down,
/// 3 the down-left diagonal.
fn gradient_sector(gx: f32, gy: f32) -> u8 {
    let mut angle = gy.atan2(gx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    if !(22.5..157.5).contains(&angle) {
        0
    } else if angle < 67.5 {
        1
    } else if angle < 112.5 {
        2
    } else {
        3
    }
}

/// Zero out pixels that are not a local maximum along their gradient
fn suppress_non_maxima(
    magnitude: &[f32],
    direction: &[u8],
    width: usize,
    height: usize,
) -> Vec<f32> {
    let mut out = vec![0.0f32; magnitude.len()];
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let mag = magnitude[idx];
            if mag == 0.0 {
                continue;
            }
            let (ahead, behind) = match direction[idx] {
                0 => (idx + 1, idx - 1),
                1 => (idx + width + 1, idx - width - 1),
                2 => (idx + width, idx - width),
                _ => (idx + width - 1, idx - width + 1),
            };
            if mag >= magnitude[ahead] && mag >= magnitude[behind] {
                out[idx] = mag;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: u32, height: u32, left: u8, right: u8) -> Vec<u8> {
        (0..width * height)
            .map(|i| if i % width < width / 2 { left } else { right })
            .collect()
    }

    #[test]
    fn flat_image_has_no_edges() {
        let res = Resolution::new(16, 16);
        let gray = vec![128u8; res.pixel_count()];
        let edges = EdgeDetector::default().detect(&gray, res).unwrap();
        assert!(edges.iter().all(|&e| e == 0));
    }

    #[test]
    fn step_edge_is_found_and_thin() {
        let res = Resolution::new(16, 16);
        let gray = step_image(16, 16, 0, 255);
        let edges = EdgeDetector::default().detect(&gray, res).unwrap();

        let edge_cols: Vec<usize> = edges
            .iter()
            .enumerate()
            .filter(|(_, &e)| e == 255)
            .map(|(idx, _)| idx % 16)
            .collect();

        assert!(!edge_cols.is_empty());
        // Non-maximum suppression keeps only the two center columns
        assert!(edge_cols.iter().all(|&c| c == 7 || c == 8));
    }

    #[test]
    fn low_contrast_step_is_below_default_thresholds() {
        let res = Resolution::new(16, 16);
        let gray = step_image(16, 16, 100, 110);
        let edges = EdgeDetector::default().detect(&gray, res).unwrap();
        assert!(edges.iter().all(|&e| e == 0));
    }

    #[test]
    fn lowered_thresholds_pick_up_faint_edges() {
        let res = Resolution::new(16, 16);
        let gray = step_image(16, 16, 100, 110);
        let edges = EdgeDetector::new(5.0, 15.0).detect(&gray, res).unwrap();
        assert!(edges.iter().any(|&e| e == 255));
    }

    #[test]
    fn frames_below_kernel_size_come_back_empty() {
        let res = Resolution::new(4, 4);
        let gray = vec![255u8; res.pixel_count()];
        let edges = EdgeDetector::default().detect(&gray, res).unwrap();
        assert_eq!(edges, vec![0u8; 16]);
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let res = Resolution::new(16, 16);
        assert!(EdgeDetector::default().detect(&[0u8; 10], res).is_err());
    }
}

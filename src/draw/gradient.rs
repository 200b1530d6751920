//! # Gradient Fills
//!
//! Linear and diagonal gradient backgrounds. Channel values are interpolated
//! with `round(a*(1-t) + b*t)` so endpoints are exact and each channel moves
//! monotonically between them.

use image::RgbaImage;
use rayon::prelude::*;

use crate::color::Rgb;

/// Gradient direction for [`linear_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

#[inline]
fn mix(a: Rgb, b: Rgb, t: f32) -> [u8; 4] {
    let ch = |i: usize| (f32::from(a[i]) * (1.0 - t) + f32::from(b[i]) * t).round() as u8;
    [ch(0), ch(1), ch(2), 0xff]
}

/// Fill a new canvas with a scanline gradient from `a` to `b` along `axis`.
///
/// The first scanline is exactly `a` and the last exactly `b`.
pub fn linear_gradient(width: u32, height: u32, a: Rgb, b: Rgb, axis: Axis) -> RgbaImage {
    let (w, h) = (width as usize, height as usize);
    let extent = match axis {
        Axis::Vertical => h,
        Axis::Horizontal => w,
    };
    let denom = extent.saturating_sub(1).max(1) as f32;

    let mut buf = vec![0u8; w * h * 4];
    buf.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_mut(4).enumerate() {
            let pos = match axis {
                Axis::Vertical => y,
                Axis::Horizontal => x,
            };
            px.copy_from_slice(&mix(a, b, pos as f32 / denom));
        }
    });

    RgbaImage::from_raw(width, height, buf).expect("buffer sized to dimensions")
}

/// Fill a new canvas with a per-pixel diagonal blend, `t = (x+y)/(w+h)`.
pub fn diagonal_gradient(width: u32, height: u32, a: Rgb, b: Rgb) -> RgbaImage {
    let (w, h) = (width as usize, height as usize);
    let denom = (w + h).max(1) as f32;

    let mut buf = vec![0u8; w * h * 4];
    buf.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_mut(4).enumerate() {
            px.copy_from_slice(&mix(a, b, (x + y) as f32 / denom));
        }
    });

    RgbaImage::from_raw(width, height, buf).expect("buffer sized to dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_endpoints_exact() {
        let img = linear_gradient(8, 64, [10, 20, 30], [200, 100, 0], Axis::Vertical);
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(0, 63).0, [200, 100, 0, 255]);
    }

    #[test]
    fn test_horizontal_endpoints_exact() {
        let img = linear_gradient(64, 8, [0, 0, 0], [255, 255, 255], Axis::Horizontal);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(63, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_single_channel_monotonic() {
        // A and B differ only in red; red must be non-decreasing down the rows.
        let img = linear_gradient(4, 100, [0, 50, 50], [255, 50, 50], Axis::Vertical);
        let mut last = 0u8;
        for y in 0..100 {
            let r = img.get_pixel(0, y).0[0];
            assert!(r >= last, "red decreased at row {}", y);
            last = r;
            assert_eq!(img.get_pixel(0, y).0[1], 50);
            assert_eq!(img.get_pixel(0, y).0[2], 50);
        }
    }

    #[test]
    fn test_scanlines_uniform() {
        let img = linear_gradient(16, 16, [5, 5, 5], [250, 250, 250], Axis::Vertical);
        for y in 0..16 {
            let first = img.get_pixel(0, y);
            for x in 1..16 {
                assert_eq!(img.get_pixel(x, y), first);
            }
        }
    }

    #[test]
    fn test_diagonal_corners() {
        let img = diagonal_gradient(50, 50, [0, 0, 0], [200, 200, 200]);
        // Top-left is t=0 exactly; bottom-right approaches but never reaches t=1.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        let br = img.get_pixel(49, 49).0[0];
        assert!(br > 150 && br < 200);
    }

    #[test]
    fn test_degenerate_extent() {
        let img = linear_gradient(4, 1, [1, 2, 3], [250, 250, 250], Axis::Vertical);
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }
}

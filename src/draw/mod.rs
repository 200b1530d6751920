//! # Drawing Primitives
//!
//! Low-level raster helpers shared by every card template: gradient fills,
//! shadowed rounded rectangles, circular logo composition, and centered text.
//! All primitives operate on `RgbaImage` canvases and are deterministic
//! functions of their inputs.

pub mod gradient;
pub mod logo;
pub mod shadow;
pub mod text;

pub use gradient::{diagonal_gradient, linear_gradient, Axis};
pub use logo::circular_logo;
pub use shadow::{drop_shadow, fill_rounded_rect, glow_ellipse, stroke_rounded_rect, Shadow};
pub use text::{draw_centered_text, draw_text, measure_text};

use image::{Rgba, RgbaImage};

use crate::color::Rgb;

/// Build an RGBA pixel from an RGB color and an alpha value.
#[inline]
pub fn rgba(color: Rgb, alpha: u8) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], alpha])
}

/// Alpha-blend a color onto one canvas pixel. Out-of-bounds coordinates are
/// ignored so callers can draw partially clipped shapes without checks.
pub fn blend_px(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgb, alpha: f32) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let base = f32::from(px.0[c]);
        let over = f32::from(color[c]);
        px.0[c] = (over * alpha + base * (1.0 - alpha)).round() as u8;
    }
    px.0[3] = px.0[3].max((alpha * 255.0).round() as u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_px_opaque_replaces() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        blend_px(&mut img, 1, 1, [200, 100, 50], 1.0);
        assert_eq!(img.get_pixel(1, 1).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_px_half_mixes() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        blend_px(&mut img, 0, 0, [200, 200, 200], 0.5);
        assert_eq!(img.get_pixel(0, 0).0[0], 100);
    }

    #[test]
    fn test_blend_px_out_of_bounds_ignored() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        blend_px(&mut img, -1, 0, [255, 255, 255], 1.0);
        blend_px(&mut img, 5, 5, [255, 255, 255], 1.0);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }
}

//! # Rounded Rectangles, Shadows, and Glows
//!
//! The card/frame styling shared by the templates: rounded-rectangle fills
//! and outlines, Gaussian-blurred drop shadows, and soft ellipse glows.
//! Shadows are blurred on a separate mask layer so their alpha decays
//! monotonically with distance from the shape boundary.

use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_ellipse_mut;
use imageproc::filter::gaussian_blur_f32;

use super::blend_px;
use crate::color::Rgb;

/// Drop-shadow parameters for [`Shadow::shadowed_rounded_rect`]-style calls.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    /// Offset of the shadow from the shape, in pixels.
    pub dx: i64,
    pub dy: i64,
    /// Gaussian sigma; `None` draws a hard-edged shadow.
    pub blur: Option<f32>,
    /// Peak shadow opacity.
    pub alpha: u8,
}

/// True if the local point lies inside a `w`x`h` rounded rectangle.
fn covered(lx: u32, ly: u32, w: u32, h: u32, radius: u32) -> bool {
    let r = radius.min(w / 2).min(h / 2);
    if r == 0 {
        return true;
    }
    // Corner centers; everything outside the corner zones is covered.
    let cx = if lx < r {
        r
    } else if lx >= w - r {
        w - r - 1
    } else {
        return true;
    };
    let cy = if ly < r {
        r
    } else if ly >= h - r {
        h - r - 1
    } else {
        return true;
    };
    let dx = f64::from(lx) - f64::from(cx);
    let dy = f64::from(ly) - f64::from(cy);
    dx * dx + dy * dy <= f64::from(r) * f64::from(r)
}

/// Fill a rounded rectangle. Alpha below 255 blends with the canvas.
pub fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    radius: u32,
    color: Rgba<u8>,
) {
    let alpha = f32::from(color.0[3]) / 255.0;
    let rgb: Rgb = [color.0[0], color.0[1], color.0[2]];
    for ly in 0..h {
        for lx in 0..w {
            if covered(lx, ly, w, h, radius) {
                blend_px(canvas, x + i64::from(lx), y + i64::from(ly), rgb, alpha);
            }
        }
    }
}

/// Outline a rounded rectangle with the given stroke width.
pub fn stroke_rounded_rect(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    radius: u32,
    stroke: u32,
    color: Rgb,
) {
    let stroke = stroke.max(1);
    for ly in 0..h {
        for lx in 0..w {
            if !covered(lx, ly, w, h, radius) {
                continue;
            }
            // Inside the outer shape; skip points also inside the inset shape.
            let inner = lx >= stroke
                && ly >= stroke
                && lx < w.saturating_sub(stroke)
                && ly < h.saturating_sub(stroke)
                && covered(
                    lx - stroke,
                    ly - stroke,
                    w - 2 * stroke,
                    h - 2 * stroke,
                    radius.saturating_sub(stroke),
                );
            if !inner {
                blend_px(canvas, x + i64::from(lx), y + i64::from(ly), color, 1.0);
            }
        }
    }
}

/// Draw a black drop shadow for a rounded rectangle at `(x, y)`.
///
/// The shape is rasterized on a padded mask, optionally Gaussian-blurred, and
/// composited with `shadow.alpha` peak opacity at the offset position.
pub fn drop_shadow(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    radius: u32,
    shadow: Shadow,
) {
    let pad = shadow.blur.map_or(0, |s| (s * 3.0).ceil() as u32);
    let mut mask = GrayImage::new(w + 2 * pad, h + 2 * pad);
    for ly in 0..h {
        for lx in 0..w {
            if covered(lx, ly, w, h, radius) {
                mask.put_pixel(lx + pad, ly + pad, Luma([255]));
            }
        }
    }
    if let Some(sigma) = shadow.blur {
        mask = gaussian_blur_f32(&mask, sigma.max(0.1));
    }

    let peak = f32::from(shadow.alpha) / 255.0;
    let ox = x + shadow.dx - i64::from(pad);
    let oy = y + shadow.dy - i64::from(pad);
    for (mx, my, px) in mask.enumerate_pixels() {
        let coverage = f32::from(px.0[0]) / 255.0;
        if coverage > 0.0 {
            blend_px(canvas, ox + i64::from(mx), oy + i64::from(my), [0, 0, 0], coverage * peak);
        }
    }
}

/// Composite a blurred ellipse of `color` over the canvas.
///
/// Used for radial glow backgrounds; the ellipse is drawn on a transparent
/// layer, blurred as a whole, and alpha-composited.
pub fn glow_ellipse(
    canvas: &mut RgbaImage,
    cx: i64,
    cy: i64,
    rx: i32,
    ry: i32,
    color: Rgb,
    alpha: u8,
    sigma: f32,
) {
    let mut layer = RgbaImage::new(canvas.width(), canvas.height());
    draw_filled_ellipse_mut(
        &mut layer,
        (cx as i32, cy as i32),
        rx.max(1),
        ry.max(1),
        Rgba([color[0], color[1], color[2], alpha]),
    );
    let layer = gaussian_blur_f32(&layer, sigma.max(0.1));
    imageops::overlay(canvas, &layer, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_fill_covers_center_not_corners() {
        let mut img = white(60, 60);
        fill_rounded_rect(&mut img, 10, 10, 40, 40, 12, Rgba([0, 0, 0, 255]));
        // Center is filled.
        assert_eq!(img.get_pixel(30, 30).0, [0, 0, 0, 255]);
        // The very corner pixel of the bounds stays outside the radius.
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
        // Edge midpoints are filled.
        assert_eq!(img.get_pixel(30, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_leaves_interior() {
        let mut img = white(60, 60);
        stroke_rounded_rect(&mut img, 5, 5, 50, 50, 8, 3, [255, 0, 0]);
        assert_eq!(img.get_pixel(30, 6).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(30, 30).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_drop_shadow_alpha_decays_outward() {
        let mut img = white(120, 120);
        let shadow = Shadow { dx: 0, dy: 0, blur: Some(6.0), alpha: 200 };
        drop_shadow(&mut img, 40, 40, 40, 40, 8, shadow);
        // Darkness sampled along a ray leaving the right edge of the shape
        // must never increase with distance.
        let darkness: Vec<i32> = [80u32, 86, 92, 98, 104, 110]
            .iter()
            .map(|&x| 255 - i32::from(img.get_pixel(x, 60).0[0]))
            .collect();
        for pair in darkness.windows(2) {
            assert!(pair[1] <= pair[0], "shadow darkened moving outward: {:?}", darkness);
        }
        // Shape region itself is darkened.
        assert!(img.get_pixel(60, 60).0[0] < 255);
    }

    #[test]
    fn test_hard_shadow_no_blur() {
        let mut img = white(80, 80);
        let shadow = Shadow { dx: 6, dy: 6, blur: None, alpha: 80 };
        drop_shadow(&mut img, 20, 20, 30, 30, 5, shadow);
        // Offset region darkened, far corner untouched.
        assert!(img.get_pixel(40, 40).0[0] < 255);
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_glow_brightens_center_region() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        glow_ellipse(&mut img, 50, 50, 25, 25, [0, 200, 0], 180, 8.0);
        assert!(img.get_pixel(50, 50).0[1] > 50);
        assert_eq!(img.get_pixel(2, 2).0[1], 0);
    }
}

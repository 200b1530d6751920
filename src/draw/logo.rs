//! # Circular Logo Composition
//!
//! Scales a logo image to fit a circle, center-crops it with a circular alpha
//! mask, and composites it onto the canvas. Load or decode failures are
//! absorbed silently; the canvas is simply left unchanged so a missing or
//! broken logo can never fail a render.

use std::path::Path;

use image::RgbaImage;

use super::blend_px;

/// Composite `logo_path` as a circle of `diameter` centered at
/// `(center_x, center_y)`. A failure to open or decode the file is a no-op.
pub fn circular_logo(canvas: &mut RgbaImage, logo_path: &Path, center_x: i64, center_y: i64, diameter: u32) {
    let Ok(decoded) = image::open(logo_path) else {
        return;
    };
    if diameter == 0 {
        return;
    }

    // Fit within the circle's bounding square, preserving aspect ratio.
    let thumb = decoded.thumbnail(diameter, diameter).to_rgba8();
    let (tw, th) = thumb.dimensions();
    let offset_x = (diameter - tw) / 2;
    let offset_y = (diameter - th) / 2;

    let radius = f64::from(diameter) / 2.0;
    let origin_x = center_x - i64::from(diameter) / 2;
    let origin_y = center_y - i64::from(diameter) / 2;

    for ly in 0..diameter {
        for lx in 0..diameter {
            let dx = f64::from(lx) + 0.5 - radius;
            let dy = f64::from(ly) + 0.5 - radius;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            // Pixels of the bounding square not covered by the (letterboxed)
            // thumbnail stay transparent.
            if lx < offset_x || ly < offset_y {
                continue;
            }
            let (sx, sy) = (lx - offset_x, ly - offset_y);
            if sx >= tw || sy >= th {
                continue;
            }
            let src = thumb.get_pixel(sx, sy);
            blend_px(
                canvas,
                origin_x + i64::from(lx),
                origin_y + i64::from(ly),
                [src.0[0], src.0[1], src.0[2]],
                f32::from(src.0[3]) / 255.0,
            );
        }
    }
}

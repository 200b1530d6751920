//! # Text Measurement and Placement
//!
//! Two-tier text rendering: an anti-aliased TTF path via `ab_glyph` using a
//! font discovered on the host system, falling back to the built-in Spleen
//! 12x24 bitmap glyphs scaled to the requested size. Rendering never fails;
//! an unresolvable font family just means the bitmap tier is used.

use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, ScaleFont};
use image::RgbaImage;
use spleen_font::{PSF2Font, FONT_12X24};

use super::blend_px;
use crate::color::Rgb;

/// Common system font locations probed once per process.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static SYSTEM_FONT: OnceLock<Option<FontArc>> = OnceLock::new();

fn system_font() -> Option<&'static FontArc> {
    SYSTEM_FONT
        .get_or_init(|| {
            for path in FONT_CANDIDATES {
                if let Ok(bytes) = std::fs::read(path) {
                    if let Ok(font) = FontArc::try_from_vec(bytes) {
                        return Some(font);
                    }
                }
            }
            None
        })
        .as_ref()
}

/// Spleen glyph cell dimensions.
const CELL_W: u32 = 12;
const CELL_H: u32 = 24;

/// Bitmap-tier cell size for a requested pixel height.
fn bitmap_cell(px: f32) -> (u32, u32) {
    let h = (px.round() as u32).max(1);
    let w = (h * CELL_W / CELL_H).max(1);
    (w, h)
}

/// Measure the bounding box of a glyph run at `px` pixel height.
///
/// Empty strings measure as zero width.
pub fn measure_text(text: &str, px: f32) -> (u32, u32) {
    if text.is_empty() {
        return (0, px.round() as u32);
    }
    if let Some(font) = system_font() {
        let scaled = font.as_scaled(px);
        let width: f32 = text.chars().map(|c| scaled.h_advance(font.glyph_id(c))).sum();
        let height = (scaled.ascent() - scaled.descent()).ceil();
        (width.ceil() as u32, height as u32)
    } else {
        let (cw, ch) = bitmap_cell(px);
        (cw * text.chars().count() as u32, ch)
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
pub fn draw_text(canvas: &mut RgbaImage, text: &str, px: f32, x: i64, y: i64, color: Rgb) {
    if text.is_empty() {
        return;
    }
    if let Some(font) = system_font() {
        draw_ttf(canvas, font, text, px, x, y, color);
    } else {
        draw_bitmap(canvas, text, px, x, y, color);
    }
}

/// Draw `text` so its horizontal center is `center_x` and its top is `top_y`.
pub fn draw_centered_text(
    canvas: &mut RgbaImage,
    text: &str,
    px: f32,
    center_x: i64,
    top_y: i64,
    color: Rgb,
) {
    let (width, _) = measure_text(text, px);
    draw_text(canvas, text, px, center_x - i64::from(width) / 2, top_y, color);
}

fn draw_ttf(canvas: &mut RgbaImage, font: &FontArc, text: &str, px: f32, x: i64, y: i64, color: Rgb) {
    let scaled = font.as_scaled(px);
    let baseline = scaled.ascent();
    let mut caret = 0.0f32;

    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(px, ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(glyph_id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px_x = x + i64::from(gx) + bounds.min.x as i64;
                let px_y = y + i64::from(gy) + bounds.min.y as i64;
                blend_px(canvas, px_x, px_y, color, coverage);
            });
        }
    }
}

fn draw_bitmap(canvas: &mut RgbaImage, text: &str, px: f32, x: i64, y: i64, color: Rgb) {
    let (cw, ch) = bitmap_cell(px);
    let mut font = match PSF2Font::new(FONT_12X24) {
        Ok(f) => f,
        Err(_) => return,
    };

    for (i, ch_char) in text.chars().enumerate() {
        let cell_x = x + i64::from(cw) * i as i64;
        let utf8 = ch_char.to_string();

        let mut bitmap = vec![false; (CELL_W * CELL_H) as usize];
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < CELL_H as usize && col_x < CELL_W as usize {
                        bitmap[row_y * CELL_W as usize + col_x] = on;
                    }
                }
            }
        } else {
            continue;
        }

        // Nearest-neighbor scale from the 12x24 cell to the target size.
        for dy in 0..ch {
            for dx in 0..cw {
                let sx = (dx * CELL_W / cw) as usize;
                let sy = (dy * CELL_H / ch) as usize;
                if bitmap[sy * CELL_W as usize + sx] {
                    blend_px(canvas, cell_x + i64::from(dx), y + i64::from(dy), color, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_empty_string_zero_width() {
        let (w, _) = measure_text("", 24.0);
        assert_eq!(w, 0);
    }

    #[test]
    fn test_empty_string_draw_is_noop() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        draw_centered_text(&mut canvas, "", 24.0, 10, 2, [255, 255, 255]);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_measure_grows_with_text() {
        let (short, _) = measure_text("Hi", 24.0);
        let (long, _) = measure_text("Hello there", 24.0);
        assert!(long > short);
    }

    #[test]
    fn test_draw_marks_pixels() {
        let mut canvas = RgbaImage::from_pixel(200, 60, Rgba([0, 0, 0, 255]));
        draw_text(&mut canvas, "TEST", 32.0, 4, 4, [255, 255, 255]);
        assert!(canvas.pixels().any(|p| p.0[0] > 128));
    }

    #[test]
    fn test_centering_is_symmetric() {
        let mut canvas = RgbaImage::from_pixel(300, 60, Rgba([0, 0, 0, 255]));
        draw_centered_text(&mut canvas, "MMMM", 32.0, 150, 8, [255, 255, 255]);

        // Find leftmost and rightmost lit columns; they should straddle x=150
        // within a small tolerance.
        let lit: Vec<u32> = (0..300)
            .filter(|&x| (0..60).any(|y| canvas.get_pixel(x, y).0[0] > 0))
            .collect();
        let (left, right) = (*lit.first().unwrap() as i64, *lit.last().unwrap() as i64);
        let center = (left + right) / 2;
        assert!((center - 150).abs() <= 4, "text center at {}", center);
    }
}

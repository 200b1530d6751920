//! # Split Contrast
//!
//! Bold two-tone layout: a full-height accent panel carries the text on the
//! left, the code floats over the lighter right field with a blurred shadow.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{lighten, parse_hex, Palette, Rgb};
use crate::draw::{blend_px, draw_text, drop_shadow, Shadow};
use crate::error::PlacardError;

pub struct SplitContrast;

fn vbar(canvas: &mut RgbaImage, x: i64, y0: i64, y1: i64, thickness: u32, color: Rgb) {
    for dy in y0..y1 {
        for dx in 0..thickness {
            blend_px(canvas, x + i64::from(dx), dy, color, 1.0);
        }
    }
}

fn hbar(canvas: &mut RgbaImage, x0: i64, x1: i64, y: i64, thickness: u32, color: Rgb) {
    for dx in x0..x1 {
        for dy in 0..thickness {
            blend_px(canvas, dx, y + i64::from(dy), color, 1.0);
        }
    }
}

impl Template for SplitContrast {
    fn id(&self) -> u32 {
        7
    }

    fn name(&self) -> &str {
        "Split Contrast"
    }

    fn render(
        &self,
        code: &RgbaImage,
        label: &str,
        palette: &Palette,
        logo: Option<&Path>,
        text: &TextSettings,
    ) -> Result<RgbaImage, PlacardError> {
        let (qw, qh) = code.dimensions();
        let accent_w = (qw / 2).max(200);
        let card_w = qw + accent_w + 220;
        let card_h = qh + 240;
        let color = parse_hex(&text.color)?;

        let field = lighten(palette[2], 35);
        let mut card = RgbaImage::from_pixel(card_w, card_h, Rgba([field[0], field[1], field[2], 255]));

        // Accent panel.
        for y in 0..card_h {
            for x in 0..accent_w {
                blend_px(&mut card, i64::from(x), i64::from(y), palette[0], 1.0);
            }
        }

        let qr_x = i64::from(accent_w) + i64::from(card_w - accent_w - qw) / 2;
        let qr_y = 100i64;

        drop_shadow(
            &mut card,
            qr_x - 30,
            qr_y - 30,
            qw + 60,
            qh + 60,
            30,
            Shadow { dx: 0, dy: 0, blur: Some(10.0), alpha: 90 },
        );
        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 120);

        draw_text(&mut card, &text.title, text.title_size, 30, 70, color);
        draw_text(&mut card, &text.subtitle, text.subtitle_size, 30, 130, color);
        draw_text(&mut card, label, text.name_size, 30, i64::from(card_h) - 90, color);

        // Divider lines in the secondary color.
        vbar(&mut card, i64::from(accent_w) - 8, 60, i64::from(card_h) - 60, 4, palette[1]);
        hbar(&mut card, 30, i64::from(accent_w) - 30, i64::from(card_h) - 105, 3, palette[1]);

        Ok(card)
    }
}

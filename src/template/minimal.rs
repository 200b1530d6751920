//! # Minimalist
//!
//! Off-white field with a trio of accent rules up top, a soft-shadowed
//! outlined card, and a short divider between label and subtitle.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette};
use crate::draw::{
    blend_px, draw_centered_text, drop_shadow, fill_rounded_rect, stroke_rounded_rect, Shadow,
};
use crate::error::PlacardError;

pub struct Minimalist;

fn hbar(canvas: &mut RgbaImage, x: i64, y: i64, width: u32, thickness: u32, color: crate::color::Rgb) {
    for dy in 0..thickness {
        for dx in 0..width {
            blend_px(canvas, x + i64::from(dx), y + i64::from(dy), color, 1.0);
        }
    }
}

impl Template for Minimalist {
    fn id(&self) -> u32 {
        4
    }

    fn name(&self) -> &str {
        "Minimalist"
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
        let card_w = qw + 140;
        let card_h = qh + 260;
        let color = parse_hex(&text.color)?;
        let accent = palette[0];

        let mut card = RgbaImage::from_pixel(card_w, card_h, Rgba([250, 250, 252, 255]));

        // Three rules of decreasing weight.
        for (i, thickness) in [8u32, 5, 3].iter().enumerate() {
            hbar(&mut card, 40, 30 + i as i64 * 12, card_w - 80, *thickness, accent);
        }

        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 100i64;

        drop_shadow(
            &mut card,
            qr_x - 25,
            qr_y - 20,
            qw + 50,
            qh + 50,
            20,
            Shadow { dx: 0, dy: 5, blur: Some(15.0), alpha: 40 },
        );
        fill_rounded_rect(
            &mut card,
            qr_x - 20,
            qr_y - 20,
            qw + 40,
            qh + 40,
            15,
            Rgba([255, 255, 255, 255]),
        );
        stroke_rounded_rect(&mut card, qr_x - 20, qr_y - 20, qw + 40, qh + 40, 15, 2, [220, 220, 220]);

        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 120);

        let center = i64::from(card_w) / 2;
        let name_y = qr_y + i64::from(qh) + 40;
        draw_centered_text(&mut card, label, text.name_size, center, name_y, color);

        let line_y = name_y + 40;
        hbar(&mut card, center - 50, line_y, 100, 3, accent);
        draw_centered_text(&mut card, &text.subtitle, text.title_size, center, line_y + 15, color);

        Ok(card)
    }
}

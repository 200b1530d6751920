//! # Neon Cyberpunk
//!
//! Near-black base with horizontal neon scanlines, a triple ring outline
//! around a dark inner panel, and a boxed label.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{channel_sum, parse_hex, Palette, Rgb};
use crate::draw::{
    blend_px, draw_centered_text, fill_rounded_rect, measure_text, stroke_rounded_rect,
};
use crate::error::PlacardError;

pub struct NeonCyberpunk;

impl Template for NeonCyberpunk {
    fn id(&self) -> u32 {
        3
    }

    fn name(&self) -> &str {
        "Neon Cyberpunk"
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
        let card_w = qw + 200;
        let card_h = qh + 320;
        let color = parse_hex(&text.color)?;

        // Too-dark secondary colors get replaced by a visible neon cyan.
        let neon: Rgb = if channel_sum(palette[1]) > 200 {
            palette[1]
        } else {
            [0, 255, 200]
        };

        let mut card = RgbaImage::from_pixel(card_w, card_h, Rgba([10, 10, 25, 255]));

        // Scanlines every 30 rows, two pixels thick.
        for y in (0..card_h).step_by(30) {
            for dy in 0..2 {
                for x in 0..card_w {
                    blend_px(&mut card, i64::from(x), i64::from(y + dy), neon, 1.0);
                }
            }
        }

        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 120i64;

        for offset in [40i64, 30, 20] {
            stroke_rounded_rect(
                &mut card,
                qr_x - offset,
                qr_y - offset,
                qw + 2 * offset as u32,
                qh + 2 * offset as u32,
                15,
                3,
                neon,
            );
        }

        fill_rounded_rect(
            &mut card,
            qr_x - 15,
            qr_y - 15,
            qw + 30,
            qh + 30,
            10,
            Rgba([15, 15, 30, 255]),
        );

        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 150);

        let center = i64::from(card_w) / 2;
        draw_centered_text(&mut card, &text.title, text.title_size, center, 40, neon);

        // Label sits in an outlined box beneath the code.
        let name_y = qr_y + i64::from(qh) + 60;
        let (name_w, _) = measure_text(label, text.name_size);
        let box_x = center - i64::from(name_w) / 2 - 20;
        let box_w = name_w + 40;
        fill_rounded_rect(&mut card, box_x, name_y - 10, box_w, 45, 0, Rgba([20, 20, 40, 255]));
        stroke_rounded_rect(&mut card, box_x, name_y - 10, box_w, 45, 0, 2, neon);
        draw_centered_text(&mut card, label, text.name_size, center, name_y, color);

        Ok(card)
    }
}

//! # 3D Luxury
//!
//! Diagonal per-pixel gradient, a stepped bevel of offset rectangles behind
//! a gold-rimmed white card, an embossed title, and a label plaque. The logo
//! gains concentric gold rings over a white disc.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_hollow_ellipse_mut};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette};
use crate::draw::{
    draw_centered_text, diagonal_gradient, fill_rounded_rect, measure_text, stroke_rounded_rect,
};
use crate::error::PlacardError;

const GOLD: crate::color::Rgb = [220, 180, 50];
const GOLD_SHADOW: crate::color::Rgb = [100, 80, 20];

pub struct Luxury3d;

impl Template for Luxury3d {
    fn id(&self) -> u32 {
        5
    }

    fn name(&self) -> &str {
        "3D Luxury"
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
        let card_h = qh + 340;
        let color = parse_hex(&text.color)?;

        let mut card = diagonal_gradient(card_w, card_h, palette[0], palette[1]);

        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 120i64;

        // Stepped bevel: five offset slabs, darkest furthest out.
        for i in (1..=5u8).rev() {
            let offset = i64::from(i) * 8;
            let darkness = 255 - u32::from(i) * 30;
            let slab = Rgba([(darkness / 3) as u8, (darkness / 3) as u8, (darkness / 2) as u8, 255]);
            fill_rounded_rect(
                &mut card,
                qr_x - 40 + offset,
                qr_y - 40 + offset,
                qw + 80,
                qh + 80,
                25,
                slab,
            );
        }

        fill_rounded_rect(&mut card, qr_x - 40, qr_y - 40, qw + 80, qh + 80, 25, Rgba([255, 255, 255, 255]));
        for stroke in [4u32, 2, 1] {
            let intensity = (255 - stroke * 30) as u8;
            stroke_rounded_rect(
                &mut card,
                qr_x - 40,
                qr_y - 40,
                qw + 80,
                qh + 80,
                25,
                stroke,
                [intensity, intensity / 2, 50],
            );
        }

        paste_code(&mut card, code, qr_x, qr_y);

        if logo.is_some() {
            let cx = (qr_x + i64::from(qw) / 2) as i32;
            let cy = (qr_y + i64::from(qh) / 2) as i32;
            // Concentric gold rings, then a white disc under the logo circle.
            for ring in 0..3i32 {
                let radius = 100 - ring * 10;
                let tone = [
                    (220 - ring * 20) as u8,
                    (180 - ring * 20) as u8,
                    50,
                ];
                for thickness in 0..3 {
                    draw_hollow_ellipse_mut(
                        &mut card,
                        (cx, cy),
                        radius - thickness,
                        radius - thickness,
                        Rgba([tone[0], tone[1], tone[2], 255]),
                    );
                }
            }
            draw_filled_ellipse_mut(&mut card, (cx, cy), 80, 80, Rgba([255, 255, 255, 255]));
            add_logo(&mut card, logo, qr_x, qr_y, code, 140);
        }

        let center = i64::from(card_w) / 2;
        // Embossed title: three dark offsets with a gold face on top.
        for (dx, dy) in [(3i64, 3i64), (2, 2), (1, 1)] {
            draw_centered_text(&mut card, &text.title, text.title_size, center + dx, 45 + dy, GOLD_SHADOW);
        }
        draw_centered_text(&mut card, &text.title, text.title_size, center, 45, GOLD);

        // Label plaque.
        let name_y = qr_y + i64::from(qh) + 70;
        let (name_w, _) = measure_text(label, text.name_size);
        let plaque_x = center - i64::from(name_w) / 2 - 25;
        let plaque_w = name_w + 50;
        fill_rounded_rect(&mut card, plaque_x, name_y - 12, plaque_w, 50, 10, Rgba([255, 255, 255, 255]));
        stroke_rounded_rect(&mut card, plaque_x, name_y - 12, plaque_w, 50, 10, 2, GOLD);
        draw_centered_text(&mut card, label, text.name_size, center, name_y, color);

        Ok(card)
    }
}

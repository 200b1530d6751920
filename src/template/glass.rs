//! # Glassmorphism
//!
//! Darkened gradient backdrop with a frosted white card and a compact
//! title/label layout.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{darken, parse_hex, Palette};
use crate::draw::{draw_centered_text, fill_rounded_rect, linear_gradient, Axis};
use crate::error::PlacardError;

pub struct Glassmorphism;

impl Template for Glassmorphism {
    fn id(&self) -> u32 {
        2
    }

    fn name(&self) -> &str {
        "Glassmorphism"
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
        let card_w = qw + 160;
        let card_h = qh + 280;
        let color = parse_hex(&text.color)?;

        let mut card = linear_gradient(
            card_w,
            card_h,
            darken(palette[0], 60),
            darken(palette[1], 40),
            Axis::Vertical,
        );

        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 90i64;

        fill_rounded_rect(
            &mut card,
            qr_x - 15,
            qr_y - 15,
            qw + 30,
            qh + 30,
            20,
            Rgba([255, 255, 255, 255]),
        );

        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 130);

        let center = i64::from(card_w) / 2;
        draw_centered_text(&mut card, &text.title, text.title_size, center, 30, color);
        draw_centered_text(&mut card, label, text.name_size, center, qr_y + i64::from(qh) + 35, color);

        Ok(card)
    }
}

//! # Sunrise Spotlight
//!
//! The lightest variant: a vertical gradient, the code pasted directly onto
//! it (its quiet zone is the frame), and a centered text stack.

use std::path::Path;

use image::RgbaImage;

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette};
use crate::draw::{draw_centered_text, linear_gradient, measure_text, Axis};
use crate::error::PlacardError;

pub struct SunriseSpotlight;

impl Template for SunriseSpotlight {
    fn id(&self) -> u32 {
        8
    }

    fn name(&self) -> &str {
        "Sunrise Spotlight"
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
        let card_h = qh + 220;
        let color = parse_hex(&text.color)?;

        let mut card = linear_gradient(card_w, card_h, palette[0], palette[1], Axis::Vertical);

        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 90i64;
        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 120);

        let center = i64::from(card_w) / 2;
        let (_, title_h) = measure_text(&text.title, text.title_size);
        draw_centered_text(&mut card, &text.title, text.title_size, center, 20, color);
        draw_centered_text(
            &mut card,
            &text.subtitle,
            text.subtitle_size,
            center,
            20 + i64::from(title_h) + 5,
            color,
        );
        draw_centered_text(&mut card, label, text.name_size, center, qr_y + i64::from(qh) + 30, color);

        Ok(card)
    }
}

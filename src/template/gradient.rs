//! # Modern Gradient
//!
//! Vertical two-tone gradient with a corner highlight, an offset-shadow
//! white card behind the code, and a centered title/label/subtitle stack.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette};
use crate::draw::{draw_centered_text, fill_rounded_rect, glow_ellipse, linear_gradient, Axis};
use crate::error::PlacardError;

pub struct ModernGradient;

impl Template for ModernGradient {
    fn id(&self) -> u32 {
        1
    }

    fn name(&self) -> &str {
        "Modern Gradient"
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
        let card_w = qw + 180;
        let card_h = qh + 300;
        let color = parse_hex(&text.color)?;

        let mut card = linear_gradient(card_w, card_h, palette[0], palette[1], Axis::Vertical);

        // Soft highlight ellipse spilling off the top-right corner.
        glow_ellipse(&mut card, i64::from(card_w) - 60, 60, 140, 140, [255, 255, 255], 25, 0.0);

        let pad = 30u32;
        let qr_x = i64::from((card_w - qw) / 2);
        let qr_y = 100i64;

        fill_rounded_rect(
            &mut card,
            qr_x - i64::from(pad) + 12,
            qr_y - i64::from(pad) + 12,
            qw + 2 * pad,
            qh + 2 * pad,
            25,
            Rgba([0, 0, 0, 80]),
        );
        fill_rounded_rect(
            &mut card,
            qr_x - i64::from(pad),
            qr_y - i64::from(pad),
            qw + 2 * pad,
            qh + 2 * pad,
            25,
            Rgba([255, 255, 255, 255]),
        );

        paste_code(&mut card, code, qr_x, qr_y);
        add_logo(&mut card, logo, qr_x, qr_y, code, 140);

        let center = i64::from(card_w) / 2;
        draw_centered_text(&mut card, &text.title, text.title_size, center, 30, color);

        let name_y = qr_y + i64::from(qh) + i64::from(pad) + 40;
        draw_centered_text(&mut card, label, text.name_size, center, name_y, color);
        draw_centered_text(&mut card, &text.subtitle, text.subtitle_size, center, name_y + 40, color);

        Ok(card)
    }
}

//! # Aurora Glow
//!
//! Dark night base with three stacked blurred color glows, a translucent
//! panel floating over them, and left-anchored text.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{add_logo, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette};
use crate::draw::{draw_text, drop_shadow, fill_rounded_rect, glow_ellipse, Shadow};
use crate::error::PlacardError;

pub struct AuroraGlow;

impl Template for AuroraGlow {
    fn id(&self) -> u32 {
        6
    }

    fn name(&self) -> &str {
        "Aurora Glow"
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
        let card_w = qw + 260;
        let card_h = qh + 360;
        let color = parse_hex(&text.color)?;

        let mut card = RgbaImage::from_pixel(card_w, card_h, Rgba([8, 10, 28, 255]));

        // Tertiary glow widest and brightest, primary narrowest.
        for (idx, glow) in [palette[2], palette[1], palette[0]].iter().enumerate() {
            let alpha = (150 - idx as i32 * 40).max(30) as u8;
            let padding = idx as i64 * 40;
            let top = 80 + padding;
            let bottom = i64::from(card_h) - 140 - padding;
            let rx = (i64::from(card_w) - 2 * padding) / 2;
            let ry = (bottom - top) / 2;
            glow_ellipse(
                &mut card,
                i64::from(card_w) / 2,
                (top + bottom) / 2,
                rx as i32,
                ry as i32,
                *glow,
                alpha,
                55.0,
            );
        }

        let box_w = qw + 100;
        let box_h = qh + 100;
        let box_x = i64::from((card_w - box_w) / 2);
        let box_y = 120i64;

        drop_shadow(
            &mut card,
            box_x - 25,
            box_y - 25,
            box_w + 50,
            box_h + 50,
            45,
            Shadow { dx: 0, dy: 0, blur: Some(18.0), alpha: 120 },
        );
        fill_rounded_rect(&mut card, box_x, box_y, box_w, box_h, 0, Rgba([18, 18, 40, 235]));
        // Frosted highlight over the panel.
        fill_rounded_rect(&mut card, box_x, box_y, box_w, box_h, 0, Rgba([255, 255, 255, 18]));

        paste_code(&mut card, code, box_x + 50, box_y + 50);
        add_logo(&mut card, logo, box_x + 50, box_y + 50, code, 140);

        draw_text(&mut card, &text.title, text.title_size, 60, 40, color);
        draw_text(&mut card, &text.subtitle, text.subtitle_size, 60, i64::from(card_h) - 140, color);
        draw_text(&mut card, label, text.name_size, 60, i64::from(card_h) - 90, color);

        Ok(card)
    }
}

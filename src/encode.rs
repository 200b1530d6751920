//! # Payload Classification and QR Encoding
//!
//! Wraps the `qrcode` crate behind the small surface the batch worker needs:
//! classify a raw input line, normalize bare hosts to URLs, and expand the
//! encoded module matrix into an RGBA bitmap at a chosen module scale and
//! quiet-zone border.

use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};

use crate::error::PlacardError;

/// Dark module color (matches the card templates' ink).
pub const DARK: Rgba<u8> = Rgba([0x1a, 0x1a, 0x2e, 0xff]);
/// Light module color.
pub const LIGHT: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Recognized payload categories, by literal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Wifi,
    Tel,
    Mailto,
    Url,
    /// Bare host/path with no scheme; normalized to `https://` before encoding.
    Bare,
}

/// Classify a payload line by its literal prefix.
pub fn classify(payload: &str) -> PayloadKind {
    if payload.starts_with("WIFI:") {
        PayloadKind::Wifi
    } else if payload.starts_with("TEL:") {
        PayloadKind::Tel
    } else if payload.starts_with("mailto:") {
        PayloadKind::Mailto
    } else if payload.starts_with("http") {
        PayloadKind::Url
    } else {
        PayloadKind::Bare
    }
}

/// Normalize a payload for encoding.
///
/// Recognized prefixes pass through untouched; anything else is treated as a
/// bare host/path and gets `https://` prepended unless a scheme is already
/// present.
pub fn normalize(payload: &str) -> String {
    match classify(payload) {
        PayloadKind::Bare => {
            if payload.starts_with("http://") || payload.starts_with("https://") {
                payload.to_string()
            } else {
                format!("https://{}", payload)
            }
        }
        _ => payload.to_string(),
    }
}

/// Encode a payload at error correction level H.
///
/// Each module becomes a `scale`x`scale` pixel block, with `border` modules of
/// quiet zone on every side. The result is never scaled afterwards; templates
/// paste it as-is.
pub fn encode(payload: &str, scale: u32, border: u32) -> Result<RgbaImage, PlacardError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| PlacardError::Encode(format!("Cannot encode payload: {}", e)))?;

    let modules = code.width();
    let colors = code.to_colors();
    let size = (modules as u32 + 2 * border) * scale;
    let mut img = RgbaImage::from_pixel(size, size, LIGHT);

    for (idx, color) in colors.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (idx % modules) as u32;
        let my = (idx / modules) as u32;
        let px = (mx + border) * scale;
        let py = (my + border) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(px + dx, py + dy, DARK);
            }
        }
    }

    Ok(img)
}

//! # Palette Extraction
//!
//! Derives a 3-color card palette from a logo image. With the `color-thief`
//! feature enabled the quantizer library does the work; otherwise a
//! frequency-count fallback picks the most common distinct colors. Either way
//! the result has exactly three entries, and any failure to read or decode
//! the image yields the neutral default palette instead of an error.

use std::collections::HashMap;
use std::path::Path;

use image::imageops::FilterType;

use crate::color::{channel_distance, darken, Palette, Rgb, DEFAULT_PALETTE};

/// Number of colors extracted; fixed by the palette type.
const K: usize = 3;
/// Sample size the logo is reduced to before counting.
const SAMPLE_SIZE: u32 = 150;
/// Channel threshold above which a pixel counts as near-white.
const WHITE_CUTOFF: u8 = 240;
/// Channel threshold below which a pixel counts as near-black.
const BLACK_CUTOFF: u8 = 20;
/// Minimum summed channel distance between two selected colors.
const MIN_DISTANCE: u32 = 80;
/// Per-channel darkening step used to pad a short selection.
const PAD_STEP: u8 = 40;

/// Extract a 3-color palette from the logo at `path`.
///
/// Never fails: unreadable or undecodable files return [`DEFAULT_PALETTE`].
pub fn extract(path: &Path) -> Palette {
    let Ok(decoded) = image::open(path) else {
        return DEFAULT_PALETTE;
    };

    #[cfg(feature = "color-thief")]
    {
        let rgb = decoded.to_rgb8();
        if let Ok(colors) = color_thief::get_palette(rgb.as_raw(), color_thief::ColorFormat::Rgb, 10, K as u8 + 1)
        {
            let picked: Vec<Rgb> = colors.iter().map(|c| [c.r, c.g, c.b]).collect();
            return pad_to_k(picked);
        }
        // Quantizer rejected the input; fall through to the counting path.
    }

    let sample = decoded
        .resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle)
        .to_rgb8();

    let keep = |p: &Rgb| {
        let near_white = p.iter().all(|&c| c > WHITE_CUTOFF);
        let near_black = p.iter().all(|&c| c < BLACK_CUTOFF);
        !near_white && !near_black
    };

    let all: Vec<Rgb> = sample.pixels().map(|p| p.0).collect();
    let filtered: Vec<Rgb> = all.iter().copied().filter(keep).collect();
    // An image with nothing but near-white/near-black pixels falls back to
    // counting everything, matching the unfiltered-source behavior.
    let counted = if filtered.is_empty() { &all } else { &filtered };

    let mut counts: HashMap<Rgb, u32> = HashMap::new();
    for &px in counted {
        *counts.entry(px).or_insert(0) += 1;
    }
    let mut by_frequency: Vec<(Rgb, u32)> = counts.into_iter().collect();
    // Tie-break on the color value so extraction is deterministic.
    by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut selected: Vec<Rgb> = Vec::with_capacity(K);
    for (color, _) in by_frequency.iter().take(K * 5) {
        let distinct = selected.iter().all(|&s| channel_distance(*color, s) > MIN_DISTANCE);
        if selected.is_empty() || distinct {
            selected.push(*color);
            if selected.len() >= K {
                break;
            }
        }
    }

    pad_to_k(selected)
}

/// Force a selection to exactly `K` entries, darkening the first pick to fill
/// gaps and truncating any excess.
fn pad_to_k(mut selected: Vec<Rgb>) -> Palette {
    if selected.is_empty() {
        return DEFAULT_PALETTE;
    }
    while selected.len() < K {
        let step = PAD_STEP * selected.len() as u8;
        selected.push(darken(selected[0], step));
    }
    [selected[0], selected[1], selected[2]]
}

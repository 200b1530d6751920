//! # Card Templates
//!
//! Each template is a pure render function from `(code bitmap, label,
//! palette, optional logo, text settings)` to a finished card image,
//! implemented as a struct in its own module behind the [`Template`] trait.
//!
//! ## Adding a Template
//!
//! 1. Create `src/template/mytemplate.rs` with a struct implementing
//!    [`Template`]
//! 2. Add `pub mod mytemplate;` below
//! 3. Wire it into [`builtin`] and [`BUILTINS`]
//!
//! Custom templates (id > 8) are rhai scripts resolved at call time; see
//! [`script`].

pub mod aurora;
pub mod glass;
pub mod gradient;
pub mod luxury;
pub mod minimal;
pub mod neon;
pub mod script;
pub mod split;
pub mod spotlight;

use std::path::Path;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::draw::circular_logo;
use crate::error::PlacardError;

pub use script::{validate_script, CustomTemplateDef, ScriptTemplate};

/// All text customization knobs that feed template rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSettings {
    pub title: String,
    pub subtitle: String,
    pub name_prefix: String,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub name_size: f32,
    /// 6-hex-digit text color, with or without a leading `#`.
    pub color: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            title: "VPN Configuration".to_string(),
            subtitle: "Scan to Connect".to_string(),
            name_prefix: "VPN".to_string(),
            title_size: 32.0,
            subtitle_size: 18.0,
            name_size: 24.0,
            color: "#FFFFFF".to_string(),
        }
    }
}

/// Trait for card templates.
///
/// `render` must be a pure function of its arguments: no shared mutable
/// state, so concurrent renders for different records need no locking.
pub trait Template: Send + Sync {
    /// Template id (1-8 built-in, >8 custom).
    fn id(&self) -> u32;

    /// Display name, also used in output filenames.
    fn name(&self) -> &str;

    /// Compose the card for one record.
    fn render(
        &self,
        code: &RgbaImage,
        label: &str,
        palette: &Palette,
        logo: Option<&Path>,
        text: &TextSettings,
    ) -> Result<RgbaImage, PlacardError>;
}

/// Built-in template ids and display names, in menu order.
pub const BUILTINS: &[(u32, &str)] = &[
    (1, "Modern Gradient"),
    (2, "Glassmorphism"),
    (3, "Neon Cyberpunk"),
    (4, "Minimalist"),
    (5, "3D Luxury"),
    (6, "Aurora Glow"),
    (7, "Split Contrast"),
    (8, "Sunrise Spotlight"),
];

/// Get a built-in template by id.
pub fn builtin(id: u32) -> Option<Box<dyn Template>> {
    match id {
        1 => Some(Box::new(gradient::ModernGradient)),
        2 => Some(Box::new(glass::Glassmorphism)),
        3 => Some(Box::new(neon::NeonCyberpunk)),
        4 => Some(Box::new(minimal::Minimalist)),
        5 => Some(Box::new(luxury::Luxury3d)),
        6 => Some(Box::new(aurora::AuroraGlow)),
        7 => Some(Box::new(split::SplitContrast)),
        8 => Some(Box::new(spotlight::SunriseSpotlight)),
        _ => None,
    }
}

/// Resolve a template id against the built-ins and a custom template list.
///
/// An id that matches nothing is a validation error; a matching custom
/// definition becomes a [`ScriptTemplate`] (which itself falls back to
/// built-in 1 if its stored source no longer evaluates).
pub fn resolve(id: u32, customs: &[CustomTemplateDef]) -> Result<Box<dyn Template>, PlacardError> {
    if let Some(template) = builtin(id) {
        return Ok(template);
    }
    customs
        .iter()
        .find(|def| def.id == id)
        .map(|def| Box::new(ScriptTemplate::new(def.clone())) as Box<dyn Template>)
        .ok_or_else(|| PlacardError::Validation(format!("Unknown template id {}", id)))
}

/// Paste the code bitmap unscaled and unrotated at `(x, y)`.
pub(crate) fn paste_code(canvas: &mut RgbaImage, code: &RgbaImage, x: i64, y: i64) {
    imageops::replace(canvas, code, x, y);
}

/// Center the logo (if any) on the pasted code bitmap's geometric center.
pub(crate) fn add_logo(
    canvas: &mut RgbaImage,
    logo: Option<&Path>,
    code_x: i64,
    code_y: i64,
    code: &RgbaImage,
    diameter: u32,
) {
    if let Some(path) = logo {
        circular_logo(
            canvas,
            path,
            code_x + i64::from(code.width()) / 2,
            code_y + i64::from(code.height()) / 2,
            diameter,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_PALETTE;
    use crate::encode;

    #[test]
    fn test_builtin_ids_resolve() {
        for (id, name) in BUILTINS {
            let template = builtin(*id).expect("builtin id must resolve");
            assert_eq!(template.id(), *id);
            assert_eq!(template.name(), *name);
        }
        assert!(builtin(0).is_none());
        assert!(builtin(9).is_none());
    }

    #[test]
    fn test_resolve_unknown_id_is_validation_error() {
        let err = match resolve(42, &[]) {
            Ok(_) => panic!("expected an error for unknown template id"),
            Err(e) => e,
        };
        assert!(matches!(err, PlacardError::Validation(_)));
    }

    #[test]
    fn test_all_builtins_render_pure() {
        let code = encode::encode("https://example.com", 2, 1).unwrap();
        let text = TextSettings::default();
        for (id, _) in BUILTINS {
            let template = builtin(*id).unwrap();
            let first = template
                .render(&code, "VPN 1", &DEFAULT_PALETTE, None, &text)
                .unwrap();
            let second = template
                .render(&code, "VPN 1", &DEFAULT_PALETTE, None, &text)
                .unwrap();
            assert_eq!(
                first.as_raw(),
                second.as_raw(),
                "template {} is not pure",
                id
            );
            // Decoration is additive around the code bitmap.
            assert!(first.width() > code.width());
            assert!(first.height() > code.height());
        }
    }

    #[test]
    fn test_render_with_missing_logo_does_not_fail() {
        let code = encode::encode("https://example.com", 2, 1).unwrap();
        let text = TextSettings::default();
        let template = builtin(1).unwrap();
        let card = template.render(
            &code,
            "VPN 1",
            &DEFAULT_PALETTE,
            Some(Path::new("/no/such/logo.png")),
            &text,
        );
        assert!(card.is_ok());
    }
}

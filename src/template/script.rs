//! # Custom Script Templates
//!
//! User-defined templates are rhai scripts evaluated in a sandboxed engine
//! (operation and depth limits, no I/O). A script must define `fn render(ctx)`
//! where `ctx` carries the code bitmap dimensions, label, palette, and text
//! settings; it returns a *plan* map (margins, background, frame, text
//! placements) that is interpreted through the same drawing primitives the
//! built-in templates use.
//!
//! Validation happens at definition time: a script that fails to compile or
//! does not declare `render/1` is rejected and never stored. At render time,
//! any unexpected failure (e.g. tampered stored source) falls back to
//! built-in template 1 instead of aborting the batch.

use std::path::Path;

use image::{Rgba, RgbaImage};
use rhai::{Array, Dynamic, Engine, Map, Scope};
use serde::{Deserialize, Serialize};

use super::{add_logo, gradient::ModernGradient, paste_code, Template, TextSettings};
use crate::color::{parse_hex, Palette, Rgb};
use crate::draw::{
    diagonal_gradient, draw_centered_text, draw_text, fill_rounded_rect, linear_gradient, Axis,
};
use crate::error::PlacardError;

/// The function name every custom template script must define.
pub const ENTRY_FN: &str = "render";

/// A stored custom template record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomTemplateDef {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub code: String,
}

/// Sandboxed engine shared by validation and rendering.
fn sandbox() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_expr_depths(50, 50);
    engine.set_max_operations(100_000);
    engine.set_max_string_size(100_000);
    engine
}

/// Validate custom template source: it must compile and declare
/// `fn render(ctx)` with exactly one parameter.
pub fn validate_script(code: &str) -> Result<(), PlacardError> {
    let engine = sandbox();
    let ast = engine
        .compile(code)
        .map_err(|e| PlacardError::Script(format!("Invalid template code: {}", e)))?;
    let declares_render = ast
        .iter_functions()
        .any(|f| f.name == ENTRY_FN && f.params.len() == 1);
    if declares_render {
        Ok(())
    } else {
        Err(PlacardError::Script(format!(
            "Template code must define `fn {}(ctx)`",
            ENTRY_FN
        )))
    }
}

/// A custom template backed by stored rhai source.
pub struct ScriptTemplate {
    def: CustomTemplateDef,
}

impl ScriptTemplate {
    pub fn new(def: CustomTemplateDef) -> Self {
        Self { def }
    }

    fn try_script(
        &self,
        code: &RgbaImage,
        label: &str,
        palette: &Palette,
        logo: Option<&Path>,
        text: &TextSettings,
    ) -> Result<RgbaImage, PlacardError> {
        let engine = sandbox();
        let ast = engine
            .compile(&self.def.code)
            .map_err(|e| PlacardError::Script(format!("Compile error: {}", e)))?;

        let ctx = build_context(code, label, palette, text);
        let mut scope = Scope::new();
        let result: Dynamic = engine
            .call_fn(&mut scope, &ast, ENTRY_FN, (ctx,))
            .map_err(|e| PlacardError::Script(format!("Eval error: {}", e)))?;
        let plan = result
            .try_cast::<Map>()
            .ok_or_else(|| PlacardError::Script(format!("`{}` must return a map", ENTRY_FN)))?;

        interpret_plan(&plan, code, label, palette, logo, text)
    }
}

impl Template for ScriptTemplate {
    fn id(&self) -> u32 {
        self.def.id
    }

    fn name(&self) -> &str {
        &self.def.name
    }

    fn render(
        &self,
        code: &RgbaImage,
        label: &str,
        palette: &Palette,
        logo: Option<&Path>,
        text: &TextSettings,
    ) -> Result<RgbaImage, PlacardError> {
        match self.try_script(code, label, palette, logo, text) {
            Ok(card) => Ok(card),
            // A stored script that no longer evaluates must not kill the
            // whole batch; render with the default template instead.
            Err(_) => ModernGradient.render(code, label, palette, logo, text),
        }
    }
}

fn rgb_array(color: Rgb) -> Array {
    color.iter().map(|&c| Dynamic::from(i64::from(c))).collect()
}

fn build_context(code: &RgbaImage, label: &str, palette: &Palette, text: &TextSettings) -> Map {
    let mut ctx = Map::new();
    ctx.insert("code_width".into(), Dynamic::from(i64::from(code.width())));
    ctx.insert("code_height".into(), Dynamic::from(i64::from(code.height())));
    ctx.insert("label".into(), Dynamic::from(label.to_string()));
    let palette_arr: Array = palette.iter().map(|&c| Dynamic::from(rgb_array(c))).collect();
    ctx.insert("palette".into(), Dynamic::from(palette_arr));
    ctx.insert("title".into(), Dynamic::from(text.title.clone()));
    ctx.insert("subtitle".into(), Dynamic::from(text.subtitle.clone()));
    ctx.insert("title_size".into(), Dynamic::from(f64::from(text.title_size)));
    ctx.insert("subtitle_size".into(), Dynamic::from(f64::from(text.subtitle_size)));
    ctx.insert("name_size".into(), Dynamic::from(f64::from(text.name_size)));
    ctx
}

fn get_int(map: &Map, key: &str) -> Option<i64> {
    map.get(key).and_then(|v| v.as_int().ok())
}

fn get_number(map: &Map, key: &str) -> Option<f32> {
    let value = map.get(key)?;
    value
        .as_float()
        .ok()
        .map(|f| f as f32)
        .or_else(|| value.as_int().ok().map(|i| i as f32))
}

fn get_str(map: &Map, key: &str) -> Option<String> {
    map.get(key).cloned().and_then(|v| v.try_cast::<String>())
}

fn dynamic_rgb(value: &Dynamic) -> Option<Rgb> {
    let arr = value.clone().try_cast::<Array>()?;
    if arr.len() != 3 {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, item) in rgb.iter_mut().zip(arr.iter()) {
        *slot = item.as_int().ok()?.clamp(0, 255) as u8;
    }
    Some(rgb)
}

/// Turn a plan map into a card using the shared drawing primitives.
fn interpret_plan(
    plan: &Map,
    code: &RgbaImage,
    label: &str,
    palette: &Palette,
    logo: Option<&Path>,
    text: &TextSettings,
) -> Result<RgbaImage, PlacardError> {
    let (qw, qh) = code.dimensions();
    let margin_x = get_int(plan, "margin_x").unwrap_or(100).clamp(0, 2000) as u32;
    let margin_y = get_int(plan, "margin_y").unwrap_or(150).clamp(0, 2000) as u32;
    let card_w = qw + margin_x;
    let card_h = qh + margin_y;

    let color_a = plan.get("color_a").and_then(dynamic_rgb).unwrap_or(palette[0]);
    let color_b = plan.get("color_b").and_then(dynamic_rgb).unwrap_or(palette[1]);

    let mut card = match get_str(plan, "background").as_deref() {
        Some("flat") => RgbaImage::from_pixel(card_w, card_h, Rgba([color_a[0], color_a[1], color_a[2], 255])),
        Some("horizontal") => linear_gradient(card_w, card_h, color_a, color_b, Axis::Horizontal),
        Some("diagonal") => diagonal_gradient(card_w, card_h, color_a, color_b),
        _ => linear_gradient(card_w, card_h, color_a, color_b, Axis::Vertical),
    };

    let qr_x = i64::from((card_w - qw) / 2);
    let qr_y = get_int(plan, "code_y").unwrap_or(i64::from(margin_y) / 3).max(0);

    if let Some("card") = get_str(plan, "frame").as_deref() {
        let pad = get_int(plan, "frame_padding").unwrap_or(20).clamp(0, 200) as u32;
        let radius = get_int(plan, "frame_radius").unwrap_or(15).clamp(0, 100) as u32;
        fill_rounded_rect(
            &mut card,
            qr_x - i64::from(pad),
            qr_y - i64::from(pad),
            qw + 2 * pad,
            qh + 2 * pad,
            radius,
            Rgba([255, 255, 255, 255]),
        );
    }

    paste_code(&mut card, code, qr_x, qr_y);
    if plan.get("logo").map_or(true, |v| v.as_bool().unwrap_or(true)) {
        add_logo(&mut card, logo, qr_x, qr_y, code, 120);
    }

    let text_color = parse_hex(&text.color)?;
    if let Some(entries) = plan.get("texts").cloned().and_then(|v| v.try_cast::<Array>()) {
        for entry in entries {
            let Some(spec) = entry.try_cast::<Map>() else {
                continue;
            };
            let Some(content) = get_str(&spec, "text") else {
                continue;
            };
            let size = get_number(&spec, "size").unwrap_or(text.name_size);
            let y = get_int(&spec, "y").unwrap_or(10);
            let color = spec.get("color").and_then(dynamic_rgb).unwrap_or(text_color);
            if spec.get("center").map_or(true, |v| v.as_bool().unwrap_or(true)) {
                draw_centered_text(&mut card, &content, size, i64::from(card_w) / 2, y, color);
            } else {
                let x = get_int(&spec, "x").unwrap_or(30);
                draw_text(&mut card, &content, size, x, y, color);
            }
        }
    } else {
        // No explicit placements: title up top, label under the code.
        draw_centered_text(&mut card, &text.title, text.title_size, i64::from(card_w) / 2, 10, text_color);
        draw_centered_text(
            &mut card,
            label,
            text.name_size,
            i64::from(card_w) / 2,
            qr_y + i64::from(qh) + 20,
            text_color,
        );
    }

    Ok(card)
}

//! # Persisted JSON Documents
//!
//! Small helper around the JSON files the generator keeps next to its data
//! directory: run history, custom templates, and saved presets. Loads are
//! forgiving — a missing or corrupt file yields an empty default — while
//! saves propagate I/O errors to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::error::PlacardError;
use crate::template::{CustomTemplateDef, TextSettings};

/// File names for the persisted documents.
pub const HISTORY_FILE: &str = "qr_generator_history.json";
pub const TEMPLATES_FILE: &str = "custom_templates.json";
pub const PRESETS_FILE: &str = "qr_presets.json";

/// One completed (or attempted) batch run. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub date: String,
    pub template: String,
    pub count: usize,
    pub output_dir: String,
}

/// A named snapshot of generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub template_id: u32,
    pub palette: Palette,
    pub text: TextSettings,
    pub scale: u32,
    pub border: u32,
    pub format: String,
}

/// JSON document store rooted at a base directory.
pub struct Store {
    base_dir: PathBuf,
}

impl Store {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn load_json<T: for<'de> Deserialize<'de> + Default>(&self, file: &str) -> T {
        let path = self.base_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    fn save_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), PlacardError> {
        fs::create_dir_all(&self.base_dir)?;
        let raw = serde_json::to_string_pretty(value)
            .map_err(|e| PlacardError::Validation(format!("Cannot serialize {}: {}", file, e)))?;
        fs::write(self.base_dir.join(file), raw)?;
        Ok(())
    }

    // History -----------------------------------------------------------

    pub fn load_history(&self) -> Vec<HistoryRecord> {
        self.load_json(HISTORY_FILE)
    }

    pub fn append_history(&self, record: HistoryRecord) -> Result<(), PlacardError> {
        let mut history = self.load_history();
        history.push(record);
        self.save_json(HISTORY_FILE, &history)
    }

    // Custom templates --------------------------------------------------

    pub fn load_templates(&self) -> Vec<CustomTemplateDef> {
        self.load_json(TEMPLATES_FILE)
    }

    pub fn save_templates(&self, templates: &[CustomTemplateDef]) -> Result<(), PlacardError> {
        self.save_json(TEMPLATES_FILE, &templates)
    }

    /// Validate and store a new custom template; returns its allocated id.
    ///
    /// Ids continue above the built-in range: `max(existing, 8) + 1`.
    pub fn add_template(
        &self,
        name: &str,
        description: &str,
        code: &str,
    ) -> Result<u32, PlacardError> {
        crate::template::validate_script(code)?;
        let mut templates = self.load_templates();
        let id = templates.iter().map(|t| t.id).max().unwrap_or(8).max(8) + 1;
        templates.push(CustomTemplateDef {
            id,
            name: name.to_string(),
            description: description.to_string(),
            code: code.to_string(),
        });
        self.save_templates(&templates)?;
        Ok(id)
    }

    /// Update an existing custom template in place. Built-in ids are refused.
    pub fn edit_template(
        &self,
        id: u32,
        name: &str,
        description: &str,
        code: &str,
    ) -> Result<(), PlacardError> {
        if id <= 8 {
            return Err(PlacardError::Validation(
                "Built-in templates cannot be edited".to_string(),
            ));
        }
        crate::template::validate_script(code)?;
        let mut templates = self.load_templates();
        let entry = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlacardError::Validation(format!("Template {} not found", id)))?;
        entry.name = name.to_string();
        entry.description = description.to_string();
        entry.code = code.to_string();
        self.save_templates(&templates)
    }

    // Presets -----------------------------------------------------------

    pub fn load_presets(&self) -> Vec<Preset> {
        self.load_json(PRESETS_FILE)
    }

    pub fn save_presets(&self, presets: &[Preset]) -> Result<(), PlacardError> {
        self.save_json(PRESETS_FILE, &presets)
    }
}

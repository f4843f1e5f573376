//! Runtime configuration.
//!
//! Loads settings from config.json at startup. Every field has a default so
//! a partial file (or none at all) is fine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::ocr::TesseractOptions;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<ExtractorConfig> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tesseract executable; searched for when unset
    pub tesseract_path: Option<PathBuf>,
    /// Directory holding `<language>.traineddata`; searched for when unset
    pub tessdata_dir: Option<PathBuf>,
    /// Tesseract language
    pub language: String,
    /// Resolution hint passed to Tesseract
    pub dpi: u32,
    /// Tesseract page segmentation mode (`--psm`)
    pub page_segmentation_mode: u8,
    /// Worker threads; 0 uses the available parallelism
    pub workers: usize,
    /// JSON layout replacing the built-in one
    pub layout_path: Option<PathBuf>,
    /// Output column renames, keyed by internal field name
    pub column_aliases: HashMap<String, String>,
    /// Goalie CSV file name, written into the input directory
    pub goalies_csv: String,
    /// Skater CSV file name, written into the input directory
    pub skaters_csv: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let tesseract = TesseractOptions::default();
        Self {
            tesseract_path: None,
            tessdata_dir: None,
            language: tesseract.language,
            dpi: tesseract.dpi,
            page_segmentation_mode: tesseract.page_segmentation_mode,
            workers: 0,
            layout_path: None,
            column_aliases: HashMap::new(),
            goalies_csv: "goalies.csv".to_string(),
            skaters_csv: "skaters.csv".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn tesseract_options(&self) -> TesseractOptions {
        TesseractOptions {
            language: self.language.clone(),
            page_segmentation_mode: self.page_segmentation_mode,
            dpi: self.dpi,
        }
    }

    /// Worker count with 0 resolved to the available parallelism.
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Default location: config.json next to the executable.
pub fn default_config_path() -> PathBuf {
    crate::paths::get_exe_dir().join("config.json")
}

/// Loads configuration from `path` or returns defaults.
pub fn load_config(path: &Path) -> ExtractorConfig {
    crate::log(&format!("Looking for config at: {}", path.display()));

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse {}: {}. Using defaults.",
                        path.display(),
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
            }
        }
    } else {
        crate::log("Config file not found. Using default config.");
    }

    ExtractorConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config(config: ExtractorConfig) {
    let _ = CONFIG.set(config);
}

/// Returns the global configuration, or defaults if it was never set.
pub fn get_config() -> &'static ExtractorConfig {
    CONFIG.get_or_init(ExtractorConfig::default)
}

use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::crop_rect;
use crate::layout::{PixelRect, RecognitionMode};

/// Text recognition over one rectangle of a card image.
///
/// The character-class restriction is part of every call, so an
/// implementation never depends on state left behind by a previous read.
pub trait Recognizer {
    /// Returns the cleaned text found inside `rect`.
    fn recognize(&self, image: &RgbaImage, rect: PixelRect, mode: RecognitionMode)
        -> Result<String>;
}

/// Settings passed to every Tesseract invocation.
#[derive(Clone, Debug)]
pub struct TesseractOptions {
    pub language: String,
    pub page_segmentation_mode: u8,
    pub dpi: u32,
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: 3,
            dpi: 70,
        }
    }
}

/// Runs the Tesseract executable once per read.
///
/// Each read is a separate process with its own whitelist argument, so a
/// value of this type can be cloned freely; the batch runner still hands one
/// instance to each worker.
#[derive(Clone, Debug)]
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: PathBuf,
    options: TesseractOptions,
}

impl TesseractEngine {
    pub fn new(executable: PathBuf, tessdata: PathBuf, options: TesseractOptions) -> Self {
        Self {
            executable,
            tessdata,
            options,
        }
    }

    fn build_command(&self, input: &std::path::Path, mode: RecognitionMode) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg(input)
            .arg("stdout")
            .arg("--tessdata-dir")
            .arg(&self.tessdata)
            .arg("-l")
            .arg(&self.options.language)
            .arg("--psm")
            .arg(self.options.page_segmentation_mode.to_string())
            .arg("--dpi")
            .arg(self.options.dpi.to_string());

        if let Some(whitelist) = mode.whitelist() {
            command
                .arg("-c")
                .arg(format!("tessedit_char_whitelist={}", whitelist));
        }

        command
    }
}

impl Recognizer for TesseractEngine {
    fn recognize(
        &self,
        image: &RgbaImage,
        rect: PixelRect,
        mode: RecognitionMode,
    ) -> Result<String> {
        let region = crop_rect(image, rect);

        let temp_input = NamedTempFile::with_suffix(".png")?;
        region
            .save(temp_input.path())
            .context("Failed to write OCR input image")?;

        let output = self
            .build_command(temp_input.path(), mode)
            .output()
            .with_context(|| format!("Failed to run {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr.trim()));
        }

        Ok(clean_text(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Drops line breaks and surrounding whitespace from raw recognizer output.
pub fn clean_text(raw: &str) -> String {
    raw.replace(['\r', '\n'], "").trim().to_string()
}

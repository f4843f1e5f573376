//! Scripted recognizer used by the extraction and batch tests.

use anyhow::{anyhow, Result};
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::layout::{Bound, PixelRect, RecognitionMode};
use crate::ocr::Recognizer;

/// Answers each read from a rect -> text table. Unknown rects read as empty.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    responses: HashMap<PixelRect, String>,
    failing: Option<PixelRect>,
    calls: AtomicUsize,
    modes: Mutex<Vec<(PixelRect, RecognitionMode)>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, bound: &Bound, text: &str) -> Self {
        self.responses.insert(bound.rect, text.to_string());
        self
    }

    pub fn failing_on(mut self, bound: &Bound) -> Self {
        self.failing = Some(bound.rect);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn mode_for(&self, bound: &Bound) -> Option<RecognitionMode> {
        self.modes
            .lock()
            .unwrap()
            .iter()
            .find(|(rect, _)| *rect == bound.rect)
            .map(|(_, mode)| *mode)
    }
}

impl Recognizer for ScriptedRecognizer {
    fn recognize(
        &self,
        _image: &RgbaImage,
        rect: PixelRect,
        mode: RecognitionMode,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push((rect, mode));

        if self.failing == Some(rect) {
            return Err(anyhow!("scripted failure"));
        }
        Ok(self.responses.get(&rect).cloned().unwrap_or_default())
    }
}

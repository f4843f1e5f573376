//! Bound primitives: a named pixel rectangle plus the recognition mode
//! used to read it.

use serde::{Deserialize, Serialize};

/// Width of a numeric stat cell, anchored at its top-left corner.
pub const NUMERIC_WIDTH: u32 = 40;
/// Height of a numeric stat cell.
pub const NUMERIC_HEIGHT: u32 = 30;

/// Character-class restriction applied to a single read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionMode {
    Text,
    Numeric,
    Height,
    Any,
}

impl RecognitionMode {
    /// Characters the recognizer may emit in this mode.
    /// `None` means unrestricted.
    pub fn whitelist(self) -> Option<&'static str> {
        match self {
            RecognitionMode::Text => Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ- "),
            RecognitionMode::Numeric | RecognitionMode::Height => Some("0123456789"),
            RecognitionMode::Any => None,
        }
    }
}

/// A rectangle in absolute pixel coordinates, `(x0, y0)` inclusive and
/// `(x1, y1)` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// A named field location on the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    pub category: String,
    pub mode: RecognitionMode,
    pub rect: PixelRect,
}

impl Bound {
    fn new(category: &str, mode: RecognitionMode, rect: PixelRect) -> Self {
        Self {
            category: category.to_string(),
            mode,
            rect,
        }
    }

    /// Fixed-size numeric cell anchored at `(x, y)`.
    pub fn numeric(category: &str, x: u32, y: u32) -> Self {
        Self::new(
            category,
            RecognitionMode::Numeric,
            PixelRect::new(x, y, x + NUMERIC_WIDTH, y + NUMERIC_HEIGHT),
        )
    }

    /// Numeric read over an explicit rectangle.
    pub fn numeric_rect(category: &str, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(category, RecognitionMode::Numeric, PixelRect::new(x0, y0, x1, y1))
    }

    pub fn text(category: &str, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(category, RecognitionMode::Text, PixelRect::new(x0, y0, x1, y1))
    }

    pub fn height(category: &str, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(category, RecognitionMode::Height, PixelRect::new(x0, y0, x1, y1))
    }

    pub fn any(category: &str, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self::new(category, RecognitionMode::Any, PixelRect::new(x0, y0, x1, y1))
    }
}

//! Card layout: where every field lives on a captured card and how to read it.

pub mod bounds;
pub mod catalog;

pub use bounds::{Bound, PixelRect, RecognitionMode};
pub use catalog::{CardType, Layout, GOALIE_PROBE_TEXT};

pub mod engine;
pub mod preprocess;
pub mod setup;

pub use engine::{Recognizer, TesseractEngine, TesseractOptions};
pub use preprocess::load_card_image;
pub use setup::ensure_tesseract;

use anyhow::{Context, Result};
use image::{imageops, RgbaImage};
use std::path::Path;

use crate::layout::PixelRect;

/// Loads a card capture and inverts its colors.
///
/// The game renders light text on a dark tile; Tesseract reads the
/// inverted (dark on light) version far more reliably. Alpha is untouched.
pub fn load_card_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("Could not read \"{}\" as image", path.display()))?;
    Ok(invert_colors(img.to_rgba8()))
}

/// Inverts the RGB channels of an image in place.
pub fn invert_colors(mut img: RgbaImage) -> RgbaImage {
    imageops::invert(&mut img);
    img
}

/// Crops a sub-region from an image using absolute pixel coordinates.
///
/// The rectangle is clamped to the image bounds.
pub fn crop_rect(img: &RgbaImage, rect: PixelRect) -> RgbaImage {
    let (w, h) = img.dimensions();

    let x0 = rect.x0.min(w);
    let y0 = rect.y0.min(h);
    let rw = rect.width().min(w - x0);
    let rh = rect.height().min(h - y0);

    imageops::crop_imm(img, x0, y0, rw, rh).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_crop_rect() {
        // 100x200 image
        let img = RgbaImage::from_fn(100, 200, |x, y| Rgba([x as u8, y as u8, 0, 255]));

        let cropped = crop_rect(&img, PixelRect::new(10, 50, 60, 70));

        assert_eq!(cropped.dimensions(), (50, 20));
        // Top-left pixel should be (10, 50) from original
        assert_eq!(cropped.get_pixel(0, 0)[0], 10);
        assert_eq!(cropped.get_pixel(0, 0)[1], 50);
    }

    #[test]
    fn test_crop_rect_clamps() {
        let img = RgbaImage::new(100, 100);
        let cropped = crop_rect(&img, PixelRect::new(90, 90, 140, 140));

        // Should clamp to 10x10 (remaining pixels)
        assert_eq!(cropped.dimensions(), (10, 10));
    }

    #[test]
    fn test_invert_colors_keeps_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([200, 100, 50, 128]));

        let inverted = invert_colors(img);

        assert_eq!(inverted.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(inverted.get_pixel(1, 0).0, [55, 155, 205, 128]);
    }

    #[test]
    fn test_load_card_image_inverts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("card.png");
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_card_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(0, 0).0, [245, 235, 225, 255]);
    }

    #[test]
    fn test_load_card_image_rejects_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(load_card_image(&path).is_err());
    }
}

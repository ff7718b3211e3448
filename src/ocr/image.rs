//! Image decoding, OCR preprocessing, and thumbnail generation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::constants::{OCR_MIN_WIDTH, THUMBNAIL_JPEG_QUALITY, THUMBNAIL_MAX_WIDTH};

/// Decodes image bytes into a pixel buffer, guessing the format.
///
/// # Errors
///
/// Returns an `image::ImageError` when the bytes are not a decodable image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, image::ImageError> {
    image::load_from_memory(bytes)
}

/// Upscales small images so the OCR engine has enough pixels to work with.
///
/// Images at least `OCR_MIN_WIDTH` wide pass through unchanged; narrower
/// images are scaled by an integer factor of at least 2.
pub fn upscale_for_ocr(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w >= OCR_MIN_WIDTH {
        return img.clone();
    }
    let scale = (OCR_MIN_WIDTH / w).max(2);
    img.resize_exact(w * scale, h * scale, FilterType::Lanczos3)
}

/// Encodes a small JPEG preview of the image as a base64 data URI.
///
/// The preview is at most `THUMBNAIL_MAX_WIDTH` pixels wide, aspect ratio
/// preserved, suitable for inlining into a streamed event.
///
/// # Errors
///
/// Returns an `image::ImageError` if JPEG encoding fails.
pub fn thumbnail_data_uri(img: &DynamicImage) -> Result<String, image::ImageError> {
    let (w, h) = (img.width(), img.height());
    let thumb = if w > THUMBNAIL_MAX_WIDTH {
        let scaled_h = ((h as u64 * THUMBNAIL_MAX_WIDTH as u64) / w as u64).max(1) as u32;
        img.resize_exact(THUMBNAIL_MAX_WIDTH, scaled_h, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, THUMBNAIL_JPEG_QUALITY);
    // JPEG has no alpha channel; flatten before encoding.
    thumb.to_rgb8().write_with_encoder(encoder)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&buf)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([120, 30, 200])))
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"definitely not an image").is_err());
    }

    #[test]
    fn test_decode_roundtrip_png() {
        let mut buf = std::io::Cursor::new(Vec::new());
        solid_image(10, 6)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode png");
        let decoded = decode(buf.get_ref()).expect("decode png");
        assert_eq!((decoded.width(), decoded.height()), (10, 6));
    }

    #[test]
    fn test_upscale_small_image() {
        let scaled = upscale_for_ocr(&solid_image(100, 40));
        // 800 / 100 = 8x
        assert_eq!((scaled.width(), scaled.height()), (800, 320));
    }

    #[test]
    fn test_upscale_minimum_factor_is_two() {
        let scaled = upscale_for_ocr(&solid_image(700, 100));
        assert_eq!((scaled.width(), scaled.height()), (1400, 200));
    }

    #[test]
    fn test_upscale_leaves_large_images_alone() {
        let scaled = upscale_for_ocr(&solid_image(1200, 400));
        assert_eq!((scaled.width(), scaled.height()), (1200, 400));
    }

    #[test]
    fn test_thumbnail_caps_width() {
        let uri = thumbnail_data_uri(&solid_image(1000, 500)).expect("thumbnail");
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let encoded = uri.trim_start_matches("data:image/jpeg;base64,");
        let jpeg = STANDARD.decode(encoded).expect("valid base64");
        let thumb = decode(&jpeg).expect("decodable thumbnail");
        assert_eq!((thumb.width(), thumb.height()), (200, 100));
    }

    #[test]
    fn test_thumbnail_keeps_small_images_unscaled() {
        let uri = thumbnail_data_uri(&solid_image(64, 64)).expect("thumbnail");
        let encoded = uri.trim_start_matches("data:image/jpeg;base64,");
        let thumb = decode(&STANDARD.decode(encoded).expect("valid base64")).expect("decodable");
        assert_eq!((thumb.width(), thumb.height()), (64, 64));
    }
}

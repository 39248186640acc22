//! # Image Dimension Probing
//!
//! Resolves a logo reference (file path, data URI, or raw base64) to raw
//! bytes and native pixel dimensions without decoding pixel data.
//!
//! A probe failure is an explicit [`Error::Image`]; callers skip the logo
//! block instead of working with zeroed dimensions, so a scale factor can
//! never divide by zero.

use std::io::Cursor;

use crate::error::{Error, Result};

/// Native pixel dimensions of an image source. Both components are
/// guaranteed non-zero by [`probe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Probe the native pixel dimensions of an image source.
pub fn probe(src: &str) -> Result<Dimensions> {
    let bytes = read_source_bytes(src)?;
    dimensions_of(&bytes)
}

/// Resolve an image source string to raw bytes.
///
/// Supported forms:
/// - `data:image/...;base64,...` data URI
/// - a file path (explicit prefix or a known image extension)
/// - raw base64-encoded image data
pub fn read_source_bytes(src: &str) -> Result<Vec<u8>> {
    if src.starts_with("data:image/") {
        let comma = src
            .find(',')
            .ok_or_else(|| Error::Image("invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma + 1..]);
    }

    // Bare base64 contains '/' too, so only treat strings with an explicit
    // path prefix or an image extension as file paths.
    if looks_like_path(src) {
        return std::fs::read(src)
            .map_err(|e| Error::Image(format!("failed to read image file '{src}': {e}")));
    }

    base64_decode(src)
}

fn looks_like_path(src: &str) -> bool {
    src.starts_with('/')
        || src.starts_with("./")
        || src.starts_with("../")
        || src.ends_with(".png")
        || src.ends_with(".jpg")
        || src.ends_with(".jpeg")
}

fn base64_decode(input: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|e| Error::Image(format!("base64 decode error: {e}")))
}

/// Read dimensions from in-memory image bytes without a full decode.
pub fn dimensions_of(bytes: &[u8]) -> Result<Dimensions> {
    let reader = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::Image(format!("image format detection error: {e}")))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::Image(format!("failed to read image dimensions: {e}")))?;

    if width == 0 || height == 0 {
        return Err(Error::Image("image reports a zero dimension".to_string()));
    }

    Ok(Dimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            width,
            height,
            image::ColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn probes_png_dimensions() {
        let dims = dimensions_of(&encode_png(4, 3)).unwrap();
        assert_eq!(dims, Dimensions { width: 4, height: 3 });
    }

    #[test]
    fn probes_base64_data_uri() {
        use base64::Engine;
        let b64 = base64::engine::general_purpose::STANDARD.encode(encode_png(2, 1));
        let dims = probe(&format!("data:image/png;base64,{b64}")).unwrap();
        assert_eq!(dims, Dimensions { width: 2, height: 1 });
    }

    #[test]
    fn data_uri_without_comma_is_rejected() {
        assert!(probe("data:image/png;base64").is_err());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(dimensions_of(&[0x00, 0x01, 0x02, 0x03, 0x04]).is_err());
    }

    #[test]
    fn missing_file_is_an_explicit_error() {
        let err = probe("./no-such-logo.png").unwrap_err();
        assert!(err.to_string().contains("no-such-logo.png"));
    }

    #[test]
    fn bare_filename_with_image_extension_reads_from_disk() {
        // "gopher.png" style references have no path prefix but are still
        // file paths, not base64.
        assert!(looks_like_path("gopher.png"));
        assert!(!looks_like_path("iVBORw0KGgo="));
    }
}

//! Evidence photo compression.
//!
//! Camera shots are shrunk to fit 500x500 and re-encoded as low-quality
//! JPEG before storage, then kept as base64 text next to the log row.
//!
//! # See also
//! - `service::checklist_service::ChecklistService::history` for the
//!   supervisor view that reads the stored evidence back.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use crate::model::cleaning_log::CleaningLog;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const MAX_EDGE_PX: u32 = 500;
const JPEG_QUALITY: u8 = 50;

#[derive(Debug)]
pub enum PhotoError {
    Decode(image::ImageError),
    Encode(image::ImageError),
    Base64(base64::DecodeError),
    Io(std::io::Error),
}

impl Display for PhotoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "cannot read photo: {err}"),
            Self::Encode(err) => write!(f, "cannot encode photo: {err}"),
            Self::Base64(err) => write!(f, "stored photo is not valid base64: {err}"),
            Self::Io(err) => write!(f, "cannot write photo: {err}"),
        }
    }
}

impl Error for PhotoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::Base64(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

/// Compresses raw image bytes into base64 JPEG text.
///
/// Empty input means "no photo" and yields an empty string. Images already
/// within the bounds are re-encoded but never enlarged.
pub fn compress_photo(raw: &[u8]) -> Result<String, PhotoError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let decoded = image::load_from_memory(raw).map_err(PhotoError::Decode)?;
    let mut rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    if rgb.width() > MAX_EDGE_PX || rgb.height() > MAX_EDGE_PX {
        rgb = rgb.thumbnail(MAX_EDGE_PX, MAX_EDGE_PX);
    }
    let rgb = rgb.to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(PhotoError::Encode)?;

    Ok(B64.encode(jpeg))
}

/// Wraps stored base64 JPEG text as an inline `data:` URI.
pub fn to_data_uri(encoded: &str) -> Option<String> {
    if encoded.is_empty() {
        None
    } else {
        Some(format!("data:image/jpeg;base64,{encoded}"))
    }
}

/// Decodes stored base64 text back into JPEG bytes.
pub fn decode_photo(encoded: &str) -> Result<Vec<u8>, PhotoError> {
    B64.decode(encoded.trim()).map_err(PhotoError::Base64)
}

/// Writes a log's evidence as `<uuid>_before.jpg` and `<uuid>_after.jpg`.
///
/// Empty photo columns are skipped. Returns the files written, before first.
pub fn save_log_photos(log: &CleaningLog, dir: &Path) -> Result<Vec<PathBuf>, PhotoError> {
    std::fs::create_dir_all(dir).map_err(PhotoError::Io)?;

    let mut written = Vec::new();
    for (side, encoded) in [("before", &log.photo_before), ("after", &log.photo_after)] {
        if encoded.is_empty() {
            continue;
        }
        let path = dir.join(format!("{}_{side}.jpg", log.uuid));
        std::fs::write(&path, decode_photo(encoded)?).map_err(PhotoError::Io)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::{compress_photo, decode_photo, to_data_uri, PhotoError};
    use base64::engine::general_purpose::STANDARD as B64;
    use base64::Engine;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn decode(encoded: &str) -> DynamicImage {
        let bytes = B64.decode(encoded).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn large_photo_is_shrunk_to_fit_bounds_keeping_aspect() {
        let encoded = compress_photo(&png_bytes(1000, 600)).unwrap();
        let image = decode(&encoded);
        assert_eq!(image.width(), 500);
        assert!(image.height() <= 300 && image.height() >= 299);
    }

    #[test]
    fn small_photo_is_not_enlarged() {
        let encoded = compress_photo(&png_bytes(120, 80)).unwrap();
        let image = decode(&encoded);
        assert_eq!((image.width(), image.height()), (120, 80));
    }

    #[test]
    fn empty_input_means_no_photo() {
        assert_eq!(compress_photo(&[]).unwrap(), "");
        assert_eq!(to_data_uri(""), None);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = compress_photo(b"not an image").unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));
    }

    #[test]
    fn decode_rejects_corrupt_text() {
        assert!(matches!(
            decode_photo("not base64!"),
            Err(PhotoError::Base64(_))
        ));
        assert_eq!(decode_photo("QUJD").unwrap(), b"ABC");
    }

    #[test]
    fn data_uri_has_jpeg_prefix() {
        assert_eq!(
            to_data_uri("QUJD").as_deref(),
            Some("data:image/jpeg;base64,QUJD")
        );
    }
}

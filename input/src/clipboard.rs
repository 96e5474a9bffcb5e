//! Clipboard image access for the askback front-ends.
//!
//! [`ClipboardProvider`] abstracts the system clipboard behind a trait so
//! the paste actions can be tested with mocks; [`SystemClipboard`] is the
//! production implementation over the `arboard` crate.
//!
//! # File URI support
//!
//! Linux file managers (Dolphin, Nautilus) often place a `file://` URI in
//! the clipboard when an image *file* is copied, rather than the pixel
//! data. The provider detects such URIs, URL-decodes them, and loads the
//! original file bytes so the paste still works.

use std::path::{Path, PathBuf};

/// Extensions accepted as image files when resolving clipboard file URIs.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif", "ico",
];

/// Encoded image bytes retrieved from the clipboard.
#[derive(Debug, Clone)]
pub struct ClipboardImagePayload {
    /// Encoded image bytes: the original file bytes for a `file://` URI, or
    /// a PNG synthesized from the clipboard bitmap.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes` (e.g. "image/png").
    pub mime_type: String,
    /// Suggested filename; the receiving session generates its own name
    /// when persisting, so this is informational only.
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard access error: {0}")]
    Access(String),
    #[error("image processing error: {0}")]
    Image(String),
}

/// Trait for clipboard image access.
///
/// - `Ok(Some(payload))` when the clipboard holds an image
/// - `Ok(None)` when the clipboard is readable but holds no image content
/// - `Err(..)` when the clipboard itself cannot be read
pub trait ClipboardProvider {
    fn image_payload(&self) -> Result<Option<ClipboardImagePayload>, ClipboardError>;
}

/// System clipboard implementation using the `arboard` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn image_payload(&self) -> Result<Option<ClipboardImagePayload>, ClipboardError> {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

        // Prefer original file bytes when the clipboard carries file:// URIs.
        if let Ok(text) = clipboard.get_text()
            && let Some(payload) = payload_from_file_uri(&text)
        {
            return Ok(Some(payload));
        }

        match clipboard.get_image() {
            Ok(image_data) => {
                let png =
                    encode_rgba_to_png(image_data.width, image_data.height, &image_data.bytes)?;
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                Ok(Some(ClipboardImagePayload {
                    bytes: png,
                    mime_type: "image/png".to_owned(),
                    filename: format!("clipboard_{stamp}.png"),
                }))
            }
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::Access(e.to_string())),
        }
    }
}

/// Encodes RGBA pixel data to PNG.
fn encode_rgba_to_png(
    width: usize,
    height: usize,
    rgba_data: &[u8],
) -> Result<Vec<u8>, ClipboardError> {
    use image::{ImageBuffer, Rgba};

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width as u32, height as u32, rgba_data.to_vec())
            .ok_or_else(|| ClipboardError::Image("invalid image dimensions".to_owned()))?;

    let mut cursor = std::io::Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| ClipboardError::Image(format!("failed to encode PNG: {e}")))?;

    Ok(cursor.into_inner())
}

/// Scans clipboard text for a `file://` URI pointing at a readable image
/// file and loads its original bytes. Multiple lines may be present when
/// several files were copied; the first loadable image wins.
fn payload_from_file_uri(text: &str) -> Option<ClipboardImagePayload> {
    for line in text.lines() {
        let Some(path) = path_from_file_uri(line.trim()) else {
            continue;
        };
        log::trace!(target: "askback_input::clipboard", "file_uri_detected path={path:?}");
        if let Some(payload) = payload_from_path(&path) {
            return Some(payload);
        }
    }
    None
}

/// Extracts a filesystem path from a `file://` URI, URL-decoding escaped
/// characters (spaces, non-ASCII). Returns `None` unless the path is an
/// existing regular file.
fn path_from_file_uri(uri: &str) -> Option<PathBuf> {
    let rest = uri
        .get(..7)
        .filter(|prefix| prefix.eq_ignore_ascii_case("file://"))
        .map(|_| &uri[7..])?;

    let decoded = urlencoding::decode(rest).ok()?;
    let path = PathBuf::from(decoded.as_ref());
    if path.is_file() { Some(path) } else { None }
}

/// Loads original encoded bytes from an image file path, typed by
/// extension. Non-image extensions are ignored rather than errors: the
/// clipboard merely holds something that is not an image.
fn payload_from_path(path: &Path) -> Option<ClipboardImagePayload> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    let bytes = std::fs::read(path).ok()?;
    let mime_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
    .to_owned();

    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "clipboard_image".to_owned());

    Some(ClipboardImagePayload {
        bytes,
        mime_type,
        filename,
    })
}

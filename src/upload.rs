//! Encoding of image files into `data:` URIs.

use crate::error::UploadError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read a file and return it as a `data:<mime>;base64,...` URI.
pub fn read_data_uri(path: impl AsRef<Path>) -> Result<String, UploadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| UploadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_data_uri(mime_for(path), &bytes))
}

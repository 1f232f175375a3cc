/// Inline image payloads (data URIs)
///
/// Every acquisition path ends up here, so the rest of the client never
/// cares whether an image came from disk, the network or the camera.
/// Nothing about the image content is validated.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;

use crate::error::PayloadError;

/// MIME type used when the format cannot be determined
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// A self-contained encoded image: `data:<mime>;base64,<data>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Encode raw bytes as a base64 data URI
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Wrap an existing data URI as-is
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The data URI string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The MIME type declared in the URI header, if any
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.0.strip_prefix("data:")?.split(',').next()?;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }

    /// Decode the base64 body back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, PayloadError> {
        let rest = self.0.strip_prefix("data:").ok_or(PayloadError::NotDataUri)?;
        let (header, data) = rest.split_once(',').ok_or(PayloadError::NotDataUri)?;

        if !header.ends_with(";base64") {
            return Err(PayloadError::NotBase64);
        }

        BASE64
            .decode(data.trim())
            .map_err(|e| PayloadError::Decode(e.to_string()))
    }

    /// File extension matching the declared MIME type (`png` when unknown)
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type() {
            Some("image/jpeg") | Some("image/jpg") => "jpg",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            Some("image/bmp") => "bmp",
            _ => "png",
        }
    }
}

impl fmt::Display for ImagePayload {
    /// Data URIs are huge, so only the header and size are shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bytes)",
            self.mime_type().unwrap_or(UNKNOWN_MIME),
            self.0.len()
        )
    }
}

/// Work out a MIME type for raw image bytes
///
/// Content sniffing wins; the hint (file extension or Content-Type header)
/// is the fallback.
pub fn detect_mime(bytes: &[u8], hint: Option<&str>) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    match hint.map(|h| h.trim().to_ascii_lowercase()) {
        Some(h) if h.starts_with("image/") => {
            h.split(';').next().unwrap_or(UNKNOWN_MIME).trim().to_string()
        }
        Some(h) => match h.as_str() {
            "png" => "image/png".to_string(),
            "jpg" | "jpeg" => "image/jpeg".to_string(),
            "webp" => "image/webp".to_string(),
            "gif" => "image/gif".to_string(),
            "bmp" => "image/bmp".to_string(),
            _ => UNKNOWN_MIME.to_string(),
        },
        None => UNKNOWN_MIME.to_string(),
    }
}

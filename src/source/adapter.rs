/// Acquisition paths: file, remote URL, camera
///
/// All three return the same [`ImagePayload`], so the workflow never knows
/// where an image came from. No size or format policy is applied here;
/// the generation backend is free to reject what it cannot handle.

use reqwest::header::CONTENT_TYPE;
use std::path::PathBuf;
use tracing::{info, warn};

use super::payload::{detect_mime, ImagePayload};
use crate::camera::WebcamController;
use crate::error::AcquisitionError;

/// Read an image file from disk
pub async fn from_file(path: PathBuf) -> Result<ImagePayload, AcquisitionError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        warn!("⚠️  Failed to read {}: {}", path.display(), e);
        AcquisitionError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    let extension = path.extension().and_then(|e| e.to_str());
    let mime = detect_mime(&bytes, extension);
    info!("📁 Loaded {} ({} KB, {})", path.display(), bytes.len() / 1024, mime);

    Ok(ImagePayload::from_bytes(&mime, &bytes))
}

/// Fetch a remote image and re-encode it inline
///
/// A `data:` URL is already inline and is passed through untouched.
pub async fn from_url(http: reqwest::Client, url: String) -> Result<ImagePayload, AcquisitionError> {
    if url.starts_with("data:") {
        return Ok(ImagePayload::from_data_uri(url));
    }

    let fetch_error = |e: reqwest::Error| {
        warn!("⚠️  Failed to fetch {}: {}", url, e);
        AcquisitionError::Fetch(e.to_string())
    };

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(fetch_error)?
        .error_for_status()
        .map_err(fetch_error)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().await.map_err(fetch_error)?;
    let mime = detect_mime(&bytes, content_type.as_deref());
    info!("🌐 Fetched {} ({} KB, {})", url, bytes.len() / 1024, mime);

    Ok(ImagePayload::from_bytes(&mime, &bytes))
}

/// Take a still from a live camera
pub fn from_capture(camera: &mut WebcamController) -> Result<ImagePayload, AcquisitionError> {
    camera.capture().map_err(AcquisitionError::from)
}

/// Write a payload's decoded bytes to disk
///
/// Returns the written path so the caller can report it.
pub async fn to_file(payload: ImagePayload, path: PathBuf) -> Result<PathBuf, String> {
    let bytes = payload
        .decode()
        .map_err(|e| format!("Cannot save {}: {}", payload, e))?;

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    info!("💾 Saved {} ({} KB)", path.display(), bytes.len() / 1024);
    Ok(path)
}

/// Default file name for a saved result: `virtual-try-on-<unix-millis>.<ext>`
pub fn result_file_name(payload: &ImagePayload) -> String {
    format!(
        "virtual-try-on-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        payload.file_extension()
    )
}

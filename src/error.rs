/// Error types for every boundary of the try-on client
///
/// All errors are `Clone` so they can travel inside UI messages.
/// Their `Display` output is what the user sees.

use thiserror::Error;

/// Failure while turning a file, URL or camera frame into an image payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("Could not read {path}: {reason}")]
    FileRead { path: String, reason: String },
    #[error("Could not load sample image: {0}")]
    Fetch(String),
    #[error("{0}")]
    Camera(#[from] CameraError),
}

/// Webcam lifecycle failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("No camera is available on this device")]
    Unavailable,
    #[error("{0}")]
    Device(String),
    #[error("The camera is not streaming")]
    NotLive,
    #[error("Failed to encode captured frame: {0}")]
    Encode(String),
}

/// Failure of the one-shot generation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Transport-level failure (connection refused, body read error, ...)
    #[error("{0}")]
    Network(String),
    /// Non-2xx response; carries the backend's `error` field or a generic message
    #[error("{0}")]
    Backend(String),
    /// 2xx response without the expected output field
    #[error("Invalid response from server")]
    Malformed,
}

/// Failure to decode an inline data URI back into bytes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Not a data URI")]
    NotDataUri,
    #[error("Data URI is not base64 encoded")]
    NotBase64,
    #[error("Invalid base64 data: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_displays_raw_message() {
        let err = GenerationError::Backend("model overloaded".to_string());
        assert_eq!(err.to_string(), "model overloaded");
    }

    #[test]
    fn test_camera_error_wraps_into_acquisition() {
        let err: AcquisitionError = CameraError::Device("Permission denied".to_string()).into();
        assert_eq!(err.to_string(), "Permission denied");
    }
}

/// Webcam capture module
///
/// This module handles:
/// - The camera device seam (backend.rs)
/// - The capture controller and its stream lifecycle (controller.rs)
/// - Native hardware access behind the `webcam` feature (native.rs)

pub mod backend;
pub mod controller;
#[cfg(feature = "webcam")]
pub mod native;

pub use backend::{default_backend, CameraBackend, Facing, MediaStream, StreamRequest};
pub use controller::{CameraState, WebcamController};

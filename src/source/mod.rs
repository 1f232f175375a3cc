/// Image source adapter
///
/// This module handles:
/// - The inline image payload shared by every component (payload.rs)
/// - Acquisition from files, URLs and the camera (adapter.rs)
/// - Preset sample pictures (samples.rs)

pub mod adapter;
pub mod payload;
pub mod samples;

pub use payload::ImagePayload;
pub use samples::SampleImage;

/// Camera device seam
///
/// The controller only talks to these traits. The native implementation
/// lives behind the `webcam` feature; tests use a fake device.

use image::RgbImage;

use crate::error::CameraError;

/// Which way the camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Front camera, pointing at the user
    #[default]
    User,
    /// Back camera, pointing away from the user
    Environment,
}

impl Facing {
    pub fn opposite(self) -> Self {
        match self {
            Facing::User => Facing::Environment,
            Facing::Environment => Facing::User,
        }
    }
}

/// Preferred stream properties; devices treat these as hints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamRequest {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f32,
    pub facing: Facing,
}

impl StreamRequest {
    /// Full HD, 16:9
    pub fn preferred(facing: Facing) -> Self {
        Self {
            width: 1920,
            height: 1080,
            aspect_ratio: 16.0 / 9.0,
            facing,
        }
    }
}

/// A source of video streams
pub trait CameraBackend {
    /// Whether any video input exists at all
    fn has_video_input(&self) -> bool;

    /// Acquire a new live stream
    fn open(&mut self, request: &StreamRequest) -> Result<Box<dyn MediaStream>, CameraError>;
}

/// An acquired video stream made of one or more tracks
pub trait MediaStream {
    /// Grab the current frame
    fn read_frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Number of tracks still running
    fn live_tracks(&self) -> usize;

    /// Stop every track. Must be safe to call more than once.
    fn stop(&mut self);
}

/// Backend used when the binary is built without camera support
#[derive(Debug, Default)]
pub struct NoCamera;

impl CameraBackend for NoCamera {
    fn has_video_input(&self) -> bool {
        false
    }

    fn open(&mut self, _request: &StreamRequest) -> Result<Box<dyn MediaStream>, CameraError> {
        Err(CameraError::Unavailable)
    }
}

/// The best backend this build supports
pub fn default_backend() -> Box<dyn CameraBackend> {
    #[cfg(feature = "webcam")]
    {
        Box::new(super::native::NativeCamera::default())
    }

    #[cfg(not(feature = "webcam"))]
    {
        Box::new(NoCamera)
    }
}

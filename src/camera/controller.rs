/// Webcam capture controller
///
/// Owns at most one live stream at a time. Lifecycle:
///
/// ```text
/// Closed -> Requesting -> Live -> Closed
///              |
///              +-> Error -> Closed / Requesting (retry)
/// ```
///
/// Every transition out of `Live` or `Error` stops the held tracks before
/// anything else happens, and dropping the controller does the same.

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::{debug, info, warn};

use super::backend::{CameraBackend, Facing, MediaStream, StreamRequest};
use crate::error::CameraError;
use crate::source::ImagePayload;

/// JPEG quality for captured stills (0-100)
const JPEG_QUALITY: u8 = 80;

/// Controller lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum CameraState {
    Closed,
    Requesting,
    Live,
    /// Device or permission failure, with the message to show the user
    Error(String),
}

pub struct WebcamController {
    backend: Box<dyn CameraBackend>,
    stream: Option<Box<dyn MediaStream>>,
    state: CameraState,
    facing: Facing,
}

impl WebcamController {
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self {
            backend,
            stream: None,
            state: CameraState::Closed,
            facing: Facing::default(),
        }
    }

    /// Whether the device has any camera to offer
    pub fn is_supported(&self) -> bool {
        self.backend.has_video_input()
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_live(&self) -> bool {
        self.state == CameraState::Live
    }

    /// Tracks currently running on the held stream
    pub fn active_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.live_tracks())
    }

    /// Enter `Requesting` for the given facing mode
    ///
    /// Any previous stream is released first. Call [`Self::acquire`] to
    /// actually open the device.
    pub fn request(&mut self, facing: Facing) {
        self.release();
        self.facing = facing;
        self.state = CameraState::Requesting;
        debug!("Camera requested ({:?})", facing);
    }

    /// Open the device requested by [`Self::request`]
    pub fn acquire(&mut self) {
        if self.state != CameraState::Requesting {
            warn!("Camera acquire ignored in state {:?}", self.state);
            return;
        }

        match self.backend.open(&StreamRequest::preferred(self.facing)) {
            Ok(stream) => {
                info!("📷 Camera live ({:?}, {} track(s))", self.facing, stream.live_tracks());
                self.stream = Some(stream);
                self.state = CameraState::Live;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Request and acquire in one go
    pub fn open(&mut self, facing: Facing) {
        self.request(facing);
        self.acquire();
    }

    /// Try again after an error, keeping the current facing mode
    pub fn retry(&mut self) {
        let facing = self.facing;
        self.open(facing);
    }

    /// Current frame for the live preview
    pub fn preview_frame(&mut self) -> Option<RgbImage> {
        if !self.is_live() {
            return None;
        }

        let result = self.stream.as_mut()?.read_frame();
        match result {
            Ok(frame) => Some(frame),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// Grab the current frame as a JPEG data URI
    ///
    /// Outside `Live` this does nothing and returns [`CameraError::NotLive`].
    pub fn capture(&mut self) -> Result<ImagePayload, CameraError> {
        if !self.is_live() {
            warn!("Capture requested while camera is {:?}", self.state);
            return Err(CameraError::NotLive);
        }

        let stream = self.stream.as_mut().ok_or(CameraError::NotLive)?;
        let frame = match stream.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.fail(e.clone());
                return Err(e);
            }
        };

        let payload = match encode_jpeg(&frame) {
            Ok(payload) => payload,
            Err(e) => {
                self.fail(e.clone());
                return Err(e);
            }
        };
        info!("📸 Captured {}x{} frame", frame.width(), frame.height());
        Ok(payload)
    }

    /// Switch between the front and back camera
    pub fn switch_facing(&mut self) {
        if self.state == CameraState::Closed {
            return;
        }

        let facing = self.facing.opposite();
        info!("🔄 Switching camera to {:?}", facing);
        self.open(facing);
    }

    /// Stop all tracks and close. Safe to call in any state.
    pub fn close(&mut self) {
        self.release();
        if self.state != CameraState::Closed {
            debug!("Camera closed");
        }
        self.state = CameraState::Closed;
    }

    fn fail(&mut self, error: CameraError) {
        self.release();
        warn!("Camera error: {}", error);
        self.state = CameraState::Error(error.to_string());
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Camera stream released");
        }
    }
}

impl Drop for WebcamController {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for WebcamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebcamController")
            .field("state", &self.state)
            .field("facing", &self.facing)
            .field("active_tracks", &self.active_tracks())
            .finish()
    }
}

/// Encode an RGB frame as a JPEG data URI
pub fn encode_jpeg(frame: &RgbImage) -> Result<ImagePayload, CameraError> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
        .encode_image(frame)
        .map_err(|e| CameraError::Encode(e.to_string()))?;

    Ok(ImagePayload::from_bytes("image/jpeg", &buffer))
}

/// Hardware webcam backend (feature `webcam`)
///
/// Desktop cameras don't report which way they face, so the first device
/// is treated as the front camera and the second (when present) as the
/// back camera.

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use tracing::warn;

use super::backend::{CameraBackend, Facing, MediaStream, StreamRequest};
use crate::error::CameraError;

/// Frame rate hint for the preview stream
const PREFERRED_FPS: u32 = 30;

#[derive(Debug, Default)]
pub struct NativeCamera;

impl NativeCamera {
    fn device_index(facing: Facing) -> Result<CameraIndex, CameraError> {
        let devices = nokhwa::query(ApiBackend::Auto)
            .map_err(|e| CameraError::Device(e.to_string()))?;

        let slot = device_slot(facing, devices.len())?;
        Ok(devices[slot].index().clone())
    }
}

/// Position of the device for a facing: first is front, second is back
fn device_slot(facing: Facing, count: usize) -> Result<usize, CameraError> {
    match (facing, count) {
        (_, 0) => Err(CameraError::Unavailable),
        (Facing::User, _) => Ok(0),
        (Facing::Environment, 1) => Err(CameraError::Device(
            "No back-facing camera found".to_string(),
        )),
        (Facing::Environment, _) => Ok(1),
    }
}

impl CameraBackend for NativeCamera {
    fn has_video_input(&self) -> bool {
        match nokhwa::query(ApiBackend::Auto) {
            Ok(devices) => !devices.is_empty(),
            Err(e) => {
                warn!("Camera check failed: {}", e);
                false
            }
        }
    }

    fn open(&mut self, request: &StreamRequest) -> Result<Box<dyn MediaStream>, CameraError> {
        let index = Self::device_index(request.facing)?;
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(request.width, request.height),
                FrameFormat::MJPEG,
                PREFERRED_FPS,
            ),
        ));

        let mut camera =
            Camera::new(index, format).map_err(|e| CameraError::Device(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| CameraError::Device(e.to_string()))?;

        Ok(Box::new(NativeStream { camera, running: true }))
    }
}

/// One opened device; nokhwa exposes a single video track per camera
struct NativeStream {
    camera: Camera,
    running: bool,
}

impl MediaStream for NativeStream {
    fn read_frame(&mut self) -> Result<RgbImage, CameraError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CameraError::Device(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::Device(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| CameraError::Device("Camera returned a truncated frame".to_string()))
    }

    fn live_tracks(&self) -> usize {
        usize::from(self.running)
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            warn!("Failed to stop camera stream: {}", e);
        }
        self.running = false;
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_slot_by_facing() {
        assert_eq!(device_slot(Facing::User, 2), Ok(0));
        assert_eq!(device_slot(Facing::Environment, 2), Ok(1));
        assert_eq!(device_slot(Facing::User, 0), Err(CameraError::Unavailable));
    }

    #[test]
    fn test_missing_back_camera_is_an_error() {
        assert!(matches!(
            device_slot(Facing::Environment, 1),
            Err(CameraError::Device(_))
        ));
    }
}

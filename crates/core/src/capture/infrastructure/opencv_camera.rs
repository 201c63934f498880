use opencv::core::{AlgorithmHint, Mat};
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::constants::{CAPTURE_FPS, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("failed to open capture device {index}: {source}")]
    Open {
        index: i32,
        #[source]
        source: opencv::Error,
    },
    #[error("capture device {0} is not available")]
    Unavailable(i32),
}

/// Live camera adapter over `opencv::videoio::VideoCapture`.
///
/// Requests 640x480 @ 60 fps; the driver may ignore any of it, so the
/// metadata reports what the device actually delivers. Frames are handed
/// to the domain as RGB; the BGR conversion happens here, at the I/O
/// boundary. The device is released in `close()` and again on drop, so
/// every exit path lets go of it.
pub struct OpencvCamera {
    capture: videoio::VideoCapture,
    metadata: CaptureMetadata,
    next_index: usize,
}

// Safety: OpencvCamera is only used from a single thread at a time.
// The raw pointers inside OpenCV types are not shared across threads.
unsafe impl Send for OpencvCamera {}

impl OpencvCamera {
    pub fn open(index: i32) -> Result<Self, CameraError> {
        let wrap = |source| CameraError::Open { index, source };

        let mut capture = videoio::VideoCapture::new(index, videoio::CAP_ANY).map_err(wrap)?;
        if !capture.is_opened().map_err(wrap)? {
            return Err(CameraError::Unavailable(index));
        }

        // Requested geometry; failures here are driver refusals, not errors.
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, CAPTURE_WIDTH as f64);
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, CAPTURE_HEIGHT as f64);
        let _ = capture.set(videoio::CAP_PROP_FPS, CAPTURE_FPS);

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).map_err(wrap)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).map_err(wrap)? as u32;
        let fps = capture.get(videoio::CAP_PROP_FPS).map_err(wrap)?;

        Ok(Self {
            capture,
            metadata: CaptureMetadata {
                device_index: index,
                width,
                height,
                fps,
            },
            next_index: 0,
        })
    }
}

impl FrameSource for OpencvCamera {
    fn metadata(&self) -> &CaptureMetadata {
        &self.metadata
    }

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let mut bgr = Mat::default();
        let grabbed = self.capture.read(&mut bgr)?;
        if !grabbed || bgr.empty() {
            return Ok(None);
        }

        let mut rgb = Mat::default();
        imgproc::cvt_color(
            &bgr,
            &mut rgb,
            imgproc::COLOR_BGR2RGB,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;

        let width = rgb.cols() as u32;
        let height = rgb.rows() as u32;
        let data = rgb.data_bytes()?.to_vec();

        let frame = Frame::new(data, width, height, self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        let _ = self.capture.release();
    }
}

impl Drop for OpencvCamera {
    fn drop(&mut self) {
        let _ = self.capture.release();
    }
}

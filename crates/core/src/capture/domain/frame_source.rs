use crate::shared::capture_metadata::CaptureMetadata;
use crate::shared::frame::Frame;

/// Produces frames from a capture device.
///
/// Implementations handle device details (backend, pixel format) while
/// the pipeline works with the abstract [`Frame`]. `read` returning
/// `Ok(None)` means the source is exhausted; a device error is `Err`.
pub trait FrameSource: Send {
    /// Geometry and rate the device actually delivers.
    fn metadata(&self) -> &CaptureMetadata;

    /// Blocks for the next frame.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device. Also performed on drop; calling both is safe.
    fn close(&mut self);
}

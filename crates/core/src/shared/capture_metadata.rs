/// Geometry and rate actually delivered by an opened capture device.
///
/// Requested settings are advisory; drivers may ignore them, so consumers
/// must size buffers from these values rather than from the request.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureMetadata {
    pub device_index: i32,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

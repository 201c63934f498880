use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Sensitivity of a multi-scale detection pass.
///
/// `scale_factor` is the per-level image shrink step (must be > 1.0);
/// `min_neighbors` is how many overlapping candidate hits a region needs
/// before it is reported. Both trade recall against precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
}

/// Domain interface for sub-region detection in a grayscale image.
///
/// Returned regions are unordered and may overlap; deduplication is the
/// collaborator's business, not performed here. Implementations may be
/// stateful, hence `&mut self`.
pub trait RegionDetector: Send {
    fn detect(&mut self, image: &GrayFrame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

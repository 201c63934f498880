use std::path::{Path, PathBuf};

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use thiserror::Error;

use crate::detection::domain::region_detector::{DetectorParams, RegionDetector};
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum CascadeLoadError {
    #[error("cascade model path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to load cascade model {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
    #[error("cascade model loaded empty: {0}")]
    EmptyModel(PathBuf),
}

/// Haar-cascade adapter over `opencv::objdetect::CascadeClassifier`.
///
/// One instance per model (face or eye), with its sensitivity fixed at
/// construction. The classifier is verified non-empty before it is handed
/// out, so a detect call can never run against an unloaded model.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
    params: DetectorParams,
}

// Safety: HaarCascadeDetector is only used from a single thread at a time.
// The raw pointers inside OpenCV types are not shared across threads.
unsafe impl Send for HaarCascadeDetector {}

impl HaarCascadeDetector {
    pub fn from_file(path: &Path, params: DetectorParams) -> Result<Self, CascadeLoadError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| CascadeLoadError::InvalidPath(path.to_path_buf()))?;

        let classifier = CascadeClassifier::new(path_str).map_err(|e| CascadeLoadError::Load {
            path: path.to_path_buf(),
            source: e,
        })?;

        let empty = classifier.empty().map_err(|e| CascadeLoadError::Load {
            path: path.to_path_buf(),
            source: e,
        })?;
        if empty {
            return Err(CascadeLoadError::EmptyModel(path.to_path_buf()));
        }

        Ok(Self { classifier, params })
    }

    pub fn params(&self) -> DetectorParams {
        self.params
    }
}

impl RegionDetector for HaarCascadeDetector {
    fn detect(&mut self, image: &GrayFrame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        // A degenerate crop (e.g. the upper half of a 1px-tall face) holds
        // nothing to scan; report the ordinary empty result.
        if image.width() == 0 || image.height() == 0 {
            return Ok(Vec::new());
        }

        let mat = to_mat(image)?;
        let mut hits = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut hits,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(0, 0),
            Size::new(0, 0),
        )?;

        Ok(hits
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

/// Wraps grayscale bytes in a single-channel `height x width` Mat.
fn to_mat(image: &GrayFrame) -> Result<Mat, opencv::Error> {
    let flat = Mat::from_slice(image.data())?;
    let shaped = flat.reshape(1, image.height() as i32)?;
    Ok(shaped.clone_pointee())
}

use crate::shared::constants::{CLOSED_EYE_BRIGHT_RATIO, EYE_INTENSITY_THRESHOLD};
use crate::shared::frame::GrayFrame;

/// Open/closed classification of a single eye crop.
///
/// Recomputed from scratch every frame; nothing is tracked across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeState {
    Open,
    Closed,
}

impl EyeState {
    pub fn is_closed(self) -> bool {
        matches!(self, EyeState::Closed)
    }
}

/// Fraction of pixels strictly above [`EYE_INTENSITY_THRESHOLD`].
///
/// An empty crop has no bright pixels and reports 0.0.
pub fn bright_ratio(eye: &GrayFrame) -> f64 {
    let total = eye.data().len();
    if total == 0 {
        return 0.0;
    }
    let bright = eye
        .data()
        .iter()
        .filter(|&&p| p > EYE_INTENSITY_THRESHOLD)
        .count();
    bright as f64 / total as f64
}

/// Classifies an eye crop: closed iff the bright-pixel fraction is at or
/// above [`CLOSED_EYE_BRIGHT_RATIO`] (inclusive boundary).
pub fn classify(eye: &GrayFrame) -> EyeState {
    if bright_ratio(eye) >= CLOSED_EYE_BRIGHT_RATIO {
        EyeState::Closed
    } else {
        EyeState::Open
    }
}

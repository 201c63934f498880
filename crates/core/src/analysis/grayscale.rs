use crate::shared::frame::{Frame, GrayFrame};

/// Converts an RGB frame to single-channel intensity using Rec. 601 luma:
/// `Y = 0.299 R + 0.587 G + 0.114 B`, evaluated in integer arithmetic with
/// round-to-nearest so the output is bit-reproducible across platforms.
///
/// The weighting matches what the cascade models were trained against, so
/// the detection and thresholding stages keep their calibrated meaning.
pub fn to_gray(frame: &Frame) -> GrayFrame {
    let mut data = Vec::with_capacity((frame.width() * frame.height()) as usize);
    for rgb in frame.data().chunks_exact(3) {
        data.push(luma(rgb[0], rgb[1], rgb[2]));
    }
    GrayFrame::new(data, frame.width(), frame.height())
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((y + 500) / 1000) as u8
}

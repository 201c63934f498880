use ndarray::{ArrayView2, ArrayView3};

use crate::shared::region::Region;

/// A single capture frame: contiguous RGB24 bytes in row-major order.
///
/// Pixel-format conversion happens at I/O boundaries only; the domain
/// layer always sees RGB. A frame lives for one loop iteration and is
/// discarded afterwards; nothing retains history across frames.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(
            (self.height as usize, self.width as usize, 3),
            &self.data,
        )
        .expect("Frame data length must match dimensions")
    }
}

/// Single-channel intensity image derived from a [`Frame`].
///
/// Same lifetime rules as the frame it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("GrayFrame data length must match dimensions")
    }

    /// Extracts the pixels under `region`, clamped to the image bounds.
    ///
    /// A region lying fully outside the image yields an empty crop.
    pub fn crop(&self, region: &Region) -> GrayFrame {
        let x1 = region.x.max(0).min(self.width as i32) as usize;
        let y1 = region.y.max(0).min(self.height as i32) as usize;
        let x2 = (region.x + region.width).max(0).min(self.width as i32) as usize;
        let y2 = (region.y + region.height).max(0).min(self.height as i32) as usize;

        let crop_w = x2.saturating_sub(x1);
        let crop_h = y2.saturating_sub(y1);

        let src = self.as_ndarray();
        let mut data = Vec::with_capacity(crop_w * crop_h);
        for row in y1..y2 {
            for col in x1..x2 {
                data.push(src[[row, col]]);
            }
        }

        GrayFrame::new(data, crop_w as u32, crop_h as u32)
    }
}

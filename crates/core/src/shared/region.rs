/// An axis-aligned detection rectangle in integer pixel coordinates,
/// top-left origin.
///
/// A region is only meaningful for the frame it was computed on; once the
/// source frame is replaced the coordinates are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The upper half of this region: same x/y/width, height halved with
    /// integer floor (height 11 → 5).
    ///
    /// Eyes are assumed to lie in the upper half of a detected face. That
    /// is a heuristic, not a guarantee.
    pub fn upper_half(&self) -> Region {
        Region {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height / 2,
        }
    }

    /// Translates by `(dx, dy)` without changing size.
    ///
    /// Used to map detections made inside a cropped sub-image back into
    /// full-frame coordinates; the translation is exact.
    pub fn offset_by(&self, dx: i32, dy: i32) -> Region {
        Region {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }
}

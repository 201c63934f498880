/// Environment variable naming the directory that holds the cascade models.
pub const CASCADE_DIR_ENV: &str = "OPENCV_DATA_DIR";

pub const FACE_CASCADE_FILE: &str = "haarcascade_frontalface_default.xml";
pub const EYE_CASCADE_FILE: &str = "haarcascade_eye.xml";

/// Requested capture geometry. The driver may silently ignore these;
/// actual values are reported in
/// [`CaptureMetadata`](crate::shared::capture_metadata::CaptureMetadata).
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const CAPTURE_FPS: f64 = 60.0;

/// Face pass sensitivity: the vision library's `detectMultiScale` defaults.
pub const FACE_SCALE_FACTOR: f64 = 1.1;
pub const FACE_MIN_NEIGHBORS: i32 = 3;

/// Eye pass sensitivity: tighter scale step, stricter neighbor vote.
pub const EYE_SCALE_FACTOR: f64 = 1.05;
pub const EYE_MIN_NEIGHBORS: i32 = 8;

/// Grayscale intensity above which a pixel counts as bright in an eye crop.
pub const EYE_INTENSITY_THRESHOLD: u8 = 30;

/// An eye is classified closed once its bright-pixel fraction reaches this.
pub const CLOSED_EYE_BRIGHT_RATIO: f64 = 0.2;

/// At most this many eye candidates are processed per face.
pub const MAX_EYES_PER_FACE: usize = 2;

/// Key-poll timeout that paces the display loop (~one tick per 30 ms).
pub const DISPLAY_WAIT_MS: i32 = 30;

pub const WINDOW_TITLE: &str = "eyewatch";

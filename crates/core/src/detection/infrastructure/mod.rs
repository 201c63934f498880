pub mod cascade_locator;
pub mod haar_cascade_detector;

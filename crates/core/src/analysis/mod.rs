pub mod eye_state;
pub mod fatigue;
pub mod grayscale;

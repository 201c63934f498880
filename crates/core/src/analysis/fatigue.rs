use std::fmt;

/// The HUD fatigue score.
///
/// This value is a placeholder: it is rendered every frame but nothing
/// feeds eye observations into it, so the displayed number has no causal
/// connection to detected eye state. Deriving a real score (blink rate,
/// PERCLOS) is deliberately out of scope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FatigueScore(f64);

impl FatigueScore {
    pub fn placeholder() -> Self {
        Self(0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FatigueScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

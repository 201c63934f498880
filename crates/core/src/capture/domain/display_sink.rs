use crate::pipeline::overlay::OverlayPlan;
use crate::shared::frame::Frame;

/// What the presentation surface observed while showing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Continue,
    /// The user pressed a key; the session should end normally.
    Quit,
}

/// Presents an annotated frame to the user.
///
/// Implementations render the overlay plan themselves so the analyzer
/// stays independent of any drawing backend. The call is expected to
/// block briefly (the key-poll timeout paces the loop).
pub trait DisplaySink {
    fn present(
        &mut self,
        frame: &Frame,
        overlay: &OverlayPlan,
    ) -> Result<SinkEvent, Box<dyn std::error::Error>>;
}

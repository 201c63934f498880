use opencv::core::{AlgorithmHint, Mat, Point, Rect, Scalar};
use opencv::prelude::*;
use opencv::{highgui, imgproc};

use crate::capture::domain::display_sink::{DisplaySink, SinkEvent};
use crate::pipeline::overlay::{Color, OverlayCommand, OverlayPlan};
use crate::shared::constants::DISPLAY_WAIT_MS;
use crate::shared::frame::Frame;

/// Window adapter over `opencv::highgui`.
///
/// Renders the overlay plan onto a copy of the frame, shows it, and polls
/// for a key with a ~30 ms timeout; the poll is what paces the loop. Any
/// key ends the session.
pub struct HighguiDisplay {
    window: String,
}

impl HighguiDisplay {
    pub fn open(title: &str) -> Result<Self, opencv::Error> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            window: title.to_string(),
        })
    }
}

impl DisplaySink for HighguiDisplay {
    fn present(
        &mut self,
        frame: &Frame,
        overlay: &OverlayPlan,
    ) -> Result<SinkEvent, Box<dyn std::error::Error>> {
        let mut canvas = to_bgr_mat(frame)?;

        for command in overlay.commands() {
            match command {
                OverlayCommand::Rect {
                    region,
                    color,
                    thickness,
                } => {
                    imgproc::rectangle(
                        &mut canvas,
                        Rect::new(region.x, region.y, region.width, region.height),
                        scalar(*color),
                        *thickness,
                        imgproc::LINE_8,
                        0,
                    )?;
                }
                OverlayCommand::Text {
                    text,
                    x,
                    y,
                    color,
                    scale,
                    thickness,
                } => {
                    imgproc::put_text(
                        &mut canvas,
                        text,
                        Point::new(*x, *y),
                        imgproc::FONT_HERSHEY_PLAIN,
                        *scale,
                        scalar(*color),
                        *thickness,
                        imgproc::LINE_8,
                        false,
                    )?;
                }
            }
        }

        highgui::imshow(&self.window, &canvas)?;
        let key = highgui::wait_key(DISPLAY_WAIT_MS)?;
        Ok(if key >= 0 {
            SinkEvent::Quit
        } else {
            SinkEvent::Continue
        })
    }
}

impl Drop for HighguiDisplay {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.window);
    }
}

fn to_bgr_mat(frame: &Frame) -> Result<Mat, opencv::Error> {
    let flat = Mat::from_slice(frame.data())?;
    let rgb = flat.reshape(3, frame.height() as i32)?.clone_pointee();
    let mut bgr = Mat::default();
    imgproc::cvt_color(
        &rgb,
        &mut bgr,
        imgproc::COLOR_RGB2BGR,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;
    Ok(bgr)
}

/// OpenCV draws in BGR channel order.
fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

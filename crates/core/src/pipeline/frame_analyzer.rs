use crate::analysis::eye_state::{self, EyeState};
use crate::analysis::fatigue::FatigueScore;
use crate::analysis::grayscale;
use crate::detection::domain::region_detector::RegionDetector;
use crate::pipeline::overlay::{
    OverlayCommand, OverlayPlan, EYE_BOX_COLOR, EYE_BOX_THICKNESS, EYE_LABEL_COLOR,
    EYE_LABEL_SCALE, EYE_LABEL_THICKNESS, EYE_LABEL_X, EYE_LABEL_Y_BASE, EYE_LABEL_Y_STEP,
    SCORE_COLOR, SCORE_MARGIN, SCORE_SCALE, SCORE_THICKNESS,
};
use crate::shared::constants::MAX_EYES_PER_FACE;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Which of the two processed eye slots an observation fills.
///
/// Slots are assigned by detector result order (index 0 = Left, 1 =
/// Right). Detector order carries no anatomical guarantee; this labeling
/// is a known limitation, kept as-is rather than re-sorted by coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeSlot {
    Left,
    Right,
}

impl EyeSlot {
    fn from_index(index: usize) -> Self {
        if index == 0 {
            EyeSlot::Left
        } else {
            EyeSlot::Right
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EyeSlot::Left => "Left Eye",
            EyeSlot::Right => "Right Eye",
        }
    }
}

/// One classified eye for one frame, in full-frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeObservation {
    pub slot: EyeSlot,
    pub region: Region,
    pub state: EyeState,
}

/// Everything the pipeline produced for one frame.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub faces: Vec<Region>,
    pub eyes: Vec<EyeObservation>,
    pub overlay: OverlayPlan,
}

/// The per-frame pipeline: grayscale → face detection → eye detection in
/// each face's upper half → per-eye open/closed classification → overlay
/// plan.
///
/// Every frame is processed independently; there is no memory of prior
/// frames.
pub struct FrameAnalyzer {
    face_detector: Box<dyn RegionDetector>,
    eye_detector: Box<dyn RegionDetector>,
}

impl FrameAnalyzer {
    pub fn new(face_detector: Box<dyn RegionDetector>, eye_detector: Box<dyn RegionDetector>) -> Self {
        Self {
            face_detector,
            eye_detector,
        }
    }

    pub fn analyze(&mut self, frame: &Frame) -> Result<FrameAnalysis, Box<dyn std::error::Error>> {
        let gray = grayscale::to_gray(frame);

        // Zero faces is an ordinary empty result, not an error.
        let faces = self.face_detector.detect(&gray)?;

        let mut eyes = Vec::new();
        let mut overlay = OverlayPlan::new();

        for face in &faces {
            let upper = face.upper_half();
            let candidates = self.eye_detector.detect(&gray.crop(&upper))?;

            for (index, candidate) in candidates.iter().take(MAX_EYES_PER_FACE).enumerate() {
                // Candidates are in crop space; translate back by the
                // crop's top-left offset.
                let region = candidate.offset_by(upper.x, upper.y);
                let state = eye_state::classify(&gray.crop(&region));
                let slot = EyeSlot::from_index(index);

                log::info!(
                    "X={} Y={} W={} H={}",
                    region.x,
                    region.y,
                    region.width,
                    region.height
                );

                overlay.push(OverlayCommand::Rect {
                    region,
                    color: EYE_BOX_COLOR,
                    thickness: EYE_BOX_THICKNESS,
                });
                overlay.push(OverlayCommand::Text {
                    text: format!(
                        "{}: X={} Y={} W={} H={}",
                        slot.label(),
                        region.x,
                        region.y,
                        region.width,
                        region.height
                    ),
                    x: EYE_LABEL_X,
                    y: EYE_LABEL_Y_BASE + index as i32 * EYE_LABEL_Y_STEP,
                    color: EYE_LABEL_COLOR,
                    scale: EYE_LABEL_SCALE,
                    thickness: EYE_LABEL_THICKNESS,
                });

                eyes.push(EyeObservation {
                    slot,
                    region,
                    state,
                });
            }
        }

        overlay.push(OverlayCommand::Text {
            text: format!("Fatigue Score: {}", FatigueScore::placeholder()),
            x: SCORE_MARGIN,
            y: frame.height() as i32 - SCORE_MARGIN,
            color: SCORE_COLOR,
            scale: SCORE_SCALE,
            thickness: SCORE_THICKNESS,
        });

        Ok(FrameAnalysis {
            faces,
            eyes,
            overlay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::GrayFrame;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubDetector {
        results: Vec<Vec<Region>>,
        call: usize,
        seen_sizes: Arc<Mutex<Vec<(u32, u32)>>>,
    }

    impl StubDetector {
        fn new(results: Vec<Vec<Region>>) -> Self {
            Self {
                results,
                call: 0,
                seen_sizes: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl RegionDetector for StubDetector {
        fn detect(
            &mut self,
            image: &GrayFrame,
        ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            self.seen_sizes
                .lock()
                .unwrap()
                .push((image.width(), image.height()));
            let result = self
                .results
                .get(self.call)
                .cloned()
                .unwrap_or_default();
            self.call += 1;
            Ok(result)
        }
    }

    struct FailingDetector;

    impl RegionDetector for FailingDetector {
        fn detect(
            &mut self,
            _image: &GrayFrame,
        ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
            Err("detector backend failure".into())
        }
    }

    // --- Helpers ---

    fn frame_filled(w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 0)
    }

    fn analyzer_with(
        faces: Vec<Vec<Region>>,
        eyes: Vec<Vec<Region>>,
    ) -> (FrameAnalyzer, Arc<Mutex<Vec<(u32, u32)>>>) {
        let eye_stub = StubDetector::new(eyes);
        let sizes = eye_stub.seen_sizes.clone();
        (
            FrameAnalyzer::new(Box::new(StubDetector::new(faces)), Box::new(eye_stub)),
            sizes,
        )
    }

    fn rect_regions(plan: &OverlayPlan) -> Vec<Region> {
        plan.commands()
            .iter()
            .filter_map(|c| match c {
                OverlayCommand::Rect { region, .. } => Some(*region),
                _ => None,
            })
            .collect()
    }

    fn text_positions(plan: &OverlayPlan) -> Vec<(i32, i32)> {
        plan.commands()
            .iter()
            .filter_map(|c| match c {
                OverlayCommand::Text { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    // --- Tests ---

    #[test]
    fn test_eye_coordinates_translated_to_full_frame() {
        // Face (100,50,200,200): upper half is (100,50,200,100). An eye
        // at (20,10,30,15) inside that crop lands at (120,60,30,15).
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(100, 50, 200, 200)]],
            vec![vec![Region::new(20, 10, 30, 15)]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        assert_eq!(analysis.eyes.len(), 1);
        assert_eq!(analysis.eyes[0].region, Region::new(120, 60, 30, 15));
        assert_eq!(rect_regions(&analysis.overlay), vec![Region::new(120, 60, 30, 15)]);
    }

    #[test]
    fn test_eye_detector_sees_upper_half_crop() {
        let (mut analyzer, sizes) = analyzer_with(
            vec![vec![Region::new(10, 20, 100, 81)]],
            vec![vec![]],
        );
        analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        // Crop height is floor(81 / 2) = 40.
        assert_eq!(sizes.lock().unwrap().as_slice(), &[(100, 40)]);
    }

    #[test]
    fn test_no_faces_yields_empty_analysis() {
        let (mut analyzer, sizes) = analyzer_with(vec![vec![]], vec![]);
        let analysis = analyzer.analyze(&frame_filled(64, 48, 0)).unwrap();

        assert!(analysis.faces.is_empty());
        assert!(analysis.eyes.is_empty());
        // Only the fatigue-score line remains.
        assert_eq!(analysis.overlay.len(), 1);
        assert!(sizes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_eye_fills_left_slot_only() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(0, 0, 100, 100)]],
            vec![vec![Region::new(5, 5, 20, 10)]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        assert_eq!(analysis.eyes.len(), 1);
        assert_eq!(analysis.eyes[0].slot, EyeSlot::Left);
    }

    #[test]
    fn test_at_most_two_eyes_per_face() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(0, 0, 200, 200)]],
            vec![vec![
                Region::new(10, 10, 20, 10),
                Region::new(60, 10, 20, 10),
                Region::new(110, 10, 20, 10),
            ]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        assert_eq!(analysis.eyes.len(), 2);
        assert_eq!(analysis.eyes[0].slot, EyeSlot::Left);
        assert_eq!(analysis.eyes[1].slot, EyeSlot::Right);
    }

    #[test]
    fn test_dark_frame_classifies_open() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(0, 0, 100, 100)]],
            vec![vec![Region::new(10, 10, 20, 10)]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();
        assert_eq!(analysis.eyes[0].state, EyeState::Open);
    }

    #[test]
    fn test_bright_frame_classifies_closed() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(0, 0, 100, 100)]],
            vec![vec![Region::new(10, 10, 20, 10)]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 255)).unwrap();
        assert_eq!(analysis.eyes[0].state, EyeState::Closed);
    }

    #[test]
    fn test_label_positions_stack_by_eye_index() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![Region::new(0, 0, 200, 200)]],
            vec![vec![Region::new(10, 10, 20, 10), Region::new(60, 10, 20, 10)]],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        let positions = text_positions(&analysis.overlay);
        // Two eye labels at y=30 and y=60, then the score line.
        assert_eq!(positions[0], (EYE_LABEL_X, 30));
        assert_eq!(positions[1], (EYE_LABEL_X, 60));
        assert_eq!(positions[2], (SCORE_MARGIN, 480 - SCORE_MARGIN));
    }

    #[test]
    fn test_label_positions_reset_per_face() {
        // Two faces with one eye each: both labels sit at the index-0
        // position and overwrite each other on screen (kept behavior).
        let (mut analyzer, _) = analyzer_with(
            vec![vec![
                Region::new(0, 0, 100, 100),
                Region::new(300, 0, 100, 100),
            ]],
            vec![
                vec![Region::new(5, 5, 20, 10)],
                vec![Region::new(5, 5, 20, 10)],
            ],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        let positions = text_positions(&analysis.overlay);
        assert_eq!(positions[0], (EYE_LABEL_X, EYE_LABEL_Y_BASE));
        assert_eq!(positions[1], (EYE_LABEL_X, EYE_LABEL_Y_BASE));
    }

    #[test]
    fn test_eyes_gathered_across_faces() {
        let (mut analyzer, _) = analyzer_with(
            vec![vec![
                Region::new(0, 0, 100, 100),
                Region::new(300, 100, 100, 100),
            ]],
            vec![
                vec![Region::new(5, 5, 20, 10)],
                vec![Region::new(7, 9, 20, 10)],
            ],
        );
        let analysis = analyzer.analyze(&frame_filled(640, 480, 0)).unwrap();

        assert_eq!(analysis.eyes.len(), 2);
        assert_eq!(analysis.eyes[0].region, Region::new(5, 5, 20, 10));
        // Second face's crop origin is (300, 100).
        assert_eq!(analysis.eyes[1].region, Region::new(307, 109, 20, 10));
    }

    #[test]
    fn test_score_line_always_present() {
        let (mut analyzer, _) = analyzer_with(vec![vec![]], vec![]);
        let analysis = analyzer.analyze(&frame_filled(64, 48, 0)).unwrap();

        let score = analysis.overlay.commands().iter().any(|c| {
            matches!(c, OverlayCommand::Text { text, .. } if text.starts_with("Fatigue Score:"))
        });
        assert!(score);
    }

    #[test]
    fn test_face_detector_error_propagates() {
        let mut analyzer = FrameAnalyzer::new(
            Box::new(FailingDetector),
            Box::new(StubDetector::new(vec![])),
        );
        assert!(analyzer.analyze(&frame_filled(64, 48, 0)).is_err());
    }

    #[test]
    fn test_eye_detector_error_propagates() {
        let mut analyzer = FrameAnalyzer::new(
            Box::new(StubDetector::new(vec![vec![Region::new(0, 0, 50, 50)]])),
            Box::new(FailingDetector),
        );
        assert!(analyzer.analyze(&frame_filled(64, 48, 0)).is_err());
    }
}

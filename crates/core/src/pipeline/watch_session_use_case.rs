use std::time::Instant;

use crate::capture::domain::display_sink::{DisplaySink, SinkEvent};
use crate::capture::domain::frame_source::FrameSource;
use crate::pipeline::frame_analyzer::FrameAnalyzer;
use crate::pipeline::pipeline_logger::PipelineLogger;

/// Counters accumulated over one watch session, reported at exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub eye_observations: u64,
    pub closed_observations: u64,
}

/// The live loop: read → analyze → present, until a keypress, the frame
/// budget, or the end of the source.
///
/// Single-threaded and blocking; pacing comes from the sink's key-poll
/// timeout. The source is closed on every exit path, including error
/// paths. Running without a sink (headless) analyzes and logs only.
pub struct WatchSessionUseCase {
    source: Box<dyn FrameSource>,
    sink: Option<Box<dyn DisplaySink>>,
    analyzer: FrameAnalyzer,
    logger: Box<dyn PipelineLogger>,
    max_frames: Option<u64>,
}

impl WatchSessionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Option<Box<dyn DisplaySink>>,
        analyzer: FrameAnalyzer,
        logger: Box<dyn PipelineLogger>,
        max_frames: Option<u64>,
    ) -> Self {
        Self {
            source,
            sink,
            analyzer,
            logger,
            max_frames,
        }
    }

    pub fn execute(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let result = self.run_loop();
        self.source.close();
        if result.is_ok() {
            self.logger.summary();
        }
        result
    }

    fn run_loop(&mut self) -> Result<SessionSummary, Box<dyn std::error::Error>> {
        let mut summary = SessionSummary::default();

        loop {
            if let Some(limit) = self.max_frames {
                if summary.frames >= limit {
                    break;
                }
            }

            let frame = match self.source.read()? {
                Some(frame) => frame,
                None if summary.frames == 0 => {
                    // An exhausted device before the first frame is a
                    // startup failure, not a finished session.
                    return Err("capture device produced no frames".into());
                }
                None => break,
            };

            let started = Instant::now();
            let analysis = self.analyzer.analyze(&frame)?;
            self.logger
                .timing("analyze", started.elapsed().as_secs_f64() * 1000.0);

            summary.frames += 1;
            summary.eye_observations += analysis.eyes.len() as u64;
            summary.closed_observations +=
                analysis.eyes.iter().filter(|e| e.state.is_closed()).count() as u64;
            self.logger
                .metric("eye_observations", analysis.eyes.len() as f64);
            self.logger.frame(summary.frames);

            if let Some(sink) = self.sink.as_mut() {
                let started = Instant::now();
                let event = sink.present(&frame, &analysis.overlay)?;
                self.logger
                    .timing("present", started.elapsed().as_secs_f64() * 1000.0);
                if event == SinkEvent::Quit {
                    break;
                }
            }
        }

        Ok(summary)
    }
}

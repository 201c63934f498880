use std::env;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use eyewatch_core::capture::domain::display_sink::DisplaySink;
use eyewatch_core::capture::domain::frame_source::FrameSource;
use eyewatch_core::capture::infrastructure::highgui_display::HighguiDisplay;
use eyewatch_core::capture::infrastructure::opencv_camera::OpencvCamera;
use eyewatch_core::detection::domain::region_detector::{DetectorParams, RegionDetector};
use eyewatch_core::detection::infrastructure::cascade_locator::CascadePaths;
use eyewatch_core::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use eyewatch_core::pipeline::frame_analyzer::FrameAnalyzer;
use eyewatch_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use eyewatch_core::pipeline::watch_session_use_case::WatchSessionUseCase;
use eyewatch_core::shared::constants::{
    CASCADE_DIR_ENV, EYE_MIN_NEIGHBORS, EYE_SCALE_FACTOR, FACE_MIN_NEIGHBORS, FACE_SCALE_FACTOR,
    WINDOW_TITLE,
};

/// Real-time eye-fatigue webcam demo.
#[derive(Parser)]
#[command(name = "eyewatch")]
struct Cli {
    /// Directory holding the Haar cascade models (falls back to $OPENCV_DATA_DIR).
    #[arg(long)]
    cascade_dir: Option<PathBuf>,

    /// Capture device index.
    #[arg(long, default_value = "0")]
    camera: i32,

    /// Eye detector scale step per cascade level (> 1.0).
    #[arg(long, default_value_t = EYE_SCALE_FACTOR)]
    eye_scale_factor: f64,

    /// Overlapping hits an eye candidate needs before it is reported.
    #[arg(long, default_value_t = EYE_MIN_NEIGHBORS)]
    eye_min_neighbors: i32,

    /// Run without a display window (analysis and logs only).
    #[arg(long)]
    headless: bool,

    /// Stop after N frames (0 = run until a key is pressed).
    #[arg(long, default_value = "0")]
    max_frames: u64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let cascade_dir = resolve_cascade_dir(&cli)?;
    let paths = CascadePaths::locate(&cascade_dir)?;
    log::info!(
        "Cascade models: {} / {}",
        paths.face.display(),
        paths.eye.display()
    );

    let analyzer = build_analyzer(&cli, &paths)?;

    let camera = OpencvCamera::open(cli.camera)?;
    let meta = camera.metadata();
    log::info!(
        "Capture device {} opened: {}x{} @ {:.0} fps",
        meta.device_index,
        meta.width,
        meta.height,
        meta.fps
    );
    let source: Box<dyn FrameSource> = Box::new(camera);

    let sink: Option<Box<dyn DisplaySink>> = if cli.headless {
        None
    } else {
        Some(Box::new(HighguiDisplay::open(WINDOW_TITLE)?))
    };

    let max_frames = (cli.max_frames > 0).then_some(cli.max_frames);
    let logger: Box<dyn PipelineLogger> = Box::new(StdoutPipelineLogger::default());

    let mut use_case = WatchSessionUseCase::new(source, sink, analyzer, logger, max_frames);
    let summary = use_case.execute()?;

    log::info!(
        "Session ended: {} frames, {} eye observations ({} closed)",
        summary.frames,
        summary.eye_observations,
        summary.closed_observations
    );
    Ok(())
}

fn build_analyzer(
    cli: &Cli,
    paths: &CascadePaths,
) -> Result<FrameAnalyzer, Box<dyn std::error::Error>> {
    let face: Box<dyn RegionDetector> = Box::new(HaarCascadeDetector::from_file(
        &paths.face,
        DetectorParams {
            scale_factor: FACE_SCALE_FACTOR,
            min_neighbors: FACE_MIN_NEIGHBORS,
        },
    )?);
    let eye: Box<dyn RegionDetector> = Box::new(HaarCascadeDetector::from_file(
        &paths.eye,
        DetectorParams {
            scale_factor: cli.eye_scale_factor,
            min_neighbors: cli.eye_min_neighbors,
        },
    )?);
    Ok(FrameAnalyzer::new(face, eye))
}

/// The only environment read in the program, performed once at startup.
fn resolve_cascade_dir(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(dir) = &cli.cascade_dir {
        return Ok(dir.clone());
    }
    match env::var_os(CASCADE_DIR_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Err(format!("--cascade-dir not given and {CASCADE_DIR_ENV} is unset").into()),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.eye_scale_factor <= 1.0 {
        return Err(format!(
            "Eye scale factor must be greater than 1.0, got {}",
            cli.eye_scale_factor
        )
        .into());
    }
    if cli.eye_min_neighbors < 0 {
        return Err(format!(
            "Eye min neighbors must be non-negative, got {}",
            cli.eye_min_neighbors
        )
        .into());
    }
    if cli.headless && cli.max_frames == 0 {
        return Err("--headless requires --max-frames > 0 (no keypress can end the session)".into());
    }
    Ok(())
}

use std::path::PathBuf;
use std::process;

use clap::Parser;

use handtrack_core::detection::infrastructure::replay_detector::ReplayDetector;
use handtrack_core::detection::infrastructure::replay_refiner::ReplayRefiner;
use handtrack_core::detection::infrastructure::similarity_factory::SimilarityKind;
use handtrack_core::pipeline::hand_landmarker::HandLandmarker;
use handtrack_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use handtrack_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use handtrack_core::pipeline::track_hands_use_case::TrackHandsUseCase;
use handtrack_core::pipeline::tracking_config::TrackingConfig;
use handtrack_core::shared::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use handtrack_core::stream::domain::result_sink::ResultSink;
use handtrack_core::stream::infrastructure::json_lines_sink::JsonLinesSink;
use handtrack_core::stream::infrastructure::synthetic_frame_source::SyntheticFrameSource;

/// Replay recorded hand detections through the detect-or-track loop.
#[derive(Parser)]
#[command(name = "handtrack")]
struct Cli {
    /// Detection log (JSON) to replay.
    input: PathBuf,

    /// Output JSON-lines file (stdout when omitted).
    output: Option<PathBuf>,

    /// Tracking config file (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of hands tracked at once.
    #[arg(long)]
    max_regions: Option<usize>,

    /// Similarity at or above which a detection confirms a tracked hand (0.0-1.0).
    #[arg(long)]
    min_similarity: Option<f64>,

    /// Overlap measure: axis-aligned or rotated.
    #[arg(long)]
    similarity: Option<String>,

    /// Number of frames to replay (default: through the last recorded frame).
    #[arg(long)]
    frames: Option<usize>,

    /// Frame width in pixels.
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
    height: u32,

    /// Frame rate used to timestamp replayed frames.
    #[arg(long)]
    fps: Option<f64>,
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

    let config = build_config(&cli)?;
    let detector = ReplayDetector::from_json_file(&cli.input)?;
    let frame_count = cli.frames.or(detector.frame_span()).unwrap_or(0);

    let mut source = SyntheticFrameSource::new(cli.width, cli.height, frame_count);
    if let Some(fps) = cli.fps {
        source = source.with_fps(fps);
    }
    let sink: Box<dyn ResultSink> = match &cli.output {
        Some(path) => Box::new(JsonLinesSink::to_file(path)?),
        None => Box::new(JsonLinesSink::to_stdout()),
    };
    let landmarker = HandLandmarker::new(Box::new(detector), Box::new(ReplayRefiner::new()), &config)?;

    log::info!(
        "Replaying {} ({frame_count} frames, max {} hands, {} IoU >= {})",
        cli.input.display(),
        config.max_regions,
        config.similarity,
        config.min_similarity_threshold
    );

    let mut use_case = TrackHandsUseCase::new(
        Box::new(source),
        sink,
        landmarker,
        Box::new(ThreadedPipelineExecutor::new()),
        None,
        None,
    );
    let mut logger = StdoutPipelineLogger::default();
    let result = use_case.execute(&mut logger);
    logger.summary();
    result
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if let Some(config) = &cli.config {
        if !config.exists() {
            return Err(format!("Config file not found: {}", config.display()).into());
        }
    }
    if cli.max_regions == Some(0) {
        return Err("Max regions must be at least 1".into());
    }
    if let Some(threshold) = cli.min_similarity {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!(
                "Min similarity must be between 0.0 and 1.0, got {threshold}"
            )
            .into());
        }
    }
    if let Some(fps) = cli.fps {
        if !(fps > 0.0 && fps.is_finite()) {
            return Err(format!("FPS must be positive, got {fps}").into());
        }
    }
    if cli.width == 0 || cli.height == 0 {
        return Err(format!(
            "Frame size must be non-zero, got {}x{}",
            cli.width, cli.height
        )
        .into());
    }
    Ok(())
}

/// Config file values (or defaults), overridden by any flags given.
fn build_config(cli: &Cli) -> Result<TrackingConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TrackingConfig::from_json_file(path)?,
        None => TrackingConfig::default(),
    };
    if let Some(max_regions) = cli.max_regions {
        config.max_regions = max_regions;
    }
    if let Some(threshold) = cli.min_similarity {
        config.min_similarity_threshold = threshold;
    }
    if let Some(similarity) = &cli.similarity {
        config.similarity = similarity.parse::<SimilarityKind>()?;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("handtrack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = parse(&["log.json"]);
        assert_eq!(build_config(&cli).unwrap(), TrackingConfig::default());
        assert_eq!((cli.width, cli.height), (640, 480));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "log.json",
            "out.jsonl",
            "--max-regions",
            "4",
            "--min-similarity",
            "0.3",
            "--similarity",
            "rotated",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.max_regions, 4);
        assert_eq!(config.min_similarity_threshold, 0.3);
        assert_eq!(config.similarity, SimilarityKind::Rotated);
        assert_eq!(cli.output, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn test_unknown_similarity_is_rejected() {
        let cli = parse(&["log.json", "--similarity", "obb"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let cli = parse(&["/nonexistent/log.json"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }
}

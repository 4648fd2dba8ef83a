use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::pipeline::hand_landmarker::HandLandmarker;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::stream::domain::frame_source::FrameSource;
use crate::stream::domain::result_sink::ResultSink;

/// Progress callback: `(frames_done, total_frames)`. Returning `false`
/// cancels the run.
pub type ProgressCallback = Box<dyn Fn(usize, Option<usize>) -> bool + Send>;

/// Configuration for a pipeline execution run.
pub struct PipelineConfig {
    pub on_progress: Option<ProgressCallback>,
    pub cancelled: Arc<AtomicBool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            on_progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Abstracts how the read → track → write pipeline is executed.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        sink: Box<dyn ResultSink>,
        landmarker: &mut HandLandmarker,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

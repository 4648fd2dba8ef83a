use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::stream::domain::frame_source::FrameSource;
use crate::stream::domain::result_sink::ResultSink;

use super::hand_landmarker::HandLandmarker;
use super::pipeline_executor::{PipelineConfig, PipelineExecutor, ProgressCallback};
use super::pipeline_logger::PipelineLogger;

/// Orchestrates hand tracking over a whole stream.
///
/// Wires the frame source, landmarker and result sink together and
/// delegates execution to a `PipelineExecutor`. This is a single-use
/// struct: `execute` consumes the owned components, so calling it twice
/// will fail.
pub struct TrackHandsUseCase {
    source: Option<Box<dyn FrameSource>>,
    sink: Option<Box<dyn ResultSink>>,
    landmarker: HandLandmarker,
    executor: Box<dyn PipelineExecutor>,
    on_progress: Option<ProgressCallback>,
    cancelled: Arc<AtomicBool>,
}

impl TrackHandsUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn ResultSink>,
        landmarker: HandLandmarker,
        executor: Box<dyn PipelineExecutor>,
        on_progress: Option<ProgressCallback>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            sink: Some(sink),
            landmarker,
            executor,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        logger: &mut dyn PipelineLogger,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let config = PipelineConfig {
            on_progress: self.on_progress.take(),
            cancelled: self.cancelled.clone(),
        };

        self.executor.execute(
            self.source.take().ok_or("Pipeline already executed")?,
            self.sink.take().ok_or("Pipeline already executed")?,
            &mut self.landmarker,
            logger,
            config,
        )
    }

    /// The landmarker, with whatever state the run left it in.
    pub fn landmarker(&self) -> &HandLandmarker {
        &self.landmarker
    }
}

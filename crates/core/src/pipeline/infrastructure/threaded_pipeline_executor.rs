use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::frame_result::FrameResult;
use crate::pipeline::hand_landmarker::HandLandmarker;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor};
use crate::pipeline::pipeline_logger::{
    PipelineLogger, DETECTOR_INVOKED_METRIC, TRACKED_REGIONS_METRIC,
};
use crate::shared::frame::Frame;
use crate::stream::domain::frame_source::FrameSource;
use crate::stream::domain::result_sink::ResultSink;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Executes the tracking pipeline with dedicated threads for I/O.
///
/// Layout: `reader → main [HandLandmarker] → sink`
///
/// The landmarker carries state from frame to frame, so it stays on the
/// calling thread and sees frames strictly in order. Reading the next frame
/// and writing the previous result overlap with it.
pub struct ThreadedPipelineExecutor {
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(channel_capacity: usize) -> Self {
        Self {
            channel_capacity: channel_capacity.max(1),
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        sink: Box<dyn ResultSink>,
        landmarker: &mut HandLandmarker,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let cap = self.channel_capacity;
        let total_frames = source.frame_count();

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Result<Frame, SendError>>(cap);
        let (result_tx, result_rx) = crossbeam_channel::bounded::<FrameResult>(cap);

        let reader_handle = spawn_reader(source, frame_tx, config.cancelled.clone());
        let sink_handle = spawn_sink(sink, result_rx);

        logger.info(&match total_frames {
            Some(n) => format!("Tracking {n} frames (max {} hands)", landmarker.max_regions()),
            None => format!("Tracking stream (max {} hands)", landmarker.max_regions()),
        });

        let main_error = run_main_loop(
            frame_rx,
            &result_tx,
            landmarker,
            logger,
            total_frames,
            &config,
        );

        drop(result_tx);

        join_threads(reader_handle, sink_handle, main_error)
    }
}

fn spawn_reader(
    mut source: Box<dyn FrameSource>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<Box<dyn FrameSource>> {
    std::thread::spawn(move || {
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            if frame_tx.send(mapped).is_err() {
                break;
            }
        }
        source
    })
}

fn spawn_sink(
    mut sink: Box<dyn ResultSink>,
    result_rx: crossbeam_channel::Receiver<FrameResult>,
) -> std::thread::JoinHandle<Result<Box<dyn ResultSink>, SendError>> {
    std::thread::spawn(move || {
        for result in result_rx {
            sink.write(&result)
                .map_err(|e| -> SendError { e.to_string().into() })?;
        }
        Ok(sink)
    })
}

/// Runs the main thread loop: receive frames, track, and send results to
/// the sink. Stops at the first error.
fn run_main_loop(
    frame_rx: crossbeam_channel::Receiver<Result<Frame, SendError>>,
    result_tx: &crossbeam_channel::Sender<FrameResult>,
    landmarker: &mut HandLandmarker,
    logger: &mut dyn PipelineLogger,
    total_frames: Option<usize>,
    config: &PipelineConfig,
) -> Option<Box<dyn std::error::Error>> {
    let mut frames_processed: usize = 0;

    for frame_result in frame_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            break;
        }

        let frame = match frame_result {
            Ok(frame) => frame,
            Err(e) => return Some(e.to_string().into()),
        };

        let started = Instant::now();
        let result = match landmarker.process(&frame) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Stopping at frame {}: {e}", e.frame());
                return Some(Box::new(e));
            }
        };
        logger.timing("track", started.elapsed().as_secs_f64() * 1000.0);
        logger.metric(TRACKED_REGIONS_METRIC, result.hand_count() as f64);
        logger.metric(
            DETECTOR_INVOKED_METRIC,
            if result.detection.was_invoked() { 1.0 } else { 0.0 },
        );

        if result_tx.send(result).is_err() {
            return Some("Sink channel closed unexpectedly".into());
        }

        frames_processed += 1;
        logger.progress(frames_processed, total_frames);

        if let Some(ref callback) = config.on_progress {
            if !callback(frames_processed, total_frames) {
                config.cancelled.store(true, Ordering::Relaxed);
                return Some("Cancelled".into());
            }
        }
    }

    log::info!("Tracked {frames_processed} frames");
    None
}

/// Joins the I/O threads and coalesces the first error encountered.
fn join_threads(
    reader_handle: std::thread::JoinHandle<Box<dyn FrameSource>>,
    sink_handle: std::thread::JoinHandle<Result<Box<dyn ResultSink>, SendError>>,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    match reader_handle.join() {
        Ok(mut source) => source.close(),
        Err(_) => set_if_none(&mut first_error, "Reader thread panicked".into()),
    }

    match sink_handle.join() {
        Ok(Ok(mut sink)) => {
            if let Err(e) = sink.close() {
                set_if_none(&mut first_error, e);
            }
        }
        Ok(Err(e)) => set_if_none(&mut first_error, e.to_string().into()),
        Err(_) => set_if_none(&mut first_error, "Sink thread panicked".into()),
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

use crate::pipeline::frame_result::FrameResult;

/// Consumes per-frame tracking results in stream order.
pub trait ResultSink: Send {
    fn write(&mut self, result: &FrameResult) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes buffered output.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

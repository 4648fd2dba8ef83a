use crate::shared::frame::Frame;

/// Supplies frames in stream order.
///
/// Implementations handle decoding or capture; the pipeline only sees
/// `Frame`s with increasing indices.
pub trait FrameSource: Send {
    /// Returns an iterator over frames in stream order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Number of frames, when known up front.
    fn frame_count(&self) -> Option<usize> {
        None
    }

    /// Releases any resources held by the source.
    fn close(&mut self);
}

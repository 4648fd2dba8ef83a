use crate::shared::frame::Frame;
use crate::stream::domain::frame_source::FrameSource;

/// Produces `count` blank RGB frames of a fixed size.
///
/// Drives the tracking loop when detections come from a recording rather
/// than from pixels.
pub struct SyntheticFrameSource {
    width: u32,
    height: u32,
    count: usize,
    frame_interval_us: Option<u64>,
    closed: bool,
}

impl SyntheticFrameSource {
    pub fn new(width: u32, height: u32, count: usize) -> Self {
        Self {
            width,
            height,
            count,
            frame_interval_us: None,
            closed: false,
        }
    }

    /// Stamps frame `i` with `i * 1e6 / fps` microseconds.
    pub fn with_fps(mut self, fps: f64) -> Self {
        if fps > 0.0 {
            self.frame_interval_us = Some((1_000_000.0 / fps).round() as u64);
        }
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSource for SyntheticFrameSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let (width, height, interval) = (self.width, self.height, self.frame_interval_us);
        Box::new((0..self.count).map(move |i| {
            let frame = Frame::blank(width, height, i);
            Ok(match interval {
                Some(us) => frame.with_timestamp_us(i as u64 * us),
                None => frame,
            })
        }))
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.count)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

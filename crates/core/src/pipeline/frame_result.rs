use serde::{Deserialize, Serialize};

use crate::detection::domain::hand_landmarks::HandLandmarks;
use crate::pipeline::detection_gate::DetectionOutcome;
use crate::shared::region::Region;

/// Everything the landmarker produced for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_us: Option<u64>,
    /// Raw detector output, or `Skipped` when tracking was at capacity.
    pub detection: DetectionOutcome,
    /// Tracked and detected regions after association, before clipping.
    pub associated: Vec<Region>,
    /// Regions handed to the refiner.
    pub regions: Vec<Region>,
    /// Refiner output, index-aligned with `regions`.
    pub landmarks: Vec<HandLandmarks>,
    /// Regions tracked into the next frame.
    pub next_regions: Vec<Region>,
}

impl FrameResult {
    pub fn hand_count(&self) -> usize {
        self.regions.len()
    }
}

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::json_file::{read_json, JsonFileError};
use crate::shared::region::Region;

/// Detections recorded for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub index: usize,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// On-disk detection log: `{"frames": [{"index": 0, "regions": [...]}, ...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionLog {
    #[serde(default)]
    pub frames: Vec<RecordedFrame>,
}

/// Replays recorded detections by frame index.
///
/// Frames absent from the log detect nothing. Lets the tracking loop be
/// driven deterministically without a palm model.
pub struct ReplayDetector {
    cache: Arc<HashMap<usize, Vec<Region>>>,
    invocations: usize,
}

impl ReplayDetector {
    pub fn new(cache: Arc<HashMap<usize, Vec<Region>>>) -> Self {
        Self {
            cache,
            invocations: 0,
        }
    }

    /// Later entries for the same frame index replace earlier ones.
    pub fn from_log(log: DetectionLog) -> Self {
        let cache: HashMap<usize, Vec<Region>> = log
            .frames
            .into_iter()
            .map(|frame| (frame.index, frame.regions))
            .collect();
        Self::new(Arc::new(cache))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, JsonFileError> {
        let log: DetectionLog = read_json(path)?;
        log::info!(
            "Loaded detection log {} ({} frames)",
            path.display(),
            log.frames.len()
        );
        Ok(Self::from_log(log))
    }

    /// One past the highest recorded frame index, or `None` for an empty log.
    pub fn frame_span(&self) -> Option<usize> {
        self.cache.keys().max().map(|&max| max.saturating_add(1))
    }

    /// How many times the detector has actually been asked to run.
    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

impl RegionDetector for ReplayDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, CollaboratorError> {
        self.invocations += 1;
        Ok(self.cache.get(&frame.index()).cloned().unwrap_or_default())
    }
}

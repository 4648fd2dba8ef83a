use serde::{Deserialize, Serialize};

use crate::detection::domain::region_detector::RegionDetector;
use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Whether the detector ran on a frame, and what it found if it did.
///
/// `Invoked(vec![])` (the detector ran and saw nothing) is distinct from
/// `Skipped` (the detector was not asked).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "regions", rename_all = "lowercase")]
pub enum DetectionOutcome {
    Invoked(Vec<Region>),
    Skipped,
}

impl DetectionOutcome {
    /// Detected regions; empty when skipped.
    pub fn regions(&self) -> &[Region] {
        match self {
            DetectionOutcome::Invoked(regions) => regions,
            DetectionOutcome::Skipped => &[],
        }
    }

    pub fn was_invoked(&self) -> bool {
        matches!(self, DetectionOutcome::Invoked(_))
    }
}

/// Runs `detector` on `frame` unless `skip` is set.
pub fn detect_unless(
    skip: bool,
    frame: &Frame,
    detector: &mut dyn RegionDetector,
) -> Result<DetectionOutcome, CollaboratorError> {
    if skip {
        log::debug!("frame {}: tracking at capacity, detector skipped", frame.index());
        return Ok(DetectionOutcome::Skipped);
    }
    let regions = detector.detect(frame)?;
    log::debug!(
        "frame {}: detector found {} regions",
        frame.index(),
        regions.len()
    );
    Ok(DetectionOutcome::Invoked(regions))
}

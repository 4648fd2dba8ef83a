use crate::detection::domain::hand_landmarks::HandLandmarks;
use crate::detection::domain::region_refiner::{RegionRefiner, Refinement};
use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Stand-in refiner that keeps every hand exactly where it was.
///
/// Each input region is carried into the next frame unchanged, with
/// unobserved landmarks centered on it. Paired with `ReplayDetector`, this
/// replays the region flow of a recorded stream.
#[derive(Debug, Default)]
pub struct ReplayRefiner {
    invocations: usize,
}

impl ReplayRefiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

impl RegionRefiner for ReplayRefiner {
    fn refine(
        &mut self,
        _frame: &Frame,
        regions: &[Region],
    ) -> Result<Refinement, CollaboratorError> {
        self.invocations += 1;
        Ok(Refinement {
            landmarks: regions.iter().map(HandLandmarks::unobserved).collect(),
            next_regions: regions.iter().map(|r| Some(*r)).collect(),
        })
    }
}

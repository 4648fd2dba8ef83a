use crate::detection::domain::hand_region_builder::HandRegionBuilder;
use crate::detection::domain::landmark_estimator::LandmarkEstimator;
use crate::detection::domain::region_refiner::{RegionRefiner, Refinement};
use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Presence below which a hand counts as lost.
pub const DEFAULT_MIN_PRESENCE: f64 = 0.5;

/// Refiner built from a per-hand landmark model.
///
/// Runs the estimator once per region. Hands whose presence falls below
/// `min_presence` keep their landmarks in the output but are not tracked
/// into the next frame; the others are re-boxed from their landmarks.
pub struct LandmarkRefiner {
    estimator: Box<dyn LandmarkEstimator>,
    builder: HandRegionBuilder,
    min_presence: f64,
}

impl LandmarkRefiner {
    pub fn new(
        estimator: Box<dyn LandmarkEstimator>,
        builder: HandRegionBuilder,
        min_presence: f64,
    ) -> Self {
        Self {
            estimator,
            builder,
            min_presence,
        }
    }

    pub fn with_defaults(estimator: Box<dyn LandmarkEstimator>) -> Self {
        Self::new(estimator, HandRegionBuilder::default(), DEFAULT_MIN_PRESENCE)
    }
}

impl RegionRefiner for LandmarkRefiner {
    fn refine(&mut self, frame: &Frame, regions: &[Region]) -> Result<Refinement, CollaboratorError> {
        let aspect_ratio = frame.aspect_ratio().unwrap_or(1.0);
        let mut refinement = Refinement {
            landmarks: Vec::with_capacity(regions.len()),
            next_regions: Vec::with_capacity(regions.len()),
        };

        for (i, region) in regions.iter().enumerate() {
            let hand = self.estimator.estimate(frame, region)?;
            // NaN presence counts as lost.
            let next = if !(hand.presence() >= self.min_presence) {
                log::debug!(
                    "frame {}: hand #{i} presence {:.2} below {:.2}, dropping",
                    frame.index(),
                    hand.presence(),
                    self.min_presence
                );
                None
            } else {
                self.builder.build(&hand, aspect_ratio)
            };
            refinement.landmarks.push(hand);
            refinement.next_regions.push(next);
        }
        Ok(refinement)
    }
}

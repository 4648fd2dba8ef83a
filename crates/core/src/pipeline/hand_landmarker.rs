use crate::detection::domain::region_associator::RegionAssociator;
use crate::detection::domain::region_detector::RegionDetector;
use crate::detection::domain::region_refiner::{RegionRefiner, Refinement};
use crate::detection::infrastructure::similarity_factory::create_similarity;
use crate::shared::error::{ConfigError, FrameError};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::capacity_clipper::clip;
use super::capacity_gate::should_skip_detection;
use super::detection_gate::detect_unless;
use super::frame_result::FrameResult;
use super::region_store::RegionStore;
use super::tracking_config::TrackingConfig;

/// Detect-or-track loop for a single stream.
///
/// Per frame: read the regions tracked from the previous frame, run the
/// detector only if fewer than `max_regions` hands are tracked, merge fresh
/// detections into the tracked set, cap the result at `max_regions`, refine
/// it, and keep the refiner's next-frame regions for the following frame.
///
/// Frames must be fed in stream order. A frame that fails leaves the tracked
/// set exactly as it was before the frame.
pub struct HandLandmarker {
    detector: Box<dyn RegionDetector>,
    refiner: Box<dyn RegionRefiner>,
    associator: RegionAssociator,
    store: RegionStore,
    max_regions: usize,
}

impl HandLandmarker {
    pub fn new(
        detector: Box<dyn RegionDetector>,
        refiner: Box<dyn RegionRefiner>,
        config: &TrackingConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            detector,
            refiner,
            associator: RegionAssociator::new(
                create_similarity(config.similarity),
                config.min_similarity_threshold,
            ),
            store: RegionStore::new(),
            max_regions: config.max_regions,
        })
    }

    pub fn process(&mut self, frame: &Frame) -> Result<FrameResult, FrameError> {
        let index = frame.index();
        let tracked = self.store.snapshot();

        let skip = should_skip_detection(&tracked, self.max_regions);
        let detection = detect_unless(skip, frame, self.detector.as_mut())
            .map_err(|source| FrameError::Detector {
                frame: index,
                source,
            })?;

        let associated = self.associator.associate(&tracked, detection.regions());
        let regions = clip(&associated, self.max_regions);
        let refinement = self.refine(frame, &regions)?;

        let next_regions = refinement.surviving_regions();
        if next_regions.len() < regions.len() {
            log::debug!(
                "frame {index}: lost {} of {} hands",
                regions.len() - next_regions.len(),
                regions.len()
            );
        }
        self.store.commit(next_regions.clone());

        Ok(FrameResult {
            frame_index: index,
            timestamp_us: frame.timestamp_us(),
            detection,
            associated,
            regions,
            landmarks: refinement.landmarks,
            next_regions,
        })
    }

    /// Regions that will be treated as tracked on the next frame.
    pub fn tracked_regions(&self) -> &[Region] {
        self.store.regions()
    }

    pub fn max_regions(&self) -> usize {
        self.max_regions
    }

    /// Forgets all tracked hands, e.g. after a seek.
    pub fn reset(&mut self) {
        self.store.clear();
    }

    fn refine(&mut self, frame: &Frame, regions: &[Region]) -> Result<Refinement, FrameError> {
        if regions.is_empty() {
            return Ok(Refinement::empty());
        }
        let index = frame.index();
        let refinement =
            self.refiner
                .refine(frame, regions)
                .map_err(|source| FrameError::Refiner {
                    frame: index,
                    source,
                })?;
        if refinement.landmarks.len() != regions.len()
            || refinement.next_regions.len() != regions.len()
        {
            return Err(FrameError::RefinerShape {
                frame: index,
                expected: regions.len(),
                landmarks: refinement.landmarks.len(),
                regions: refinement.next_regions.len(),
            });
        }
        Ok(refinement)
    }
}

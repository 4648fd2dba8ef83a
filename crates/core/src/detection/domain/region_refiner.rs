use crate::detection::domain::hand_landmarks::HandLandmarks;
use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Output of one refiner call, index-aligned with the input regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Refinement {
    /// One landmark set per input region.
    pub landmarks: Vec<HandLandmarks>,
    /// One entry per input region: the region predicted for the next frame,
    /// or `None` when the refiner lost the hand (e.g. presence too low).
    pub next_regions: Vec<Option<Region>>,
}

impl Refinement {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Regions that survive into the next frame, in input order.
    pub fn surviving_regions(&self) -> Vec<Region> {
        self.next_regions.iter().flatten().copied().collect()
    }
}

/// Domain interface for per-region landmark estimation.
///
/// Must return exactly one landmark set and one next-frame entry per input
/// region, in input order. An empty input yields an empty refinement.
pub trait RegionRefiner: Send {
    fn refine(&mut self, frame: &Frame, regions: &[Region]) -> Result<Refinement, CollaboratorError>;
}

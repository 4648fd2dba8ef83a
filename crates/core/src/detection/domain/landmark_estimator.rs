use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::hand_landmarks::HandLandmarks;

/// Domain interface for a single-hand landmark model.
///
/// Given a frame and the region believed to contain one hand, returns the
/// hand's landmarks. A low `presence` means the region no longer holds a hand.
pub trait LandmarkEstimator: Send {
    fn estimate(&mut self, frame: &Frame, region: &Region) -> Result<HandLandmarks, CollaboratorError>;
}

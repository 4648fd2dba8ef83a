use crate::shared::error::CollaboratorError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for whole-frame hand detection.
///
/// Called at most once per frame, and only when fewer hands are tracked than
/// the configured capacity. Implementations may keep state, hence `&mut self`.
pub trait RegionDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, CollaboratorError>;
}

use crate::shared::region::Region;

/// True when the tracked set already holds as many hands as the stream may
/// track, so running the detector could not add any.
///
/// An empty tracked set never skips. Callers guarantee `max_regions >= 1`.
pub fn should_skip_detection(tracked: &[Region], max_regions: usize) -> bool {
    tracked.len() >= max_regions
}

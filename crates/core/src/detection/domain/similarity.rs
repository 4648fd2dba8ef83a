use crate::shared::region::Region;

/// Scores how likely two regions are to cover the same physical hand.
///
/// Implementations must be symmetric and return a value in `[0, 1]`: `1` for
/// identical non-degenerate regions, `0` for disjoint or degenerate ones.
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, a: &Region, b: &Region) -> f64;
}

/// IoU of the regions' axis-aligned bounding boxes.
///
/// Cheap, and close enough to the rotated IoU for the small rotations typical
/// between consecutive frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct AxisAlignedIou;

impl SimilarityMetric for AxisAlignedIou {
    fn similarity(&self, a: &Region, b: &Region) -> f64 {
        a.iou(b)
    }
}

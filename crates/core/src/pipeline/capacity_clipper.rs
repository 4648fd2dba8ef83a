use crate::shared::region::Region;

/// Keeps the first `max_regions` regions, in order.
///
/// Tracked hands come first in an association result, so they survive ahead
/// of newly detected ones.
pub fn clip(regions: &[Region], max_regions: usize) -> Vec<Region> {
    if regions.len() > max_regions {
        log::debug!(
            "clipping {} regions to capacity {max_regions}",
            regions.len()
        );
    }
    regions.iter().take(max_regions).copied().collect()
}

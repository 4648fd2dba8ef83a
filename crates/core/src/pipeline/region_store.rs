use crate::shared::region::Region;

/// Regions carried from one frame's refiner output to the next frame.
///
/// Starts empty and is only ever replaced whole, after a frame has been
/// fully processed. Readers get a copy, so a frame in progress never
/// observes a partially written set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionStore {
    regions: Vec<Region>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents, for use as this frame's tracked set.
    pub fn snapshot(&self) -> Vec<Region> {
        self.regions.clone()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Replaces the contents in full.
    pub fn commit(&mut self, regions: Vec<Region>) {
        log::trace!(
            "region store: {} -> {} regions",
            self.regions.len(),
            regions.len()
        );
        self.regions = regions;
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

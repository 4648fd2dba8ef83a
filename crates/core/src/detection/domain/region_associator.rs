use crate::detection::domain::similarity::SimilarityMetric;
use crate::shared::region::Region;

/// Reconciles regions tracked from the previous frame with fresh detections.
///
/// A `(tracked, detected)` pair scoring at least `min_similarity` is the same
/// hand. Each detection looks only at its own most similar tracked region,
/// ties going to the earlier tracked region. When several detections pick
/// the same tracked region, the most similar one (earliest on ties) replaces
/// its geometry and the rest are duplicates of that hand and are dropped.
/// Tracked regions no detection picked are kept as they are.
///
/// Output order: one entry per tracked region, in tracked order, followed by
/// detections that matched no tracked region, in detector order.
pub struct RegionAssociator {
    metric: Box<dyn SimilarityMetric>,
    min_similarity: f64,
}

impl RegionAssociator {
    pub fn new(metric: Box<dyn SimilarityMetric>, min_similarity: f64) -> Self {
        Self {
            metric,
            min_similarity,
        }
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    pub fn associate(&self, tracked: &[Region], detected: &[Region]) -> Vec<Region> {
        if detected.is_empty() {
            return tracked.to_vec();
        }
        if tracked.is_empty() {
            return detected.to_vec();
        }

        // Per tracked index: (detection index, similarity) of the winner.
        let mut confirmed_by: Vec<Option<(usize, f64)>> = vec![None; tracked.len()];
        let mut new_regions = Vec::new();
        let mut duplicates = 0;

        for (di, d) in detected.iter().enumerate() {
            let Some((ti, score)) = self.best_match(tracked, d) else {
                new_regions.push(*d);
                continue;
            };
            match confirmed_by[ti] {
                Some((_, best)) if best >= score => {
                    log::trace!("detection #{di} duplicates tracked #{ti} (similarity {score:.3})");
                    duplicates += 1;
                }
                previous => {
                    if previous.is_some() {
                        duplicates += 1;
                    }
                    log::trace!("tracked #{ti} confirmed by detection #{di} (similarity {score:.3})");
                    confirmed_by[ti] = Some((di, score));
                }
            }
        }

        let confirmed = confirmed_by.iter().flatten().count();
        let mut result: Vec<Region> = tracked
            .iter()
            .zip(&confirmed_by)
            .map(|(t, det)| det.map_or(*t, |(di, _)| detected[di]))
            .collect();
        result.extend(new_regions);

        log::debug!(
            "associated {} tracked + {} detected -> {} regions ({} confirmed, {} new, {} duplicates)",
            tracked.len(),
            detected.len(),
            result.len(),
            confirmed,
            result.len() - tracked.len(),
            duplicates
        );
        result
    }

    /// The most similar tracked region at or above the threshold, earliest
    /// index on ties. NaN scores never match.
    fn best_match(&self, tracked: &[Region], detection: &Region) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (ti, t) in tracked.iter().enumerate() {
            let score = self.metric.similarity(t, detection);
            if !(score >= self.min_similarity) {
                continue;
            }
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((ti, score));
            }
        }
        best
    }
}

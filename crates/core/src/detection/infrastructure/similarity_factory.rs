use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::detection::domain::similarity::{AxisAlignedIou, SimilarityMetric};
use crate::shared::region::Region;

use super::math::{bbox_iou, convex_iou};

/// Which overlap measure decides whether two regions are the same hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityKind {
    #[default]
    AxisAligned,
    Rotated,
}

impl fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityKind::AxisAligned => f.write_str("axis-aligned"),
            SimilarityKind::Rotated => f.write_str("rotated"),
        }
    }
}

impl FromStr for SimilarityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axis-aligned" | "aabb" => Ok(SimilarityKind::AxisAligned),
            "rotated" => Ok(SimilarityKind::Rotated),
            other => Err(format!(
                "unknown similarity '{other}', expected axis-aligned or rotated"
            )),
        }
    }
}

/// IoU of the rotated rectangles themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotatedIou;

impl SimilarityMetric for RotatedIou {
    fn similarity(&self, a: &Region, b: &Region) -> f64 {
        if a.is_degenerate() || b.is_degenerate() {
            return 0.0;
        }
        if a.rotation == 0.0 && b.rotation == 0.0 {
            return bbox_iou(&a.bounding_box(), &b.bounding_box());
        }
        convex_iou(&a.corners(), &b.corners())
    }
}

pub fn create_similarity(kind: SimilarityKind) -> Box<dyn SimilarityMetric> {
    log::debug!("Using {kind} IoU for region association");
    match kind {
        SimilarityKind::AxisAligned => Box::new(AxisAlignedIou),
        SimilarityKind::Rotated => Box::new(RotatedIou),
    }
}

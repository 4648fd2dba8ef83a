use serde::{Deserialize, Serialize};

/// A normalized, possibly rotated rectangle locating a hand in a frame.
///
/// Coordinates are fractions of the frame size, so `(0.5, 0.5)` is the frame
/// center regardless of resolution. `rotation` is in radians, clockwise in
/// image coordinates (y pointing down). Identity is purely positional.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Detector confidence, if the region came straight from a detector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Region {
    pub fn new(x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            x_center,
            y_center,
            width,
            height,
            rotation: 0.0,
            score: None,
        }
    }

    /// Builds an upright region from its top-left corner and size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x + width / 2.0, y + height / 2.0, width, height)
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_score(self, score: f64) -> Self {
        Self {
            score: Some(score),
            ..self
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Zero-sized or non-finite regions never overlap anything.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x_center.is_finite()
            || !self.y_center.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
            || !self.rotation.is_finite()
    }

    /// Corner points in order top-left, top-right, bottom-right, bottom-left
    /// (before rotation), rotated about the center.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let (sin, cos) = self.rotation.sin_cos();
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
            (
                self.x_center + dx * cos - dy * sin,
                self.y_center + dx * sin + dy * cos,
            )
        })
    }

    /// Axis-aligned box enclosing the rotated rectangle, as `[x1, y1, x2, y2]`.
    pub fn bounding_box(&self) -> [f64; 4] {
        if self.rotation == 0.0 {
            let hw = self.width / 2.0;
            let hh = self.height / 2.0;
            return [
                self.x_center - hw,
                self.y_center - hh,
                self.x_center + hw,
                self.y_center + hh,
            ];
        }
        self.corners().iter().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |[x1, y1, x2, y2], &(x, y)| [x1.min(x), y1.min(y), x2.max(x), y2.max(y)],
        )
    }

    /// Intersection-over-union of the two regions' bounding boxes.
    pub fn iou(&self, other: &Region) -> f64 {
        if self.is_degenerate() || other.is_degenerate() {
            return 0.0;
        }
        let a = self.bounding_box();
        let b = other.bounding_box();

        let ix1 = a[0].max(b[0]);
        let iy1 = a[1].max(b[1]);
        let ix2 = a[2].min(b[2]);
        let iy2 = a[3].min(b[3]);

        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = (a[2] - a[0]) * (a[3] - a[1]);
        let area_b = (b[2] - b[0]) * (b[3] - b[1]);
        inter / (area_a + area_b - inter)
    }
}

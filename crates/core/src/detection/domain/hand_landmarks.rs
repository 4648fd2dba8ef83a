//! 21-point hand landmarks with handedness and orientation.
//!
//! Image landmarks are normalized to the frame (x, y in `[0, 1]`, z relative
//! to the wrist at roughly the same scale as x). World landmarks are metric,
//! centered on the hand.

use serde::{Deserialize, Serialize};

use crate::shared::region::Region;

pub const NUM_HAND_LANDMARKS: usize = 21;

/// Names for the hand landmarks, in model output order.
///
/// MCP, PIP and DIP are the knuckle joints from the palm outwards; CMC is the
/// base joint of the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

const PALM_LANDMARKS: [LandmarkIdx; 6] = [
    LandmarkIdx::Wrist,
    LandmarkIdx::ThumbCmc,
    LandmarkIdx::IndexFingerMcp,
    LandmarkIdx::MiddleFingerMcp,
    LandmarkIdx::RingFingerMcp,
    LandmarkIdx::PinkyMcp,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    landmarks: [[f64; 3]; NUM_HAND_LANDMARKS],
    world_landmarks: [[f64; 3]; NUM_HAND_LANDMARKS],
    handedness: Handedness,
    handedness_score: f64,
    presence: f64,
}

impl Default for HandLandmarks {
    fn default() -> Self {
        Self {
            landmarks: [[0.0; 3]; NUM_HAND_LANDMARKS],
            world_landmarks: [[0.0; 3]; NUM_HAND_LANDMARKS],
            handedness: Handedness::Right,
            handedness_score: 0.0,
            presence: 0.0,
        }
    }
}

impl HandLandmarks {
    pub fn new(
        landmarks: [[f64; 3]; NUM_HAND_LANDMARKS],
        world_landmarks: [[f64; 3]; NUM_HAND_LANDMARKS],
        handedness: Handedness,
        handedness_score: f64,
        presence: f64,
    ) -> Self {
        Self {
            landmarks,
            world_landmarks,
            handedness,
            handedness_score,
            presence,
        }
    }

    /// Placeholder landmarks with every point on the region center and zero
    /// presence. Used when no landmark model is available.
    pub fn unobserved(region: &Region) -> Self {
        Self {
            landmarks: [[region.x_center, region.y_center, 0.0]; NUM_HAND_LANDMARKS],
            ..Self::default()
        }
    }

    pub fn landmarks(&self) -> &[[f64; 3]; NUM_HAND_LANDMARKS] {
        &self.landmarks
    }

    pub fn world_landmarks(&self) -> &[[f64; 3]; NUM_HAND_LANDMARKS] {
        &self.world_landmarks
    }

    pub fn landmark(&self, idx: LandmarkIdx) -> [f64; 3] {
        self.landmarks[idx as usize]
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn handedness_score(&self) -> f64 {
        self.handedness_score
    }

    /// Confidence that a hand is actually inside the refined region.
    pub fn presence(&self) -> f64 {
        self.presence
    }

    /// Mean of the landmarks that surround the palm, in normalized image
    /// coordinates.
    pub fn palm_center(&self) -> (f64, f64) {
        let (sx, sy) = PALM_LANDMARKS.iter().fold((0.0, 0.0), |(sx, sy), idx| {
            let [x, y, _] = self.landmark(*idx);
            (sx + x, sy + y)
        });
        let n = PALM_LANDMARKS.len() as f64;
        (sx / n, sy / n)
    }

    /// Clockwise in-plane rotation of the palm, in radians. Zero means the
    /// fingers point straight up.
    ///
    /// Measured along the wrist → middle-finger MCP axis. `aspect_ratio` is
    /// the frame's width over height, needed because normalized coordinates
    /// stretch non-square frames. Returns `None` when both points coincide.
    pub fn rotation_radians(&self, aspect_ratio: f64) -> Option<f64> {
        let [wx, wy, _] = self.landmark(LandmarkIdx::Wrist);
        let [mx, my, _] = self.landmark(LandmarkIdx::MiddleFingerMcp);
        let dx = (mx - wx) * aspect_ratio;
        let dy = my - wy;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(dx.atan2(-dy))
    }

    /// Angle of the major principal axis of the 2D landmark cloud, in
    /// radians within `(-pi/2, pi/2]`, measured clockwise from the x axis.
    ///
    /// Returns `None` when all landmarks coincide.
    pub fn principal_axis_angle(&self, aspect_ratio: f64) -> Option<f64> {
        let points: Vec<(f64, f64)> = self
            .landmarks
            .iter()
            .map(|[x, y, _]| (x * aspect_ratio, *y))
            .collect();
        principal_axis_angle(&points)
    }
}

/// PCA on a 2D point set: returns the direction of largest variance.
fn principal_axis_angle(points: &[(f64, f64)]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (mx, my) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    let (mx, my) = (mx / n, my / n);

    let (mut cxx, mut cyy, mut cxy) = (0.0, 0.0, 0.0);
    for (x, y) in points {
        let dx = x - mx;
        let dy = y - my;
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }
    if cxx + cyy < 1e-12 {
        return None;
    }

    let angle = 0.5 * (2.0 * cxy).atan2(cxx - cyy);
    if angle <= -std::f64::consts::FRAC_PI_2 {
        Some(angle + std::f64::consts::PI)
    } else {
        Some(angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn hand_with(wrist: (f64, f64), middle_mcp: (f64, f64)) -> HandLandmarks {
        let mut pts = [[0.5, 0.5, 0.0]; NUM_HAND_LANDMARKS];
        pts[LandmarkIdx::Wrist as usize] = [wrist.0, wrist.1, 0.0];
        pts[LandmarkIdx::MiddleFingerMcp as usize] = [middle_mcp.0, middle_mcp.1, 0.0];
        HandLandmarks::new(pts, [[0.0; 3]; NUM_HAND_LANDMARKS], Handedness::Left, 0.9, 0.95)
    }

    fn hand_along(direction: (f64, f64)) -> HandLandmarks {
        let mut pts = [[0.0; 3]; NUM_HAND_LANDMARKS];
        for (i, p) in pts.iter_mut().enumerate() {
            let t = i as f64 / 20.0;
            *p = [0.5 + direction.0 * t, 0.5 + direction.1 * t, 0.0];
        }
        HandLandmarks::new(pts, [[0.0; 3]; NUM_HAND_LANDMARKS], Handedness::Right, 0.8, 0.9)
    }

    // ── accessors ───────────────────────────────────────────────────

    #[test]
    fn test_accessors() {
        let hand = hand_with((0.5, 0.8), (0.5, 0.5));
        assert_eq!(hand.handedness(), Handedness::Left);
        assert_relative_eq!(hand.handedness_score(), 0.9);
        assert_relative_eq!(hand.presence(), 0.95);
        assert_eq!(hand.landmark(LandmarkIdx::Wrist), [0.5, 0.8, 0.0]);
        assert_eq!(hand.landmarks().len(), NUM_HAND_LANDMARKS);
        assert_eq!(hand.world_landmarks().len(), NUM_HAND_LANDMARKS);
    }

    #[test]
    fn test_landmark_idx_covers_all_points() {
        assert_eq!(LandmarkIdx::PinkyTip as usize, NUM_HAND_LANDMARKS - 1);
    }

    #[test]
    fn test_unobserved_sits_on_region_center() {
        let region = Region::new(0.3, 0.6, 0.2, 0.2);
        let hand = HandLandmarks::unobserved(&region);
        assert_relative_eq!(hand.presence(), 0.0);
        assert!(hand.landmarks().iter().all(|p| *p == [0.3, 0.6, 0.0]));
        let (cx, cy) = hand.palm_center();
        assert_relative_eq!(cx, 0.3, epsilon = 1e-9);
        assert_relative_eq!(cy, 0.6, epsilon = 1e-9);
    }

    // ── palm_center ─────────────────────────────────────────────────

    #[test]
    fn test_palm_center_averages_palm_points() {
        let mut pts = [[0.9, 0.9, 0.0]; NUM_HAND_LANDMARKS];
        for (i, idx) in PALM_LANDMARKS.iter().enumerate() {
            pts[*idx as usize] = [0.1 * i as f64, 0.2, 0.0];
        }
        let hand = HandLandmarks::new(pts, [[0.0; 3]; NUM_HAND_LANDMARKS], Handedness::Right, 1.0, 1.0);
        let (cx, cy) = hand.palm_center();
        // 0.1 * (0 + 1 + 2 + 3 + 4 + 5) / 6 = 0.25
        assert_relative_eq!(cx, 0.25, epsilon = 1e-9);
        assert_relative_eq!(cy, 0.2, epsilon = 1e-9);
    }

    // ── rotation ────────────────────────────────────────────────────

    #[rstest]
    #[case::upright((0.5, 0.8), (0.5, 0.5), 0.0)]
    #[case::pointing_right((0.2, 0.5), (0.5, 0.5), FRAC_PI_2)]
    #[case::pointing_left((0.8, 0.5), (0.5, 0.5), -FRAC_PI_2)]
    #[case::diagonal((0.5, 0.5), (0.6, 0.4), FRAC_PI_4)]
    fn test_rotation_radians(
        #[case] wrist: (f64, f64),
        #[case] mcp: (f64, f64),
        #[case] expected: f64,
    ) {
        let hand = hand_with(wrist, mcp);
        assert_relative_eq!(hand.rotation_radians(1.0).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_upside_down_is_pi() {
        let hand = hand_with((0.5, 0.2), (0.5, 0.5));
        assert_relative_eq!(
            hand.rotation_radians(1.0).unwrap().abs(),
            std::f64::consts::PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rotation_accounts_for_aspect_ratio() {
        // 0.1 normalized in x on a 2:1 frame is twice as far as 0.1 in y.
        let hand = hand_with((0.5, 0.5), (0.6, 0.4));
        let expected = 2.0f64.atan2(1.0);
        assert_relative_eq!(hand.rotation_radians(2.0).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_none_when_points_coincide() {
        let hand = hand_with((0.5, 0.5), (0.5, 0.5));
        assert!(hand.rotation_radians(1.0).is_none());
    }

    // ── principal axis ──────────────────────────────────────────────

    #[rstest]
    #[case::horizontal((0.3, 0.0), 0.0)]
    #[case::vertical((0.0, 0.3), FRAC_PI_2)]
    #[case::diagonal_down((0.2, 0.2), FRAC_PI_4)]
    #[case::diagonal_up((0.2, -0.2), -FRAC_PI_4)]
    fn test_principal_axis_angle(#[case] direction: (f64, f64), #[case] expected: f64) {
        let hand = hand_along(direction);
        assert_relative_eq!(hand.principal_axis_angle(1.0).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_principal_axis_none_for_collapsed_hand() {
        let hand = HandLandmarks::unobserved(&Region::new(0.5, 0.5, 0.1, 0.1));
        assert!(hand.principal_axis_angle(1.0).is_none());
    }

    #[test]
    fn test_principal_axis_empty_points() {
        assert!(principal_axis_angle(&[]).is_none());
    }

    // ── serde ───────────────────────────────────────────────────────

    #[test]
    fn test_serializes_handedness_lowercase() {
        let json = serde_json::to_string(&hand_with((0.5, 0.8), (0.5, 0.5))).unwrap();
        assert!(json.contains(r#""handedness":"left""#));
    }
}

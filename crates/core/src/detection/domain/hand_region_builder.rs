use std::f64::consts::FRAC_PI_2;

use crate::shared::region::Region;

use super::hand_landmarks::HandLandmarks;

/// Default enlargement of the landmark box, so next frame's region still
/// covers the hand after it moves.
pub const DEFAULT_SCALE: f64 = 2.0;

/// Default shift along the hand's own vertical axis, as a fraction of the
/// region side. Negative moves toward the fingertips.
pub const DEFAULT_SHIFT_Y: f64 = -0.1;

/// Turns one frame's landmarks into the region to track on the next frame.
///
/// The region is aligned with the palm (see `HandLandmarks::rotation_radians`),
/// squared on its long side, scaled and shifted toward the fingers.
pub struct HandRegionBuilder {
    scale: f64,
    shift_y: f64,
}

impl Default for HandRegionBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, DEFAULT_SHIFT_Y)
    }
}

impl HandRegionBuilder {
    pub fn new(scale: f64, shift_y: f64) -> Self {
        Self { scale, shift_y }
    }

    /// `None` when the landmarks carry no usable extent or orientation.
    pub fn build(&self, hand: &HandLandmarks, aspect_ratio: f64) -> Option<Region> {
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return None;
        }
        // Principal axis is sign-ambiguous; only used when the palm axis is gone.
        let rotation = hand
            .rotation_radians(aspect_ratio)
            .or_else(|| hand.principal_axis_angle(aspect_ratio).map(|a| a + FRAC_PI_2))?;
        let (sin, cos) = rotation.sin_cos();

        // Landmarks in the hand's frame, x scaled so both axes share units.
        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for [x, y, _] in hand.landmarks() {
            let px = x * aspect_ratio;
            let u = px * cos + y * sin;
            let v = -px * sin + y * cos;
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        let side = (u_max - u_min).max(v_max - v_min) * self.scale;
        if !(side > 0.0) {
            return None;
        }
        let cu = (u_min + u_max) / 2.0;
        let cv = (v_min + v_max) / 2.0 + self.shift_y * side;

        let px = cu * cos - cv * sin;
        let y = cu * sin + cv * cos;
        Some(Region::new(px / aspect_ratio, y, side / aspect_ratio, side).with_rotation(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::hand_landmarks::{Handedness, LandmarkIdx, NUM_HAND_LANDMARKS};
    use approx::assert_relative_eq;

    fn hand_with(wrist: (f64, f64), middle_mcp: (f64, f64)) -> HandLandmarks {
        let mut pts = [[middle_mcp.0, middle_mcp.1, 0.0]; NUM_HAND_LANDMARKS];
        pts[LandmarkIdx::Wrist as usize] = [wrist.0, wrist.1, 0.0];
        HandLandmarks::new(pts, [[0.0; 3]; NUM_HAND_LANDMARKS], Handedness::Right, 0.9, 0.9)
    }

    #[test]
    fn test_upright_hand() {
        let hand = hand_with((0.5, 0.8), (0.5, 0.5));
        let region = HandRegionBuilder::default().build(&hand, 1.0).unwrap();

        // Extent 0.3 doubled to 0.6, center 0.65 shifted up by 0.06.
        assert_relative_eq!(region.x_center, 0.5, epsilon = 1e-9);
        assert_relative_eq!(region.y_center, 0.59, epsilon = 1e-9);
        assert_relative_eq!(region.width, 0.6, epsilon = 1e-9);
        assert_relative_eq!(region.height, 0.6, epsilon = 1e-9);
        assert_relative_eq!(region.rotation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hand_pointing_right_shifts_toward_fingers() {
        let hand = hand_with((0.2, 0.5), (0.5, 0.5));
        let region = HandRegionBuilder::default().build(&hand, 1.0).unwrap();

        assert_relative_eq!(region.rotation, FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(region.x_center, 0.41, epsilon = 1e-9);
        assert_relative_eq!(region.y_center, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_wide_frame_narrows_normalized_width() {
        let hand = hand_with((0.5, 0.8), (0.5, 0.5));
        let region = HandRegionBuilder::new(1.0, 0.0).build(&hand, 2.0).unwrap();

        assert_relative_eq!(region.height, 0.3, epsilon = 1e-9);
        assert_relative_eq!(region.width, 0.15, epsilon = 1e-9);
        assert_relative_eq!(region.x_center, 0.5, epsilon = 1e-9);
        assert_relative_eq!(region.y_center, 0.65, epsilon = 1e-9);
    }

    #[test]
    fn test_collapsed_landmarks_give_no_region() {
        let hand = HandLandmarks::unobserved(&Region::new(0.5, 0.5, 0.2, 0.2));
        assert!(HandRegionBuilder::default().build(&hand, 1.0).is_none());
    }

    #[test]
    fn test_invalid_aspect_ratio_gives_no_region() {
        let hand = hand_with((0.5, 0.8), (0.5, 0.5));
        assert!(HandRegionBuilder::default().build(&hand, 0.0).is_none());
        assert!(HandRegionBuilder::default().build(&hand, f64::NAN).is_none());
    }

    #[test]
    fn test_falls_back_to_principal_axis() {
        // Wrist on the middle MCP, fingers spread along x.
        let mut pts = [[0.5, 0.5, 0.0]; NUM_HAND_LANDMARKS];
        pts[LandmarkIdx::IndexFingerTip as usize] = [0.3, 0.5, 0.0];
        pts[LandmarkIdx::PinkyTip as usize] = [0.7, 0.5, 0.0];
        let hand = HandLandmarks::new(pts, [[0.0; 3]; NUM_HAND_LANDMARKS], Handedness::Left, 0.9, 0.9);

        let region = HandRegionBuilder::new(1.0, 0.0).build(&hand, 1.0).unwrap();

        assert_relative_eq!(region.rotation, FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(region.x_center, 0.5, epsilon = 1e-9);
        assert_relative_eq!(region.height, 0.4, epsilon = 1e-9);
    }
}

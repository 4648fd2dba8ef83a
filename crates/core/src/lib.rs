//! Detect-or-track orchestration for hand landmarking.
//!
//! A `HandLandmarker` runs an expensive region detector only while fewer
//! hands are tracked than the stream allows, merges fresh detections into
//! the regions carried over from the previous frame, caps the set, refines
//! it, and feeds the refined regions back for the next frame. Detector and
//! refiner are pluggable collaborators.

pub mod detection;
pub mod pipeline;
pub mod shared;
pub mod stream;

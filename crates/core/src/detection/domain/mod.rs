pub mod hand_landmarks;
pub mod hand_region_builder;
pub mod landmark_estimator;
pub mod region_associator;
pub mod region_detector;
pub mod region_refiner;
pub mod similarity;

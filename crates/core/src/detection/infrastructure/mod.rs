pub mod landmark_refiner;
pub mod math;
pub mod replay_detector;
pub mod replay_refiner;
pub mod similarity_factory;

pub mod capacity_clipper;
pub mod capacity_gate;
pub mod detection_gate;
pub mod frame_result;
pub mod hand_landmarker;
pub mod infrastructure;
pub mod pipeline_executor;
pub mod pipeline_logger;
pub mod region_store;
pub mod track_hands_use_case;
pub mod tracking_config;

pub mod frame_source;
pub mod result_sink;

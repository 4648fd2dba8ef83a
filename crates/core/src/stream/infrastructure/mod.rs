pub mod json_lines_sink;
pub mod synthetic_frame_source;

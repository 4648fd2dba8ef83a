pub mod constants;
pub mod error;
pub mod frame;
pub mod json_file;
pub mod region;

//! CLI command implementations

pub mod batch;
pub mod decode;
pub mod inspect;
pub mod json_output;

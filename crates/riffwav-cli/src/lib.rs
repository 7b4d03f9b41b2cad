//! riffwav CLI library.
//!
//! Command implementations and JSON output records for the `riffwav` binary.

pub mod commands;
pub mod input;

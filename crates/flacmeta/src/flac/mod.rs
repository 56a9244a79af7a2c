//! Parse FLAC metadata.

pub mod blocks;
pub mod config;
pub mod errors;
pub mod reader;

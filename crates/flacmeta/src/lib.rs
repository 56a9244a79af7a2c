#![warn(missing_docs)]

//! Read the metadata blocks at the start of a FLAC file.
//!
//! The entry point is [`FlacMetadata::read`], which consumes
//! the `fLaC` signature and every metadata block up to (and including)
//! the block marked "last". Audio frames are never touched.

pub mod common;
pub mod flac;

pub use flac::{
	config::FlacReaderConfig,
	errors::{FlacDecodeError, FlacReaderError},
	reader::{FlacMetaReader, FlacMetadata},
};

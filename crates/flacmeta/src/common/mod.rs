//! Structures shared by more than one container format

pub mod bytestring;
pub mod picturetype;
pub mod vorbiscomment;

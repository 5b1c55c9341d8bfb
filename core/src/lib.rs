//! Shared types for pulling font attachments out of media containers.
//!
//! The crate is deliberately free of I/O: it describes attachment tracks,
//! the font bytes that travel through a request, the failure taxonomy, and
//! the [`extract::AttachmentExtractor`] capability that the server implements
//! on top of ffmpeg.

pub mod data;
pub mod error;
pub mod extract;

pub use data::font_data::{FontBlob, FontIdentity, ResolvedFont};
pub use data::track::{position_of, AttachmentTrack};
pub use error::{Error, ExtractionFailure, ParseFailure, Result};
pub use extract::AttachmentExtractor;

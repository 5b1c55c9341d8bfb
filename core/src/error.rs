//! Error taxonomy.
//!
//! Only [`Error`] ever reaches an API caller. [`ExtractionFailure`] and
//! [`ParseFailure`] are kept as values so they can be logged and asserted on,
//! but callers fold them into "no bytes" and "no name" respectively.

use std::io;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The item id does not resolve to a video.
    #[error("item {0} is not a video")]
    NotFound(i64),

    /// The requested container index matches no attachment track.
    #[error("index {0} does not match any attachment track")]
    InvalidIndex(i32),

    #[error("media library error: {0}")]
    Library(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn library(msg: impl Into<String>) -> Self {
        Self::Library(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why an extraction produced no bytes.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    #[error("could not start extractor: {0}")]
    Spawn(#[source] io::Error),

    #[error("reading extractor output failed: {0}")]
    Io(#[source] io::Error),

    /// `None` when the process was terminated by a signal.
    #[error("extractor exited with status {0:?}")]
    Exit(Option<i32>),

    #[error("extractor did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("extractor produced no output")]
    Empty,

    #[error("extraction limiter is closed")]
    Closed,
}

/// Why a blob did not yield a family name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("not a font container")]
    UnknownFormat,

    #[error("{0} fonts are not supported")]
    Unsupported(&'static str),

    #[error("malformed font: {0}")]
    Malformed(String),

    #[error("missing `{0}` table")]
    MissingTable(&'static str),

    #[error("name table has no family name")]
    NoFamilyName,
}

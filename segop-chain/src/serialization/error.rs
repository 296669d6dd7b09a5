use std::io;

use thiserror::Error;

/// A serialization error.
// XXX refine error types -- better to use boxed errors?
#[derive(Error, Debug)]
pub enum SerializationError {
    /// An io error that prevented deserialization
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The data to be deserialized was malformed.
    // XXX refine errors
    #[error("parse error: {0}")]
    Parse(&'static str),
    /// The input ended before a length-prefixed value could be read in full.
    #[error("truncated input")]
    Truncated,
    /// A CompactSize prefix was used to encode a value that a shorter prefix
    /// could have encoded; only the shortest legal encoding is accepted.
    #[error("non-canonical CompactSize encoding")]
    NonCanonical,
}

impl SerializationError {
    /// `true` for the codec-level errors the CompactSize decoder can raise
    /// (as distinct from a generic [`SerializationError::Parse`]).
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Self::Truncated | Self::NonCanonical)
    }
}

use thiserror::Error;

/// Failure to read a WebVTT timestamp (`[hh:]mm:ss.ttt`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected 2 or 3 ':'-separated fields in '{0}'")]
    WrongFieldCount(String),

    #[error("bad {field} field in '{input}'")]
    BadField { field: &'static str, input: String },

    #[error("expected exactly 3 fractional digits in '{0}'")]
    BadFraction(String),

    #[error("{field} out of range in '{input}'")]
    OutOfRange { field: &'static str, input: String },
}

/// Why a single cue block was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CueBlockErrorKind {
    #[error("missing '-->' separator")]
    MissingArrow,

    #[error("missing start timestamp")]
    MissingStart,

    #[error("missing end timestamp")]
    MissingEnd,

    #[error("missing cue text")]
    MissingText,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] TimestampError),
}

/// A non-header block that could not be turned into a cue. Never fatal to the transcript.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed cue block {block}: {kind}")]
pub struct CueBlockError {
    /// Block position in the source (the header is block 0)
    pub block: usize,
    pub kind: CueBlockErrorKind,
}

//! WebVTT transcript parsing and the state behind a transcript pane:
//! which cue is playing, which cues match the search box, and where to seek
//! when a cue is clicked.

pub mod config;
pub mod error;
pub mod formats;
pub mod index;
pub mod model;
pub mod search;
pub mod view;

pub use error::{CueBlockError, CueBlockErrorKind, TimestampError};
pub use formats::vtt::{ParseReport, VttParser};
pub use index::CueIndex;
pub use model::{CaptionSource, Cue, CueCollection};
pub use search::SearchState;
pub use view::{EventSink, FilterState, TranscriptEvent, TranscriptView};

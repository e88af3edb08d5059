use serde::{Deserialize, Serialize};

/// One timed caption unit. `index` is the 1-based block position and is the
/// identity a rendering layer keys its elements by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl Cue {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Half-open membership: `start_ms <= t < end_ms`.
    pub fn contains(&self, time_ms: u64) -> bool {
        self.start_ms <= time_ms && time_ms < self.end_ms
    }
}

/// Cues in parse order. Indices ascend but may have gaps where blocks were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueCollection {
    cues: Vec<Cue>,
}

impl CueCollection {
    pub(crate) fn from_parsed(cues: Vec<Cue>) -> Self {
        debug_assert!(cues.windows(2).all(|w| w[0].index < w[1].index));
        Self { cues }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues
            .binary_search_by_key(&index, |c| c.index)
            .ok()
            .map(|pos| &self.cues[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cues.iter().map(|c| c.index)
    }

    pub fn duration_ms(&self) -> u64 {
        self.cues.iter().map(|c| c.end_ms).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a CueCollection {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

/// What the caption collaborator handed over for the current media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionSource {
    Text(String),
    /// No caption attachment exists for the media.
    Missing,
    /// Retrieval failed. Treated the same as `Missing`.
    FetchFailed { reason: String },
}

impl CaptionSource {
    pub fn text(&self) -> Option<&str> {
        match self {
            CaptionSource::Text(s) => Some(s.as_str()),
            CaptionSource::Missing | CaptionSource::FetchFailed { .. } => None,
        }
    }
}

impl From<Option<String>> for CaptionSource {
    fn from(v: Option<String>) -> Self {
        v.map(CaptionSource::Text).unwrap_or(CaptionSource::Missing)
    }
}

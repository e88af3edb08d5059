use crate::{
    model::{Cue, CueCollection},
    search::{contains_any, is_clear},
};

/// Time and keyword lookups over an immutable [`CueCollection`].
#[derive(Debug, Clone, Default)]
pub struct CueIndex {
    cues: CueCollection,
}

impl CueIndex {
    pub fn new(cues: CueCollection) -> Self {
        Self { cues }
    }

    pub fn cues(&self) -> &CueCollection {
        &self.cues
    }

    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    /// First cue in collection order whose `[start, end)` covers `time_ms`.
    ///
    /// Overlapping cues only happen with malformed input; the earliest one wins.
    /// A linear scan is enough for transcripts of a few hundred cues.
    pub fn active_cue_at(&self, time_ms: u64) -> Option<usize> {
        self.cues
            .iter()
            .find(|c| c.contains(time_ms))
            .map(|c| c.index)
    }

    /// Same as [`active_cue_at`](Self::active_cue_at) for a player position in seconds.
    ///
    /// Sub-millisecond positions truncate, so a time just short of a cue's end
    /// still belongs to that cue.
    pub fn active_cue_at_secs(&self, secs: f64) -> Option<usize> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        self.active_cue_at((secs * 1000.0).floor() as u64)
    }

    /// Clear terms match everything, including unknown indices.
    pub fn matches<S: AsRef<str>>(&self, index: usize, terms: &[S]) -> bool {
        if is_clear(terms) {
            return true;
        }
        self.cues
            .get(index)
            .is_some_and(|c| contains_any(&c.text, terms))
    }

    /// Visibility of every cue, in collection order.
    pub fn visibility<S: AsRef<str>>(&self, terms: &[S]) -> Vec<(usize, bool)> {
        let clear = is_clear(terms);
        self.cues
            .iter()
            .map(|c| (c.index, clear || contains_any(&c.text, terms)))
            .collect()
    }

    /// Seek position in seconds for a user activating cue `index`.
    pub fn seek_target(&self, index: usize) -> Option<f64> {
        self.cues.get(index).map(|c| c.start_ms as f64 / 1000.0)
    }
}

//! Transcript pane state: search filter plus "currently playing" cue.
//!
//! The view reacts to three independent inputs (playback time, search text,
//! cue clicks) and reports what a rendering layer or player should do through
//! an [`EventSink`]. Handlers are synchronous and idempotent, so their
//! interleaving does not matter.

use std::sync::mpsc::Sender;

use crate::{
    formats::vtt::{ParseReport, VttParser},
    index::CueIndex,
    model::{CaptionSource, CueCollection},
    search::SearchState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    /// The cue under the playhead changed. `None` means nothing is playing.
    ActiveCueChanged {
        previous: Option<usize>,
        current: Option<usize>,
    },
    /// Per-cue visibility after a search or clear, in collection order.
    VisibilityChanged(Vec<(usize, bool)>),
    /// The player should jump to `seconds`. Fire-and-forget.
    SeekRequested { seconds: f64 },
}

pub trait EventSink {
    fn emit(&mut self, event: TranscriptEvent);
}

impl<F: FnMut(TranscriptEvent)> EventSink for F {
    fn emit(&mut self, event: TranscriptEvent) {
        self(event)
    }
}

impl EventSink for Vec<TranscriptEvent> {
    fn emit(&mut self, event: TranscriptEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<TranscriptEvent> {
    fn emit(&mut self, event: TranscriptEvent) {
        // a dropped receiver means nobody renders anymore
        if self.send(event).is_err() {
            tracing::debug!("transcript event receiver is gone");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    Filtered(SearchState),
}

pub struct TranscriptView<S: EventSink> {
    parser: VttParser,
    index: CueIndex,
    captions_available: bool,
    filter: FilterState,
    active: Option<usize>,
    sink: S,
}

impl<S: EventSink> TranscriptView<S> {
    pub fn new(parser: VttParser, source: CaptionSource, sink: S) -> Self {
        let mut view = Self {
            parser,
            index: CueIndex::default(),
            captions_available: false,
            filter: FilterState::Unfiltered,
            active: None,
            sink,
        };
        view.load(source);
        view
    }

    /// Rebuilds the cues for new media. The active cue resets and any filter
    /// is re-applied to the new cues.
    pub fn reload(&mut self, source: CaptionSource) -> Option<ParseReport> {
        let report = self.load(source);
        if let Some(previous) = self.active.take() {
            self.sink.emit(TranscriptEvent::ActiveCueChanged {
                previous: Some(previous),
                current: None,
            });
        }
        let visibility = match &self.filter {
            FilterState::Unfiltered => self.index.visibility::<&str>(&[]),
            FilterState::Filtered(search) => self.index.visibility(search.terms()),
        };
        self.sink.emit(TranscriptEvent::VisibilityChanged(visibility));
        report
    }

    fn load(&mut self, source: CaptionSource) -> Option<ParseReport> {
        match source {
            CaptionSource::Text(text) => {
                let report = self.parser.parse(&text);
                self.index = CueIndex::new(report.cues.clone());
                self.captions_available = !report.cues.is_empty();
                if !self.captions_available {
                    tracing::info!("caption text holds no cues");
                }
                Some(report)
            }
            CaptionSource::Missing => {
                tracing::info!("no caption attachment for this media");
                self.clear_cues();
                None
            }
            CaptionSource::FetchFailed { reason } => {
                tracing::warn!(%reason, "caption fetch failed; showing empty transcript");
                self.clear_cues();
                None
            }
        }
    }

    fn clear_cues(&mut self) {
        self.index = CueIndex::new(CueCollection::empty());
        self.captions_available = false;
    }

    /// False when the host should show its "no captions available" message:
    /// no source, a failed fetch, or text that produced no cues.
    pub fn captions_available(&self) -> bool {
        self.captions_available
    }

    pub fn cues(&self) -> &CueCollection {
        self.index.cues()
    }

    pub fn index(&self) -> &CueIndex {
        &self.index
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn active_cue(&self) -> Option<usize> {
        self.active
    }

    pub fn is_visible(&self, index: usize) -> bool {
        match &self.filter {
            FilterState::Unfiltered => true,
            FilterState::Filtered(search) => self.index.matches(index, search.terms()),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Player time tick, in seconds. Emits only when the active cue changes.
    pub fn on_time_update(&mut self, secs: f64) {
        let current = self.index.active_cue_at_secs(secs);
        if current == self.active {
            return;
        }
        let previous = std::mem::replace(&mut self.active, current);
        tracing::trace!(secs, ?previous, ?current, "active cue changed");
        self.sink
            .emit(TranscriptEvent::ActiveCueChanged { previous, current });
    }

    /// Search box keystroke.
    pub fn on_search_input(&mut self, raw: &str) {
        let search = SearchState::from_input(raw);
        if search.is_clear() {
            self.on_clear();
            return;
        }
        let visibility = self.index.visibility(search.terms());
        tracing::debug!(
            terms = search.terms().len(),
            visible = visibility.iter().filter(|(_, v)| *v).count(),
            "filter applied"
        );
        self.filter = FilterState::Filtered(search);
        self.sink.emit(TranscriptEvent::VisibilityChanged(visibility));
    }

    /// The dedicated clear control. Shows every cue regardless of stored terms.
    pub fn on_clear(&mut self) {
        self.filter = FilterState::Unfiltered;
        let visibility = self.index.cues().indices().map(|i| (i, true)).collect();
        self.sink.emit(TranscriptEvent::VisibilityChanged(visibility));
    }

    /// User clicked a cue. No state changes; the player is asked to seek.
    pub fn on_cue_activated(&mut self, index: usize) {
        match self.index.seek_target(index) {
            Some(seconds) => self.sink.emit(TranscriptEvent::SeekRequested { seconds }),
            None => tracing::debug!(index, "activation for unknown cue ignored"),
        }
    }
}

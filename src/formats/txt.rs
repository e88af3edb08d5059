use textwrap::wrap;

use crate::{config::RenderCfg, formats::time::format_vtt_timestamp, model::CueCollection};

/// Renders the transcript pane as text. Cues run together as a paragraph
/// until one carries a soft break. Hidden cues are prefixed with the dim
/// marker, the playing cue with the play marker.
pub fn render_pane(
    cues: &CueCollection,
    cfg: &RenderCfg,
    is_visible: impl Fn(usize) -> bool,
    active: Option<usize>,
) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for cue in cues {
        let mut piece = String::new();
        if active == Some(cue.index) {
            piece.push_str(&cfg.play_marker);
        }
        if !is_visible(cue.index) {
            piece.push_str(&cfg.dim_marker);
        }
        if cfg.show_timestamps {
            piece.push_str(&format!("[{}] ", format_vtt_timestamp(cue.start_ms)));
        }
        piece.push_str(cue.text.trim_end_matches('\n'));
        current.push(piece);

        if cue.text.ends_with('\n') {
            paragraphs.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    let width = cfg.wrap_width.max(1);
    let mut out = String::new();
    for (i, p) in paragraphs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for line in wrap(p, width) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

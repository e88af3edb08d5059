use crate::{
    config::ParserCfg,
    error::{CueBlockError, CueBlockErrorKind},
    formats::time::parse_vtt_timestamp,
    model::{Cue, CueCollection},
};

const METADATA_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// Result of one parse: the cues that made it, plus every block that did not.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub cues: CueCollection,
    pub errors: Vec<CueBlockError>,
    /// Blank or metadata blocks dropped without an error.
    pub skipped: usize,
}

/// Turns WebVTT-like text into a [`CueCollection`].
///
/// Block 0 (the `WEBVTT` header) is always skipped. A block that cannot be
/// parsed is reported and skipped; it never aborts the rest of the transcript.
#[derive(Debug, Clone)]
pub struct VttParser {
    break_threshold: usize,
    terminators: Vec<char>,
    skip_metadata_blocks: bool,
}

impl Default for VttParser {
    fn default() -> Self {
        Self::new(&ParserCfg::default())
    }
}

impl VttParser {
    pub fn new(cfg: &ParserCfg) -> Self {
        Self {
            break_threshold: cfg.sentence_break_threshold.max(1),
            terminators: cfg.sentence_terminators.chars().collect(),
            skip_metadata_blocks: cfg.skip_metadata_blocks,
        }
    }

    pub fn parse(&self, input: &str) -> ParseReport {
        let span = tracing::info_span!("parse_vtt", bytes = input.len());
        let _g = span.enter();

        let normalized = normalize_newlines(input);
        let mut report = ParseReport::default();
        let mut cues: Vec<Cue> = Vec::new();
        let mut breaks = SoftBreaks::new(self.break_threshold);

        for (block_no, raw) in normalized.split("\n\n").enumerate().skip(1) {
            match self.parse_block(raw) {
                Ok(Some(mut cue)) => {
                    if cue.start_ms >= cue.end_ms {
                        tracing::debug!(
                            block = block_no,
                            start_ms = cue.start_ms,
                            end_ms = cue.end_ms,
                            "cue has an empty or inverted interval"
                        );
                    }
                    if block_no != 1 && breaks.observe(self.count_terminators(&cue.text)) {
                        cue.text.push('\n');
                    }
                    cue.index = block_no;
                    cues.push(cue);
                }
                Ok(None) => report.skipped += 1,
                Err(kind) => {
                    let err = CueBlockError {
                        block: block_no,
                        kind,
                    };
                    tracing::warn!(error = %err, "skipping cue block");
                    report.errors.push(err);
                }
            }
        }

        tracing::info!(
            cues = cues.len(),
            errors = report.errors.len(),
            skipped = report.skipped,
            "parsed transcript"
        );

        report.cues = CueCollection::from_parsed(cues);
        report
    }

    fn count_terminators(&self, text: &str) -> usize {
        text.chars().filter(|c| self.terminators.contains(c)).count()
    }

    /// `Ok(None)` means the block is silently dropped (blank or metadata).
    fn parse_block(&self, raw: &str) -> Result<Option<Cue>, CueBlockErrorKind> {
        if raw.replace('\n', " ").trim().is_empty() {
            return Ok(None);
        }

        let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
        if self.skip_metadata_blocks && is_metadata_block(lines[0]) {
            return Ok(None);
        }

        let timing_pos = lines
            .iter()
            .position(|l| l.contains("-->"))
            .ok_or(CueBlockErrorKind::MissingArrow)?;
        let (before, after) = lines[timing_pos]
            .split_once("-->")
            .ok_or(CueBlockErrorKind::MissingArrow)?;

        // Anything in front of the start timestamp is the cue identifier.
        let start_tok = before
            .split_whitespace()
            .last()
            .ok_or(CueBlockErrorKind::MissingStart)?;

        let mut rest = after.split_whitespace().peekable();
        let end_tok = rest.next().ok_or(CueBlockErrorKind::MissingEnd)?;

        while rest.peek().is_some_and(|t| is_cue_setting(t)) {
            rest.next();
        }

        let mut text_parts: Vec<&str> = rest.collect();
        text_parts.extend(lines[timing_pos + 1..].iter().copied());
        let text = text_parts.join(" ").trim().to_string();

        let start_ms = parse_vtt_timestamp(start_tok)?;
        let end_ms = parse_vtt_timestamp(end_tok)?;

        if text.is_empty() {
            return Err(CueBlockErrorKind::MissingText);
        }

        Ok(Some(Cue {
            index: 0,
            start_ms,
            end_ms,
            text,
        }))
    }
}

/// Running sentence-terminator count across cues. Crossing the threshold
/// requests one paragraph break and starts the count over.
#[derive(Debug)]
struct SoftBreaks {
    threshold: usize,
    count: usize,
}

impl SoftBreaks {
    fn new(threshold: usize) -> Self {
        Self {
            threshold,
            count: 0,
        }
    }

    fn observe(&mut self, terminators: usize) -> bool {
        if terminators == 0 {
            return false;
        }
        self.count += terminators;
        if self.count >= self.threshold {
            self.count = 0;
            return true;
        }
        false
    }
}

fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_metadata_block(first_line: &str) -> bool {
    let first = first_line.trim_start();
    METADATA_BLOCKS.iter().any(|kw| {
        first
            .strip_prefix(kw)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

// `align:start`, `position:10%` ...
fn is_cue_setting(tok: &str) -> bool {
    tok.split_once(':').is_some_and(|(k, v)| {
        !k.is_empty() && !v.is_empty() && k.chars().all(|c| c.is_ascii_alphabetic())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParseReport {
        VttParser::default().parse(input)
    }

    #[test]
    fn parses_blocks_after_header() {
        let input = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello there.\n\n2\n00:00:04.000 --> 00:00:06.000\nGoodbye now.";
        let r = parse(input);
        assert!(r.errors.is_empty());
        assert_eq!(r.cues.len(), 2);

        let first = r.cues.get(1).unwrap();
        assert_eq!((first.start_ms, first.end_ms), (1_000, 4_000));
        assert_eq!(first.text, "Hello there.");

        let second = r.cues.get(2).unwrap();
        assert_eq!((second.start_ms, second.end_ms), (4_000, 6_000));
        assert_eq!(second.text, "Goodbye now.");
    }

    #[test]
    fn multi_line_text_is_joined_with_spaces() {
        let r = parse("WEBVTT\n\n00:01.000 --> 00:02.500\nfirst line\nsecond line");
        assert_eq!(r.cues.get(1).unwrap().text, "first line second line");
        assert_eq!(r.cues.get(1).unwrap().start_ms, 1_000);
    }

    #[test]
    fn malformed_block_does_not_stop_parsing() {
        let input = "WEBVTT\n\n00:00:01.000 00:00:02.000\nno arrow here\n\n00:00:02.000 --> 00:00:03.000\nstill parsed";
        let r = parse(input);
        assert_eq!(r.cues.len(), 1);
        assert_eq!(r.cues.get(2).unwrap().text, "still parsed");
        assert_eq!(
            r.errors,
            vec![CueBlockError {
                block: 1,
                kind: CueBlockErrorKind::MissingArrow
            }]
        );
    }

    #[test]
    fn named_failure_modes() {
        let r = parse(
            "WEBVTT\n\n--> 00:00:02.000 x\n\n00:00:01.000 -->\n\n00:00:01.000 --> 00:00:02.000\n\n00:00:01,000 --> 00:00:02.000 x",
        );
        let kinds: Vec<_> = r.errors.iter().map(|e| e.kind.clone()).collect();
        assert!(matches!(kinds[0], CueBlockErrorKind::MissingStart));
        assert!(matches!(kinds[1], CueBlockErrorKind::MissingEnd));
        assert!(matches!(kinds[2], CueBlockErrorKind::MissingText));
        assert!(matches!(kinds[3], CueBlockErrorKind::InvalidTimestamp(_)));
        assert!(r.cues.is_empty());
    }

    #[test]
    fn blank_blocks_leave_index_gaps() {
        let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\na\n\n\n\n00:00:02.000 --> 00:00:03.000\nb";
        let r = parse(input);
        assert_eq!(r.cues.indices().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(r.skipped, 1);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn metadata_blocks_and_cue_settings_are_skipped() {
        let input = "WEBVTT\n\nNOTE this is a comment\n\nSTYLE\n::cue { color: red }\n\n00:00:01.000 --> 00:00:02.000 align:start position:10%\nHi.";
        let r = parse(input);
        assert!(r.errors.is_empty());
        assert_eq!(r.skipped, 2);
        assert_eq!(r.cues.get(3).unwrap().text, "Hi.");
    }

    #[test]
    fn crlf_matches_lf() {
        let lf = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello.\n\n2\n00:00:04.000 --> 00:00:06.000\nBye.";
        let crlf = lf.replace('\n', "\r\n");
        assert_eq!(parse(lf).cues, parse(&crlf).cues);
    }

    #[test]
    fn parsing_twice_is_identical() {
        let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nOne. Two. Three. Four. Five. Six.\n\n00:00:02.000 --> 00:00:03.000\nSeven. Eight. Nine. Ten. Eleven.";
        let p = VttParser::default();
        assert_eq!(p.parse(input).cues, p.parse(input).cues);
    }

    fn block(i: usize, text: &str) -> String {
        format!("00:00:{i:02}.000 --> 00:00:{:02}.000\n{text}", i + 1)
    }

    #[test]
    fn soft_break_every_ten_terminators() {
        // block 1 is never counted, even though it holds terminators
        let texts = [
            "a. b. c. d. e. f. g. h. i. j. k.",
            "one. two. three.",
            "four. five. six.",
            "no terminators here",
            "seven? eight!",
            "nine. ten.",
            "eleven.",
            "a. b. c. d. e. f. g. h. i.",
            "j. k.",
        ];
        let mut input = String::from("WEBVTT");
        for (i, t) in texts.iter().enumerate() {
            input.push_str("\n\n");
            input.push_str(&block(i, t));
        }
        let r = parse(&input);
        let broken: Vec<usize> = r
            .cues
            .iter()
            .filter(|c| c.text.ends_with('\n'))
            .map(|c| c.index)
            .collect();
        // counts: 3, 6, 6, 8, 10 -> break at 6; then 1, 10 -> break at 8; 2 at 9
        assert_eq!(broken, vec![6, 8]);
        assert!(r.cues.iter().all(|c| !c.text.ends_with("\n\n")));
    }

    #[test]
    fn soft_break_threshold_is_configurable() {
        let cfg = ParserCfg {
            sentence_break_threshold: 2,
            ..ParserCfg::default()
        };
        let input = format!(
            "WEBVTT\n\n{}\n\n{}\n\n{}",
            block(0, "x."),
            block(1, "y. z."),
            block(2, "w.")
        );
        let r = VttParser::new(&cfg).parse(&input);
        assert_eq!(r.cues.get(2).unwrap().text, "y. z.\n");
        assert_eq!(r.cues.get(3).unwrap().text, "w.");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let r = parse("");
        assert!(r.cues.is_empty());
        assert!(r.errors.is_empty());

        let r = parse("WEBVTT");
        assert!(r.cues.is_empty());
    }
}

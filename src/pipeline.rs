use anyhow::{Context, Result, anyhow};
use std::fs;

use vtt_transcript::{
    CaptionSource, CueCollection, TranscriptEvent, TranscriptView, VttParser, config::Config,
    formats,
};

use crate::cli::{AtCmd, Format, ParseCmd, SearchCmd, SeekCmd, ShowCmd};

type CliView = TranscriptView<Vec<TranscriptEvent>>;

pub fn run_parse(cmd: ParseCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("parse", input = cmd.input.as_str(), format = ?cmd.format);
    let _g = span.enter();

    let view = open_view(&cmd.input, cfg)?;
    log_transcript_summary(view.cues(), cfg);

    let rendered = match cmd.format {
        Format::Json => formats::json::write_json(view.cues(), &cfg.json, None)?,
        Format::Txt => formats::txt::render_pane(view.cues(), &cfg.render, |_| true, None),
    };
    print!("{rendered}");
    Ok(())
}

pub fn run_at(cmd: AtCmd, cfg: &Config) -> Result<()> {
    let mut view = open_view(&cmd.input, cfg)?;
    view.on_time_update(cmd.seconds);

    match view.active_cue() {
        Some(index) => println!("{index}"),
        None => println!("none"),
    }
    Ok(())
}

pub fn run_search(cmd: SearchCmd, cfg: &Config) -> Result<()> {
    let mut view = open_view(&cmd.input, cfg)?;
    view.on_search_input(&cmd.query);

    let visibility = view
        .sink()
        .iter()
        .rev()
        .find_map(|e| match e {
            TranscriptEvent::VisibilityChanged(v) => Some(v.clone()),
            _ => None,
        })
        .unwrap_or_default();

    match cmd.format {
        Format::Json => {
            let rendered =
                formats::json::write_json(view.cues(), &cfg.json, Some(visibility.as_slice()))?;
            println!("{rendered}");
        }
        Format::Txt => {
            for (index, visible) in visibility {
                println!("{index}\t{}", if visible { "visible" } else { "hidden" });
            }
        }
    }
    Ok(())
}

pub fn run_show(cmd: ShowCmd, cfg: &Config) -> Result<()> {
    let mut view = open_view(&cmd.input, cfg)?;

    if !view.captions_available() {
        println!("No captions or transcripts are available for this video.");
        return Ok(());
    }

    if let Some(q) = cmd.query.as_deref() {
        view.on_search_input(q);
    }
    if let Some(secs) = cmd.at {
        view.on_time_update(secs);
    }

    let rendered = formats::txt::render_pane(
        view.cues(),
        &cfg.render,
        |i| view.is_visible(i),
        view.active_cue(),
    );
    print!("{rendered}");
    Ok(())
}

pub fn run_seek(cmd: SeekCmd, cfg: &Config) -> Result<()> {
    let mut view = open_view(&cmd.input, cfg)?;
    view.on_cue_activated(cmd.index);

    let seconds = view
        .sink()
        .iter()
        .find_map(|e| match e {
            TranscriptEvent::SeekRequested { seconds } => Some(*seconds),
            _ => None,
        })
        .ok_or_else(|| anyhow!("no cue with index {}", cmd.index))?;

    println!("{seconds}");
    Ok(())
}

fn open_view(input: &str, cfg: &Config) -> Result<CliView> {
    let source = read_source(input)?;
    let parser = VttParser::new(&cfg.parser);
    Ok(TranscriptView::new(parser, source, Vec::new()))
}

fn read_source(input: &str) -> Result<CaptionSource> {
    let raw = if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed reading captions from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading captions: {input}"))?
    };
    tracing::info!(bytes = raw.len(), "read input");

    if raw.trim().is_empty() {
        return Ok(CaptionSource::Missing);
    }
    Ok(CaptionSource::Text(raw))
}

fn log_transcript_summary(cues: &CueCollection, cfg: &Config) {
    tracing::info!(
        cues = cues.len(),
        duration_ms = cues.duration_ms(),
        "transcript summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(cues.len());
        for c in cues.iter().take(n) {
            tracing::debug!(
                index = c.index,
                start_ms = c.start_ms,
                end_ms = c.end_ms,
                chars = c.text.chars().count(),
                "cue sample"
            );
        }
    }
}

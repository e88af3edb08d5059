use vtt_transcript::{CaptionSource, CueBlockErrorKind, TranscriptEvent, TranscriptView, VttParser};

const LECTURE: &str = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\nHello there.\n\n2\n00:00:04.000 --> 00:00:06.000\nGoodbye now.";

#[test]
fn hello_goodbye_end_to_end() {
    let mut events: Vec<TranscriptEvent> = Vec::new();
    let mut view = TranscriptView::new(
        VttParser::default(),
        CaptionSource::Text(LECTURE.to_string()),
        |e: TranscriptEvent| events.push(e),
    );

    assert_eq!(view.cues().len(), 2);
    assert_eq!(view.index().active_cue_at(2_500), Some(1));

    view.on_time_update(2.5);
    view.on_search_input("goodbye");
    assert!(!view.is_visible(1));
    assert!(view.is_visible(2));
    view.on_cue_activated(2);
    drop(view);

    assert_eq!(
        events,
        vec![
            TranscriptEvent::ActiveCueChanged {
                previous: None,
                current: Some(1)
            },
            TranscriptEvent::VisibilityChanged(vec![(1, false), (2, true)]),
            TranscriptEvent::SeekRequested { seconds: 4.0 },
        ]
    );
}

#[test]
fn well_formed_blocks_all_parse_in_order() {
    let mut input = String::from("WEBVTT\nKind: captions\nLanguage: en");
    for i in 0..50u64 {
        input.push_str(&format!(
            "\n\n{}\n00:{:02}:{:02}.000 --> 00:{:02}:{:02}.500\nline {i}",
            i + 1,
            i / 60,
            i % 60,
            i / 60,
            i % 60
        ));
    }

    let report = VttParser::default().parse(&input);
    assert!(report.errors.is_empty());
    assert_eq!(report.cues.len(), 50);
    assert!(report.cues.iter().all(|c| c.start_ms < c.end_ms));
    assert!(
        report
            .cues
            .iter()
            .zip(report.cues.iter().skip(1))
            .all(|(a, b)| a.start_ms <= b.start_ms && a.index < b.index)
    );
}

#[test]
fn malformed_block_is_skipped_and_reported() {
    let input = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nfirst\n\n2\n00:00:02.000 00:00:03.000\nbroken\n\n3\n00:00:03.000 --> 00:00:04.000\nthird";
    let report = VttParser::default().parse(input);

    assert_eq!(report.cues.indices().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].block, 2);
    assert_eq!(report.errors[0].kind, CueBlockErrorKind::MissingArrow);
}

#[test]
fn no_captions_means_empty_pane() {
    let view = TranscriptView::new(
        VttParser::default(),
        CaptionSource::FetchFailed {
            reason: "connection reset".to_string(),
        },
        Vec::new(),
    );
    assert!(!view.captions_available());
    assert!(view.cues().is_empty());
    assert_eq!(view.index().active_cue_at(0), None);
}

#[test]
fn blank_search_and_boundary_ticks() {
    let mut view = TranscriptView::new(
        VttParser::default(),
        CaptionSource::Text(LECTURE.to_string()),
        Vec::new(),
    );

    view.on_search_input("hello");
    assert!(!view.is_visible(2));
    view.on_search_input("  ");
    assert!(view.is_visible(1));
    assert!(view.is_visible(2));
    assert!(view.index().matches(1, &["", ""]));

    view.on_time_update(3.9996);
    assert_eq!(view.active_cue(), Some(1));
    view.on_time_update(0.9996);
    assert_eq!(view.active_cue(), None);
}

#[test]
fn header_only_text_has_no_captions() {
    let view = TranscriptView::new(
        VttParser::default(),
        CaptionSource::Text("WEBVTT\n\n".to_string()),
        Vec::new(),
    );
    assert!(!view.captions_available());
}

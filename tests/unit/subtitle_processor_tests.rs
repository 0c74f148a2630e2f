/*!
 * Tests for WebVTT parsing and writing
 */

use vttsync::subtitle_processor::{Cue, SubtitleCollection, parse_webvtt};
use crate::common;

#[test]
fn test_parse_webvtt_withSimpleDocument_shouldParseCues() {
    let cues = parse_webvtt(common::SIMPLE_VTT);
    assert_eq!(
        cues,
        vec![Cue::new(1_000, 2_500, "Hello"), Cue::new(3_000, 4_000, "World")]
    );
}

#[test]
fn test_parse_webvtt_withIdentifiersAndNotes_shouldSkipThem() {
    let vtt = "WEBVTT\n\nNOTE made by hand\n\nintro\n00:00:01.000 --> 00:00:02.000\nFirst\n\n2\n00:00:03.000 --> 00:00:04.000\nSecond\n";
    let cues = parse_webvtt(vtt);
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "First");
    assert_eq!(cues[1].text, "Second");
}

#[test]
fn test_parse_webvtt_withMultilinePayload_shouldJoinWithNewline() {
    let vtt = "WEBVTT\n\n00:01.000 --> 00:02.000\nline one\nline two\n";
    let cues = parse_webvtt(vtt);
    assert_eq!(cues, vec![Cue::new(1_000, 2_000, "line one\nline two")]);
}

#[test]
fn test_parse_webvtt_withInlineMarkup_shouldStripTags() {
    let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<v Roger Bingham><i>We are</i> in New York</v>\n";
    let cues = parse_webvtt(vtt);
    assert_eq!(cues[0].text, "We are in New York");
}

#[test]
fn test_parse_webvtt_withAutoCaptionShape_shouldDropWordTimings() {
    let cues = parse_webvtt(common::AUTO_CAPTIONS_VTT);
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0], Cue::new(320, 2_150, "so today we"));
    assert_eq!(cues[1], Cue::new(2_150, 4_000, "are testing"));
}

#[test]
fn test_parse_webvtt_withCrLfLineEndings_shouldParse() {
    let vtt = "WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nHi\r\n";
    assert_eq!(parse_webvtt(vtt), vec![Cue::new(1_000, 2_000, "Hi")]);
}

#[test]
fn test_parse_webvtt_withoutHeader_shouldStillParse() {
    let vtt = "00:00:01.000 --> 00:00:02.000\nNo header\n";
    assert_eq!(parse_webvtt(vtt), vec![Cue::new(1_000, 2_000, "No header")]);
}

#[test]
fn test_parse_webvtt_withBrokenTimingLineBetweenCues_shouldKeepValidCues() {
    let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nA\n\n00:00:0x.000 --> 00:00:03.000\nbroken\n\n00:00:04.000 --> 00:00:05.000\nB\n";
    let cues = parse_webvtt(vtt);
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0], Cue::new(1_000, 2_000, "A"));
    assert_eq!(cues[1], Cue::new(4_000, 5_000, "B"));
}

#[test]
fn test_parse_webvtt_withNoTimingLines_shouldReturnEmpty() {
    assert!(parse_webvtt("").is_empty());
    assert!(parse_webvtt("WEBVTT\n\nNOTE nothing here\n").is_empty());
    assert!(parse_webvtt("just some text\nand more\n").is_empty());
}

#[test]
fn test_parse_webvtt_withEndBeforeStart_shouldAdmitCue() {
    let vtt = "WEBVTT\n\n00:00:05.000 --> 00:00:01.000\nbackwards\n";
    assert_eq!(parse_webvtt(vtt), vec![Cue::new(5_000, 1_000, "backwards")]);
}

#[test]
fn test_parse_webvtt_withTimingLineAndNoText_shouldProduceEmptyText() {
    let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n\n00:00:03.000 --> 00:00:04.000\nafter\n";
    let cues = parse_webvtt(vtt);
    assert_eq!(cues, vec![Cue::new(1_000, 2_000, ""), Cue::new(3_000, 4_000, "after")]);
}

#[test]
fn test_cue_accessors_withValidCue_shouldReportSecondsAndContainment() {
    let cue = Cue::new(10_000, 12_000, "x");
    assert_eq!(cue.start_secs(), 10.0);
    assert_eq!(cue.end_secs(), 12.0);
    assert!(cue.contains_ms(10_000));
    assert!(cue.contains_ms(11_999));
    assert!(!cue.contains_ms(12_000));
    assert_eq!(cue.format_start_time(), "00:00:10.000");
}

#[test]
fn test_to_webvtt_withCollection_shouldWriteParsableDocument() {
    let collection = SubtitleCollection::new(vec![
        Cue::new(1_000, 2_500, "Hello"),
        Cue::new(3_000, 4_000, "two\nlines"),
    ]);
    let written = collection.to_webvtt();

    assert!(written.starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:02.500\nHello\n\n"));
    assert_eq!(SubtitleCollection::from_webvtt(&written), collection);
}

#[test]
fn test_parse_webvtt_withThreeDigitHours_shouldReadWholeHourField() {
    let cues = parse_webvtt("WEBVTT\n\n100:00:01.000 --> 100:00:02.500\nLate\n");
    assert_eq!(cues, vec![Cue::new(360_001_000, 360_002_500, "Late")]);
}

#[test]
fn test_parse_webvtt_withTimestampGluedToWord_shouldNotMatchInsideIt() {
    let cues = parse_webvtt("WEBVTT\n\nx00:00:01.000 --> 00:00:02.000\nNope\n\n00:00:03.000 --> 00:00:04.000\nYes\n");
    assert_eq!(cues, vec![Cue::new(3_000, 4_000, "Yes")]);
}

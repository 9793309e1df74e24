/*!
 * Tests for the caption normalization core
 */

use regex::Regex;
use ytscribe::captions::{self, Cue, OutputFormat, SourceFormat, render, srv3, timecode, webvtt};
use ytscribe::errors::CaptionError;

use crate::common;

/// Test timestamp formatting of the zero offset
#[test]
fn test_format_timestamp_withZeroMillis_shouldPadEveryField() {
    assert_eq!(timecode::format_timestamp(0), "00:00:00,000");
}

/// Test timestamp formatting across field boundaries
#[test]
fn test_format_timestamp_withFieldBoundaries_shouldCarryCorrectly() {
    assert_eq!(timecode::format_timestamp(999), "00:00:00,999");
    assert_eq!(timecode::format_timestamp(1_000), "00:00:01,000");
    assert_eq!(timecode::format_timestamp(59_999), "00:00:59,999");
    assert_eq!(timecode::format_timestamp(60_000), "00:01:00,000");
    assert_eq!(timecode::format_timestamp(3_599_999), "00:59:59,999");
    assert_eq!(timecode::format_timestamp(3_600_000), "01:00:00,000");
    assert_eq!(timecode::format_timestamp(5_025_678), "01:23:45,678");
}

/// Test that hours are padded but never truncated
#[test]
fn test_format_timestamp_withLargeHours_shouldKeepFullWidth() {
    assert_eq!(timecode::format_timestamp(100 * 3_600_000), "100:00:00,000");
    assert_eq!(timecode::format_timestamp(360_000_000 + 61_001), "100:01:01,001");
}

/// Test the timestamp shape and the format/parse round trip
#[test]
fn test_format_timestamp_withAnyValue_shouldMatchPatternAndRoundTrip() {
    let pattern = Regex::new(r"^\d+:\d{2}:\d{2},\d{3}$").unwrap();
    let samples = [
        0u64,
        1,
        999,
        1_000,
        59_999,
        60_000,
        3_599_999,
        3_600_000,
        5_025_678,
        86_400_000,
        359_999_999,
        360_000_000,
    ];

    for ms in samples {
        let formatted = timecode::format_timestamp(ms);
        assert!(pattern.is_match(&formatted), "bad shape: {}", formatted);
        assert_eq!(timecode::parse_timestamp(&formatted).unwrap(), ms);
    }
}

/// Test that out-of-range components are rejected by the parser
#[test]
fn test_parse_timestamp_withInvalidComponents_shouldFail() {
    assert!(timecode::parse_timestamp("00:61:00,000").is_err());
    assert!(timecode::parse_timestamp("00:00:61,000").is_err());
    assert!(timecode::parse_timestamp("00:00:00").is_err());
    assert!(timecode::parse_timestamp("abc").is_err());
}

/// Test WebVTT parsing of a well-formed two-cue document
#[test]
fn test_parse_blocks_withTwoCues_shouldRewriteTimingLines() {
    let blocks = webvtt::parse_blocks(common::sample_webvtt());

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines, vec!["00:00:01,000 --> 00:00:02,500", "Hello world"]);
    assert_eq!(blocks[1].lines, vec!["00:00:03,000 --> 00:00:04,000", "Second line"]);
}

/// Test that cue settings after the end timestamp are discarded
#[test]
fn test_parse_blocks_withCueSettings_shouldKeepOnlyEndTimestamp() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000 position:50% align:middle\nPositioned cue\n";
    let blocks = webvtt::parse_blocks(input);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lines[0], "00:00:01,000 --> 00:00:02,000");
}

/// Test that the header is skipped case-insensitively, with trailing text
#[test]
fn test_parse_blocks_withDecoratedHeader_shouldSkipHeaderLine() {
    let input = "webvtt Kind: captions\n\n00:00:00.000 --> 00:00:01.000\nFirst\n";
    let blocks = webvtt::parse_blocks(input);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lines, vec!["00:00:00,000 --> 00:00:01,000", "First"]);
}

/// Test that a final block without a trailing blank line is still flushed
#[test]
fn test_parse_blocks_withNoTrailingBlankLine_shouldFlushLastBlock() {
    let input = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nOnly cue";
    let blocks = webvtt::parse_blocks(input);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lines, vec!["00:00:01,000 --> 00:00:02,000", "Only cue"]);
}

/// Test that a block without a timing line is still emitted verbatim
#[test]
fn test_parse_blocks_withMissingArrow_shouldEmitBlockVerbatim() {
    common::init_test_logging();

    let input = "WEBVTT\n\nNOTE stray comment\n\n00:00:01.000 --> 00:00:02.000\nReal cue\n";
    let blocks = webvtt::parse_blocks(input);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines, vec!["NOTE stray comment"]);

    let srt_text = render::srt_from_blocks(&blocks);
    assert_eq!(srt_text, "1\nNOTE stray comment\n\n2\n00:00:01,000 --> 00:00:02,000\nReal cue\n");
}

/// Test the exact SRT document produced from the reference WebVTT input
#[test]
fn test_srt_from_blocks_withSampleVtt_shouldMatchExpectedDocument() {
    let blocks = webvtt::parse_blocks(common::sample_webvtt());
    let srt_text = render::srt_from_blocks(&blocks);

    assert_eq!(srt_text, common::sample_webvtt_as_srt());
}

/// Test that empty input renders as an empty string with no newline
#[test]
fn test_srt_from_blocks_withNoBlocks_shouldYieldEmptyString() {
    assert_eq!(render::srt_from_blocks(&[]), "");
    assert_eq!(render::srt_from_blocks(&webvtt::parse_blocks("WEBVTT\n")), "");
    assert_eq!(render::srt_from_blocks(&webvtt::parse_blocks("")), "");
}

/// Test SRV3 decoding of a wrapped events document
#[test]
fn test_decode_withWrappedEvents_shouldDropBracketedAnnotations() {
    let cues = srv3::decode(common::sample_srv3()).unwrap();

    // The [Music] event yields no cue at all, not an empty one
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_ms, 1000);
    assert_eq!(cues[0].duration_ms, 1500);
    assert_eq!(cues[0].text, "Hello");
}

/// Test SRV3 decoding of a bare event array
#[test]
fn test_decode_withBareArray_shouldDecode() {
    let input = r#"[{"tStartMs":500,"dDurationMs":250,"segs":[{"utf8":"Bare"}]}]"#;
    let cues = srv3::decode(input).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_ms, 500);
    assert_eq!(cues[0].text, "Bare");
}

/// Test that entity references survive the newline-to-space rewrite
#[test]
fn test_decode_withEntityAndNewline_shouldUnescapeToAmpersand() {
    let input = r#"{"events":[{"tStartMs":0,"segs":[{"utf8":"&amp;stuff\n"}]}]}"#;
    let cues = srv3::decode(input).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "&stuff");
}

/// Test that multiple kept segments are joined with a single space
#[test]
fn test_decode_withMultipleSegments_shouldSpaceJoin() {
    let input = r#"{"events":[{"tStartMs":0,"segs":[{"utf8":"one"},{"utf8":""},{"utf8":"two\n"},{"utf8":"[Applause]"}]}]}"#;
    let cues = srv3::decode(input).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "one two");
}

/// Test that events with nothing to say produce no cues
#[test]
fn test_decode_withEmptyEvents_shouldSkipThemEntirely() {
    let input = r#"{"events":[{"tStartMs":0},{"tStartMs":10,"segs":[]},{"tStartMs":20,"segs":[{"utf8":"  "}]},{"tStartMs":30,"segs":[{"utf8":"kept"}]}]}"#;
    let cues = srv3::decode(input).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_ms, 30);
    assert_eq!(cues[0].text, "kept");
}

/// Test timing field defaults
#[test]
fn test_decode_withMissingTimingFields_shouldDefaultToZero() {
    let input = r#"{"events":[{"segs":[{"utf8":"untimed"}]}]}"#;
    let cues = srv3::decode(input).unwrap();

    assert_eq!(cues[0].start_ms, 0);
    assert_eq!(cues[0].duration_ms, 0);
    assert_eq!(cues[0].end_ms(), 0);
}

/// Test that malformed JSON is a terminal decode failure
#[test]
fn test_decode_withMalformedJson_shouldFailWithInvalidJson() {
    let result = srv3::decode("{not json");

    assert!(matches!(result, Err(CaptionError::InvalidJson(_))));
}

/// Test that valid JSON of the wrong shape is rejected
#[test]
fn test_decode_withUnexpectedShape_shouldFailWithShapeError() {
    let result = srv3::decode(r#"{"kind":"captions","items":[]}"#);
    assert!(matches!(result, Err(CaptionError::UnexpectedShape)));

    let result = srv3::decode("42");
    assert!(matches!(result, Err(CaptionError::UnexpectedShape)));
}

/// Test SRT rendering from cues, including end time computation
#[test]
fn test_srt_from_cues_withTwoCues_shouldNumberSequentially() {
    let cues = vec![
        Cue { start_ms: 1000, duration_ms: 1500, text: "Hello".to_string() },
        Cue { start_ms: 3000, duration_ms: 1000, text: "World".to_string() },
    ];

    let srt_text = render::srt_from_cues(&cues);
    assert_eq!(
        srt_text,
        "1\n00:00:01,000 --> 00:00:02,500\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n"
    );
}

/// Test that the string-reduction and cue-reduction plain-text paths agree
#[test]
fn test_plain_paths_withSameCues_shouldProduceIdenticalText() {
    let cues = vec![
        Cue { start_ms: 0, duration_ms: 2000, text: "First line".to_string() },
        Cue { start_ms: 2500, duration_ms: 2000, text: "Second line".to_string() },
        Cue { start_ms: 5000, duration_ms: 1000, text: "Third".to_string() },
    ];

    let via_srt = render::plain_from_srt(&render::srt_from_cues(&cues), "\n");
    let direct = render::plain_from_cues(&cues, "\n");

    assert_eq!(via_srt, direct);
    assert_eq!(direct, "First line\nSecond line\nThird");
}

/// Test that non-qualifying SRT blocks are skipped silently
#[test]
fn test_plain_from_srt_withMalformedBlocks_shouldSkipThem() {
    let srt_text = "1\nno timing here\n\n2\n00:00:01,000 --> 00:00:02,000\nKept text\n";
    assert_eq!(render::plain_from_srt(srt_text, "\n"), "Kept text");
}

/// Test that multi-line cue text is space-joined in plain output
#[test]
fn test_plain_from_srt_withMultilineCue_shouldSpaceJoinLines() {
    let srt_text = "1\n00:00:01,000 --> 00:00:02,000\nLine one\nLine two\n";
    assert_eq!(render::plain_from_srt(srt_text, "\n"), "Line one Line two");
}

/// Test the configurable separator on both plain-text paths
#[test]
fn test_plain_text_withCustomSeparator_shouldUseIt() {
    let cues = vec![
        Cue { start_ms: 0, duration_ms: 1000, text: "a".to_string() },
        Cue { start_ms: 1000, duration_ms: 1000, text: "b".to_string() },
    ];

    assert_eq!(render::plain_from_cues(&cues, " | "), "a | b");
    assert_eq!(render::plain_from_srt(&render::srt_from_cues(&cues), " | "), "a | b");
}

/// Test that empty inputs render as empty strings on every path
#[test]
fn test_emitters_withEmptyInput_shouldYieldEmptyStrings() {
    assert_eq!(render::srt_from_cues(&[]), "");
    assert_eq!(render::plain_from_cues(&[], "\n"), "");
    assert_eq!(render::plain_from_srt("", "\n"), "");
}

/// Test content sniffing across all three source formats
#[test]
fn test_detect_withKnownPayloads_shouldClassifyCorrectly() {
    assert_eq!(captions::detect("WEBVTT\n\n..."), SourceFormat::WebVtt);
    assert_eq!(captions::detect("  \n\twebvtt Kind: captions"), SourceFormat::WebVtt);
    assert_eq!(captions::detect(r#"{"events":[]}"#), SourceFormat::Srv3Json);
    assert_eq!(captions::detect("  [1, 2, 3]"), SourceFormat::Srv3Json);
    assert_eq!(captions::detect("plain transcript text"), SourceFormat::Unknown);
    assert_eq!(captions::detect(""), SourceFormat::Unknown);
}

/// Test WebVTT normalization to both targets
#[test]
fn test_normalize_withWebVtt_shouldRouteThroughSrt() {
    let srt_text = captions::normalize(common::sample_webvtt(), OutputFormat::Srt).unwrap();
    assert_eq!(srt_text, common::sample_webvtt_as_srt());

    let plain = captions::normalize(common::sample_webvtt(), OutputFormat::Plain).unwrap();
    assert_eq!(plain, "Hello world\nSecond line");
}

/// Test SRV3 normalization to both targets
#[test]
fn test_normalize_withSrv3_shouldRenderDirectlyFromCues() {
    let srt_text = captions::normalize(common::sample_srv3(), OutputFormat::Srt).unwrap();
    assert_eq!(srt_text, "1\n00:00:01,000 --> 00:00:02,500\nHello\n");

    // The bracketed annotation contributes no blank line
    let plain = captions::normalize(common::sample_srv3(), OutputFormat::Plain).unwrap();
    assert_eq!(plain, "Hello");
}

/// Test that unrecognized payloads pass through unchanged
#[test]
fn test_normalize_withUnknownPayload_shouldPassThrough() {
    common::init_test_logging();

    let payload = "Already a transcript.\nWith two lines.\n";
    assert_eq!(captions::normalize(payload, OutputFormat::Srt).unwrap(), payload);
    assert_eq!(captions::normalize(payload, OutputFormat::Plain).unwrap(), payload);
}

/// Test that a JSON-sniffed payload that fails to parse produces no partial output
#[test]
fn test_normalize_withMalformedJson_shouldFail() {
    let result = captions::normalize("{not json", OutputFormat::Plain);
    assert!(matches!(result, Err(CaptionError::InvalidJson(_))));
}

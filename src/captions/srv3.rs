use serde::Deserialize;
use serde_json::Value;

use crate::captions::Cue;
use crate::errors::CaptionError;

// @module: YouTube SRV3 timed-JSON event decoding

/// A caption payload as YouTube serves it: either an object wrapping an
/// `events` array or the bare array itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Srv3Payload {
    Wrapped { events: Vec<Srv3Event> },
    Bare(Vec<Srv3Event>),
}

/// One timed caption event.
#[derive(Debug, Deserialize)]
struct Srv3Event {
    #[serde(rename = "tStartMs", default)]
    t_start_ms: u64,

    #[serde(rename = "dDurationMs", default)]
    d_duration_ms: u64,

    #[serde(default)]
    segs: Vec<Srv3Segment>,
}

/// One text segment within an event.
#[derive(Debug, Deserialize)]
struct Srv3Segment {
    #[serde(default)]
    utf8: String,
}

/// Decode an SRV3 JSON document into normalized cues.
///
/// Events whose segments all clean down to nothing produce no cue and
/// consume no index. Malformed JSON and documents of an unexpected shape
/// are terminal failures; no partial result is returned.
pub fn decode(json_text: &str) -> Result<Vec<Cue>, CaptionError> {
    let value: Value = serde_json::from_str(json_text).map_err(CaptionError::InvalidJson)?;
    let payload: Srv3Payload =
        serde_json::from_value(value).map_err(|_| CaptionError::UnexpectedShape)?;

    let events = match payload {
        Srv3Payload::Wrapped { events } => events,
        Srv3Payload::Bare(events) => events,
    };

    let mut cues = Vec::new();
    for event in events {
        let kept: Vec<String> = event
            .segs
            .iter()
            .filter_map(|segment| clean_segment(&segment.utf8))
            .collect();

        if kept.is_empty() {
            continue;
        }

        cues.push(Cue {
            start_ms: event.t_start_ms,
            duration_ms: event.d_duration_ms,
            text: kept.join(" "),
        });
    }

    Ok(cues)
}

/// Clean one segment's raw text, returning `None` when the segment
/// should be dropped.
///
/// Embedded newlines become spaces before entity decoding, so a literal
/// `&amp;` in the payload survives as a plain `&`. Segments that clean
/// down to a bracketed annotation like `[Music]` are non-speech and are
/// dropped entirely.
fn clean_segment(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let text = raw.replace('\n', " ");
    let text = html_escape::decode_html_entities(&text);
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return None;
    }

    Some(trimmed.to_string())
}

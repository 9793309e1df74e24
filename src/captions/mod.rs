/*!
 * Caption-format normalization.
 *
 * This module converts raw caption payloads into SRT or plain text. It is
 * split into several submodules:
 *
 * - `timecode`: millisecond/SRT timestamp conversion
 * - `webvtt`: WebVTT block parsing
 * - `srv3`: YouTube timed-JSON event decoding
 * - `render`: SRT and plain-text emitters
 *
 * Everything here is synchronous and pure: each conversion is a function
 * of already-retrieved payload text, holds no shared state, and may be
 * called concurrently without coordination.
 */

use log::warn;

use crate::errors::CaptionError;

// Re-export main types for easier usage
pub use self::webvtt::CueBlock;

// Submodules
pub mod render;
pub mod srv3;
pub mod timecode;
pub mod webvtt;

/// How many leading characters the sniffer inspects.
const SNIFF_WINDOW: usize = 20;

/// One normalized caption cue.
///
/// The text is the single-space join of the source event's surviving
/// segments and is non-empty by construction; events that clean down to
/// nothing never become cues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start offset in milliseconds
    pub start_ms: u64,

    /// Display duration in milliseconds, zero when unknown
    pub duration_ms: u64,

    /// Cleaned cue text
    pub text: String,
}

impl Cue {
    /// End offset in milliseconds.
    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }
}

/// Source format of a raw caption payload, as sniffed from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// WebVTT text (leading `WEBVTT` header)
    WebVtt,
    /// YouTube SRV3 timed JSON
    Srv3Json,
    /// Neither of the above; passed through untouched
    Unknown,
}

/// Canonical render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Time-indexed SRT document
    Srt,
    /// Flattened transcript, one cue per line
    Plain,
}

/// Sniff the source format of a raw caption payload.
///
/// Only the first few left-trimmed characters are inspected: a
/// case-insensitive `WEBVTT` prefix wins, then a `{` or `[` opener marks
/// SRV3 JSON, everything else is [`SourceFormat::Unknown`].
pub fn detect(payload: &str) -> SourceFormat {
    let trimmed = payload.trim_start();
    let preview: String = trimmed.chars().take(SNIFF_WINDOW).collect();

    if preview.to_uppercase().starts_with("WEBVTT") {
        SourceFormat::WebVtt
    } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
        SourceFormat::Srv3Json
    } else {
        SourceFormat::Unknown
    }
}

/// Normalize a raw caption payload into the requested output format.
///
/// WebVTT input always becomes an SRT document first; a plain-text
/// request then reduces that document. SRV3 input decodes to cues and
/// renders either target directly. Unrecognized payloads are returned
/// unchanged, on the assumption that they are already final text.
pub fn normalize(payload: &str, target: OutputFormat) -> Result<String, CaptionError> {
    match detect(payload) {
        SourceFormat::WebVtt => {
            let blocks = webvtt::parse_blocks(payload);
            let srt_text = render::srt_from_blocks(&blocks);
            Ok(match target {
                OutputFormat::Srt => srt_text,
                OutputFormat::Plain => render::plain_from_srt(&srt_text, "\n"),
            })
        }
        SourceFormat::Srv3Json => {
            let cues = srv3::decode(payload)?;
            Ok(match target {
                OutputFormat::Srt => render::srt_from_cues(&cues),
                OutputFormat::Plain => render::plain_from_cues(&cues, "\n"),
            })
        }
        SourceFormat::Unknown => {
            warn!("Caption payload is neither WebVTT nor JSON, passing through as-is");
            Ok(payload.to_string())
        }
    }
}

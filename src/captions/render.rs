use crate::captions::Cue;
use crate::captions::timecode;
use crate::captions::webvtt::CueBlock;

// @module: Rendering normalized captions to SRT and plain text

/// Render parsed WebVTT blocks as an SRT document.
///
/// Indices are assigned here, 1-based, over the blocks that reached the
/// emitter. The document is the joined blocks with surrounding
/// whitespace trimmed and exactly one trailing newline; no blocks yields
/// an empty string.
pub fn srt_from_blocks(blocks: &[CueBlock]) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let mut out: Vec<String> = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        out.push((index + 1).to_string());
        out.extend(block.lines.iter().cloned());
        out.push(String::new());
    }

    format!("{}\n", out.join("\n").trim())
}

/// Render normalized cues as an SRT document.
///
/// End timestamps are computed from start plus duration. Joining rules
/// match [`srt_from_blocks`].
pub fn srt_from_cues(cues: &[Cue]) -> String {
    if cues.is_empty() {
        return String::new();
    }

    let mut out: Vec<String> = Vec::new();
    for (index, cue) in cues.iter().enumerate() {
        out.push((index + 1).to_string());
        out.push(format!(
            "{} --> {}",
            timecode::format_timestamp(cue.start_ms),
            timecode::format_timestamp(cue.end_ms())
        ));
        out.push(cue.text.clone());
        out.push(String::new());
    }

    format!("{}\n", out.join("\n").trim())
}

/// Reduce an SRT document to plain text.
///
/// A block qualifies only if it has an index line, a timing line and at
/// least one text line; everything else is skipped silently. Text lines
/// of a block are space-joined, qualifying blocks are joined with
/// `separator`.
pub fn plain_from_srt(srt_text: &str, separator: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in srt_text.split("\n\n") {
        let block_lines: Vec<&str> = block.trim().lines().collect();
        if block_lines.len() >= 3 && block_lines[1].contains("-->") {
            lines.push(block_lines[2..].join(" "));
        }
    }

    lines.join(separator)
}

/// Reduce normalized cues to plain text, one line per cue.
pub fn plain_from_cues(cues: &[Cue], separator: &str) -> String {
    cues.iter()
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

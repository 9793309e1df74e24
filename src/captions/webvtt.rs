use log::warn;

// @module: WebVTT block parsing

/// One cue block lifted out of a WebVTT document.
///
/// The timing line (if present) has already been rewritten to the SRT
/// comma-fraction convention and stripped of cue settings; the remaining
/// lines are cue text in document order.
#[derive(Debug, Clone)]
pub struct CueBlock {
    /// Converted lines of the block, timing line included
    pub lines: Vec<String>,
}

/// Parse WebVTT text into an ordered sequence of cue blocks.
///
/// Lines whose trimmed, upper-cased form starts with `WEBVTT` are
/// skipped, non-blank lines accumulate into the current block, and a
/// blank line flushes it. A trailing unflushed block at end of input is
/// flushed as well, so no trailing blank line is required.
pub fn parse_blocks(text: &str) -> Vec<CueBlock> {
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().to_uppercase().starts_with("WEBVTT") {
            continue;
        }
        if line.trim().is_empty() {
            flush_buffer(&mut buffer, &mut blocks);
            continue;
        }
        buffer.push(line);
    }
    flush_buffer(&mut buffer, &mut blocks);

    blocks
}

fn flush_buffer(buffer: &mut Vec<&str>, blocks: &mut Vec<CueBlock>) {
    if buffer.is_empty() {
        return;
    }

    let mut lines = Vec::with_capacity(buffer.len());
    let mut arrow_lines = 0;
    for line in buffer.iter() {
        if line.contains("-->") {
            arrow_lines += 1;
            lines.push(convert_timing_line(line));
        } else {
            lines.push((*line).to_string());
        }
    }

    // A well-formed block carries exactly one timing line; anything else
    // is malformed upstream output, emitted as-is but worth flagging.
    if arrow_lines != 1 {
        warn!(
            "WebVTT block {} has {} timing lines, emitting verbatim",
            blocks.len() + 1,
            arrow_lines
        );
    }

    blocks.push(CueBlock { lines });
    buffer.clear();
}

/// Rewrite a WebVTT timing line to SRT form.
///
/// The fractional separator becomes a comma and any cue-settings suffix
/// after the end timestamp is discarded.
fn convert_timing_line(line: &str) -> String {
    let line = line.replace('.', ",");
    if let Some((start, rest)) = line.split_once(" --> ") {
        let end = rest.split_whitespace().next().unwrap_or("");
        format!("{} --> {}", start, end)
    } else {
        line
    }
}

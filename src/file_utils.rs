use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::app_config::TranscriptFormat;

// @module: Transcript persistence and filesystem utilities

// @const: Characters allowed to survive in an output filename
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// Longest identifier kept when building a filename.
const MAX_IDENTIFIER_LEN: usize = 200;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Reduce a video identifier to a filesystem-safe name.
    ///
    /// Everything outside `[A-Za-z0-9._-]` becomes an underscore and the
    /// result is capped at 200 characters. An identifier that sanitizes
    /// to nothing falls back to `untitled`.
    pub fn sanitize_identifier(identifier: &str) -> String {
        let sanitized = UNSAFE_FILENAME_CHARS.replace_all(identifier, "_");
        let mut sanitized = sanitized.into_owned();
        sanitized.truncate(MAX_IDENTIFIER_LEN);
        if sanitized.is_empty() {
            "untitled".to_string()
        } else {
            sanitized
        }
    }

    // @generates: Output path for a transcript
    pub fn transcript_output_path<P: AsRef<Path>>(
        output_dir: P,
        video_id: &str,
        format: TranscriptFormat,
    ) -> PathBuf {
        let base = Self::sanitize_identifier(video_id);
        output_dir
            .as_ref()
            .join(format!("{}.{}", base, format.extension()))
    }

    /// Save a transcript and return the path of the written file.
    ///
    /// The write is atomic: content lands in a temp file inside the
    /// output directory and is renamed into place, so a crash never
    /// leaves a half-written transcript behind. The JSON format wraps
    /// the transcript in an `{"id", "transcript"}` envelope.
    pub fn save_transcript<P: AsRef<Path>>(
        output_dir: P,
        video_id: &str,
        transcript: &str,
        format: TranscriptFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        Self::ensure_dir(output_dir)?;

        let out_path = Self::transcript_output_path(output_dir, video_id, format);

        let content = match format {
            TranscriptFormat::Json => {
                let envelope = json!({
                    "id": video_id,
                    "transcript": transcript,
                });
                serde_json::to_string_pretty(&envelope)
                    .context("Failed to serialize transcript envelope")?
            }
            TranscriptFormat::Plain | TranscriptFormat::Srt => transcript.to_string(),
        };

        let mut temp_file = NamedTempFile::new_in(output_dir)
            .with_context(|| format!("Failed to create temp file in {:?}", output_dir))?;
        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write transcript")?;
        temp_file
            .persist(&out_path)
            .with_context(|| format!("Failed to move transcript into place: {:?}", out_path))?;

        Ok(out_path)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }
}

/*!
 * # ytscribe
 *
 * A Rust library and CLI for fetching YouTube video transcripts.
 *
 * ## Features
 *
 * - Resolve caption tracks for a video by URL or id (via yt-dlp)
 * - Normalize WebVTT and YouTube SRV3 JSON caption payloads
 * - Render transcripts as SRT, plain text, or a JSON envelope
 * - Preferred-language caption track selection
 * - Atomic transcript persistence
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `captions`: Caption-format normalization core:
 *   - `captions::timecode`: millisecond/SRT timestamp conversion
 *   - `captions::webvtt`: WebVTT block parsing
 *   - `captions::srv3`: YouTube timed-JSON event decoding
 *   - `captions::render`: SRT and plain-text emitters
 * - `caption_source`: Caption track resolution and download (yt-dlp)
 * - `video_url`: YouTube URL to video id extraction
 * - `file_utils`: Transcript persistence
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod caption_source;
pub mod captions;
pub mod errors;
pub mod file_utils;
pub mod video_url;

// Re-export main types for easier usage
pub use app_config::{Config, TranscriptFormat};
pub use app_controller::Controller;
pub use caption_source::{CaptionSource, CaptionTrack, YtDlpResolver};
pub use captions::{Cue, OutputFormat, SourceFormat, normalize};
pub use errors::{AppError, CaptionError, SourceError};

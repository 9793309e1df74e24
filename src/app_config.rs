use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::captions::OutputFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption languages to prefer, in order
    #[serde(default = "default_preferred_languages")]
    pub preferred_languages: Vec<String>,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Caption source settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// On-disk transcript format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    // @format: Flattened plain text (.txt)
    #[default]
    Plain,
    // @format: Time-indexed SRT (.srt)
    Srt,
    // @format: Plain text wrapped in a JSON envelope (.json)
    Json,
}

impl TranscriptFormat {
    // @returns: File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Srt => "srt",
            Self::Json => "json",
        }
    }

    /// The normalization target this on-disk format is rendered from.
    /// The JSON envelope wraps the plain transcript at save time.
    pub fn normalize_target(&self) -> OutputFormat {
        match self {
            Self::Srt => OutputFormat::Srt,
            Self::Plain | Self::Json => OutputFormat::Plain,
        }
    }
}

impl std::fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Srt => "srt",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for TranscriptFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "txt" => Ok(Self::Plain),
            "srt" => Ok(Self::Srt),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid transcript format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory transcripts are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Default transcript format
    #[serde(default)]
    pub format: TranscriptFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            format: TranscriptFormat::default(),
        }
    }
}

/// Caption source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    /// Path to the yt-dlp executable
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,

    /// Metadata resolution timeout in seconds
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,

    /// Caption payload download timeout in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Path to a cookies.txt file passed through to yt-dlp
    #[serde(default)]
    pub cookie_path: Option<String>,

    /// Browser whose cookies yt-dlp should read (edge, chrome, ...)
    #[serde(default)]
    pub cookies_from_browser: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            resolve_timeout_secs: default_resolve_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
            cookie_path: None,
            cookies_from_browser: None,
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_preferred_languages() -> Vec<String> {
    vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()]
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_resolve_timeout_secs() -> u64 {
    60
}

fn default_download_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred_languages: default_preferred_languages(),
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.preferred_languages.is_empty() {
            return Err(anyhow!("preferred_languages must not be empty"));
        }
        if self.preferred_languages.iter().any(|lang| lang.trim().is_empty()) {
            return Err(anyhow!("preferred_languages must not contain blank entries"));
        }
        if self.output.directory.trim().is_empty() {
            return Err(anyhow!("output.directory must not be empty"));
        }
        if self.fetch.ytdlp_path.trim().is_empty() {
            return Err(anyhow!("fetch.ytdlp_path must not be empty"));
        }
        if self.fetch.resolve_timeout_secs == 0 {
            return Err(anyhow!("fetch.resolve_timeout_secs must be greater than zero"));
        }
        if self.fetch.download_timeout_secs == 0 {
            return Err(anyhow!("fetch.download_timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

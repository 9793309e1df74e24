/*!
 * Tests for app configuration functionality
 */

use std::str::FromStr;
use ytscribe::app_config::{Config, LogLevel, TranscriptFormat};

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.preferred_languages, vec!["en", "en-US", "en-GB"]);
    assert_eq!(config.output.directory, "output");
    assert_eq!(config.output.format, TranscriptFormat::Plain);
    assert_eq!(config.fetch.ytdlp_path, "yt-dlp");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that an empty JSON document deserializes to the defaults
#[test]
fn test_config_withEmptyJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(config.preferred_languages, vec!["en", "en-US", "en-GB"]);
    assert_eq!(config.fetch.resolve_timeout_secs, 60);
    assert_eq!(config.fetch.download_timeout_secs, 30);
    assert!(config.fetch.cookie_path.is_none());
    assert!(config.validate().is_ok());
}

/// Test a partial config file with overrides
#[test]
fn test_config_withPartialJson_shouldMergeWithDefaults() {
    let json = r#"{
        "preferred_languages": ["de"],
        "output": {"directory": "transcripts", "format": "srt"},
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.preferred_languages, vec!["de"]);
    assert_eq!(config.output.directory, "transcripts");
    assert_eq!(config.output.format, TranscriptFormat::Srt);
    assert_eq!(config.log_level, LogLevel::Debug);
    // Untouched sections keep their defaults
    assert_eq!(config.fetch.ytdlp_path, "yt-dlp");
}

/// Test the serialization round trip
#[test]
fn test_config_withSerdeRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.preferred_languages = vec!["fr".to_string()];
    config.output.format = TranscriptFormat::Json;
    config.fetch.cookie_path = Some("cookies.txt".to_string());

    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.preferred_languages, vec!["fr"]);
    assert_eq!(restored.output.format, TranscriptFormat::Json);
    assert_eq!(restored.fetch.cookie_path.as_deref(), Some("cookies.txt"));
}

/// Test validation failures
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.preferred_languages.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.preferred_languages = vec!["  ".to_string()];
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.output.directory = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fetch.resolve_timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test transcript format parsing and display
#[test]
fn test_transcript_format_withStrings_shouldRoundTrip() {
    assert_eq!(TranscriptFormat::from_str("plain").unwrap(), TranscriptFormat::Plain);
    assert_eq!(TranscriptFormat::from_str("txt").unwrap(), TranscriptFormat::Plain);
    assert_eq!(TranscriptFormat::from_str("SRT").unwrap(), TranscriptFormat::Srt);
    assert_eq!(TranscriptFormat::from_str("json").unwrap(), TranscriptFormat::Json);
    assert!(TranscriptFormat::from_str("yaml").is_err());

    assert_eq!(TranscriptFormat::Plain.to_string(), "plain");
    assert_eq!(TranscriptFormat::Srt.to_string(), "srt");
    assert_eq!(TranscriptFormat::Json.to_string(), "json");
}

/// Test the file extension mapping
#[test]
fn test_transcript_format_withEachVariant_shouldMapExtension() {
    assert_eq!(TranscriptFormat::Plain.extension(), "txt");
    assert_eq!(TranscriptFormat::Srt.extension(), "srt");
    assert_eq!(TranscriptFormat::Json.extension(), "json");
}

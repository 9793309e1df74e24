/*!
 * Caption track resolution and download.
 *
 * The [`CaptionSource`] trait is the seam between the pure conversion
 * core and the outside world: a production implementation backed by
 * yt-dlp lives here, and tests substitute a mock behind the same trait.
 */

use std::fmt::Debug;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use tokio::process::Command;

use crate::app_config::{Config, FetchConfig};
use crate::errors::SourceError;

/// A resolved caption track for one video.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// URL the raw caption payload can be fetched from
    pub url: String,

    /// Declared payload format (yt-dlp `ext`, e.g. `vtt` or `json3`)
    pub format: String,

    /// Track language code as the source reports it
    pub language: String,
}

/// Common trait for caption sources
///
/// A caption source resolves a video id to a caption track and downloads
/// the track's raw payload. Implementations must be safe to share across
/// tasks.
#[async_trait]
pub trait CaptionSource: Send + Sync + Debug {
    /// Resolve the best caption track for a video
    async fn resolve(&self, video_id: &str) -> Result<CaptionTrack, SourceError>;

    /// Download the raw caption payload of a resolved track
    async fn download(&self, track: &CaptionTrack) -> Result<String, SourceError>;
}

/// Caption source backed by the yt-dlp executable.
#[derive(Debug)]
pub struct YtDlpResolver {
    /// yt-dlp executable path
    executable: String,
    /// Metadata resolution timeout in seconds
    resolve_timeout_secs: u64,
    /// Preferred caption languages, in order
    preferred_languages: Vec<String>,
    /// Optional cookies.txt path passed through to yt-dlp
    cookie_path: Option<String>,
    /// Optional browser name whose cookies yt-dlp should read
    cookies_from_browser: Option<String>,
    /// HTTP client for payload downloads
    client: Client,
}

impl YtDlpResolver {
    /// Create a resolver from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.fetch, config.preferred_languages.clone())
    }

    /// Create a resolver from fetch settings and a language preference list.
    pub fn new(fetch: &FetchConfig, preferred_languages: Vec<String>) -> Self {
        Self {
            executable: fetch.ytdlp_path.clone(),
            resolve_timeout_secs: fetch.resolve_timeout_secs,
            preferred_languages,
            cookie_path: fetch.cookie_path.clone(),
            cookies_from_browser: fetch.cookies_from_browser.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(fetch.download_timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the video metadata document from yt-dlp.
    async fn video_metadata(&self, video_id: &str) -> Result<Value, SourceError> {
        let mut args: Vec<String> = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
        ];
        if let Some(cookie_path) = &self.cookie_path {
            args.push("--cookies".to_string());
            args.push(cookie_path.clone());
        } else if let Some(browser) = &self.cookies_from_browser {
            args.push("--cookies-from-browser".to_string());
            args.push(browser.clone());
        }
        args.push(video_id.to_string());

        debug!("Resolving metadata via {} for '{}'", self.executable, video_id);

        let command_future = Command::new(&self.executable).args(&args).output();

        let timeout_duration = Duration::from_secs(self.resolve_timeout_secs);
        let output = tokio::select! {
            result = command_future => {
                result.map_err(|e| SourceError::ResolverFailed(
                    format!("failed to execute {}: {}", self.executable, e)
                ))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(SourceError::ResolverTimeout(self.resolve_timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("{} failed: {}", self.executable, stderr.trim());
            return Err(SourceError::ResolverFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout).map_err(|e| SourceError::MetadataParse(e.to_string()))
    }
}

#[async_trait]
impl CaptionSource for YtDlpResolver {
    async fn resolve(&self, video_id: &str) -> Result<CaptionTrack, SourceError> {
        let metadata = self.video_metadata(video_id).await?;

        select_caption_track(&metadata, &self.preferred_languages)
            .ok_or_else(|| SourceError::NoCaptions(video_id.to_string()))
    }

    async fn download(&self, track: &CaptionTrack) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&track.url)
            .send()
            .await
            .map_err(|e| SourceError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::DownloadFailed(format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::DownloadFailed(e.to_string()))
    }
}

/// Select a caption track from a video metadata document.
///
/// Manual subtitles win over automatic captions. Within each map the
/// preferred languages are tried in order, then any language with at
/// least one track; the first listed track of the chosen language is
/// used.
pub fn select_caption_track(metadata: &Value, preferred_languages: &[String]) -> Option<CaptionTrack> {
    find_track(metadata.get("subtitles"), preferred_languages)
        .or_else(|| find_track(metadata.get("automatic_captions"), preferred_languages))
}

fn find_track(captions: Option<&Value>, preferred_languages: &[String]) -> Option<CaptionTrack> {
    let map = captions?.as_object()?;

    for language in preferred_languages {
        if let Some(items) = map.get(language).and_then(|v| v.as_array()) {
            if let Some(first) = items.first() {
                if let Some(track) = track_from_item(language, first) {
                    return Some(track);
                }
            }
        }
    }

    for (language, items) in map {
        if let Some(first) = items.as_array().and_then(|a| a.first()) {
            if let Some(track) = track_from_item(language, first) {
                return Some(track);
            }
        }
    }

    None
}

fn track_from_item(language: &str, item: &Value) -> Option<CaptionTrack> {
    let url = item.get("url").and_then(|v| v.as_str())?.to_string();
    let format = item
        .get("ext")
        .or_else(|| item.get("format_id"))
        .and_then(|v| v.as_str())
        .unwrap_or("vtt")
        .to_string();

    Some(CaptionTrack {
        url,
        format,
        language: language.to_string(),
    })
}

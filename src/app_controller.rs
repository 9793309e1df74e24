use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::caption_source::{CaptionSource, YtDlpResolver};
use crate::captions;
use crate::file_utils::FileManager;
use crate::video_url;

// @module: Application controller for transcript fetching

/// Main application controller for transcript fetching
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Caption source behind the resolution/download seam
    source: Box<dyn CaptionSource>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let source = Box::new(YtDlpResolver::from_config(&config));
        Ok(Self { config, source })
    }

    /// Create a controller with an injected caption source, used by tests
    /// to avoid the network and the yt-dlp binary.
    pub fn with_source(config: Config, source: Box<dyn CaptionSource>) -> Self {
        Self { config, source }
    }

    /// Fetch and normalize the transcript for a video URL or id.
    ///
    /// Returns the extracted video id together with the transcript in the
    /// configured output format.
    pub async fn fetch_transcript(&self, input: &str) -> Result<(String, String)> {
        let video_id = video_url::video_id_from_input(input);
        debug!("Resolved input to video id '{}'", video_id);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("Resolving captions for {}", video_id));

        let track = self
            .source
            .resolve(&video_id)
            .await
            .with_context(|| format!("Failed to resolve captions for '{}'", video_id))?;

        spinner.set_message(format!("Downloading '{}' captions", track.language));
        let payload = self
            .source
            .download(&track)
            .await
            .context("Failed to download caption payload")?;
        spinner.finish_and_clear();

        info!(
            "Found '{}' captions ({}, {} bytes)",
            track.language,
            track.format,
            payload.len()
        );

        let detected = captions::detect(&payload);
        debug!("Sniffed caption payload as {:?}", detected);

        let target = self.config.output.format.normalize_target();
        let transcript = captions::normalize(&payload, target)?;

        if transcript.is_empty() {
            warn!("Captions decoded to an empty transcript");
        }

        Ok((video_id, transcript))
    }

    /// Run the main workflow: fetch, normalize and save one transcript.
    pub async fn run(&self, input: &str) -> Result<PathBuf> {
        let (video_id, transcript) = self.fetch_transcript(input).await?;

        let path = FileManager::save_transcript(
            &self.config.output.directory,
            &video_id,
            &transcript,
            self.config.output.format,
        )?;

        info!("Saved transcript: {:?}", path);
        Ok(path)
    }
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TranscriptFormat};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod caption_source;
mod captions;
mod errors;
mod file_utils;
mod video_url;

/// CLI Wrapper for TranscriptFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranscriptFormat {
    Plain,
    Srt,
    Json,
}

impl From<CliTranscriptFormat> for TranscriptFormat {
    fn from(cli_format: CliTranscriptFormat) -> Self {
        match cli_format {
            CliTranscriptFormat::Plain => TranscriptFormat::Plain,
            CliTranscriptFormat::Srt => TranscriptFormat::Srt,
            CliTranscriptFormat::Json => TranscriptFormat::Json,
        }
    }
}

/// Browsers yt-dlp can borrow cookies from
#[derive(Debug, Clone, ValueEnum)]
enum CliBrowser {
    Edge,
    Chrome,
    Firefox,
    Brave,
    Vivaldi,
    Chromium,
}

impl CliBrowser {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Brave => "brave",
            Self::Vivaldi => "vivaldi",
            Self::Chromium => "chromium",
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a video transcript (default command)
    #[command(alias = "fetch")]
    Fetch(FetchArgs),

    /// Generate shell completions for ytscribe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// YouTube URL or video id
    #[arg(value_name = "URL_OR_ID")]
    url: String,

    /// Transcript output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliTranscriptFormat>,

    /// Directory to write the transcript to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a cookies.txt file (Netscape format)
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// Read cookies from this browser if needed
    #[arg(long, value_enum)]
    browser: Option<CliBrowser>,

    /// Never read browser cookies
    #[arg(long)]
    no_browser_cookies: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ytscribe - YouTube transcript fetcher
///
/// Fetches machine- or human-generated captions for a video and saves
/// them as plain text, SRT, or a JSON envelope.
#[derive(Parser, Debug)]
#[command(name = "ytscribe")]
#[command(version = "0.1.0")]
#[command(about = "YouTube transcript fetcher")]
#[command(long_about = "ytscribe resolves a video's caption track, downloads the raw payload
and normalizes it into a readable transcript.

EXAMPLES:
    ytscribe https://youtu.be/dQw4w9WgXcQ          # Plain-text transcript
    ytscribe -F srt dQw4w9WgXcQ                    # Keep timing as SRT
    ytscribe -F json -o transcripts/ <URL>         # JSON envelope into a directory
    ytscribe --cookies cookies.txt <URL>           # Use a cookies.txt file
    ytscribe --browser firefox <URL>               # Borrow browser cookies
    ytscribe completions bash > ytscribe.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// YouTube URL or video id
    #[arg(value_name = "URL_OR_ID")]
    url: Option<String>,

    /// Transcript output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliTranscriptFormat>,

    /// Directory to write the transcript to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a cookies.txt file (Netscape format)
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// Read cookies from this browser if needed
    #[arg(long, value_enum)]
    browser: Option<CliBrowser>,

    /// Never read browser cookies
    #[arg(long)]
    no_browser_cookies: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "31",
            Level::Warn => "33",
            Level::Info => "32",
            Level::Debug => "36",
            Level::Trace => "35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[1;{}m{} {}\x1B[0m",
                color,
                now,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ytscribe", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Fetch(args)) => run_fetch(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let url = cli
                .url
                .ok_or_else(|| anyhow!("URL_OR_ID is required when no subcommand is specified"))?;

            let fetch_args = FetchArgs {
                url,
                format: cli.format,
                output_dir: cli.output_dir,
                cookies: cli.cookies,
                browser: cli.browser,
                no_browser_cookies: cli.no_browser_cookies,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_fetch(fetch_args).await
        }
    }
}

async fn run_fetch(options: FetchArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(format) = &options.format {
        config.output.format = format.clone().into();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output.directory = output_dir.to_string_lossy().to_string();
    }

    if let Some(cookies) = &options.cookies {
        config.fetch.cookie_path = Some(cookies.to_string_lossy().to_string());
    }

    if options.no_browser_cookies {
        config.fetch.cookies_from_browser = None;
    } else if let Some(browser) = &options.browser {
        config.fetch.cookies_from_browser = Some(browser.as_str().to_string());
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and fetch the transcript
    let controller = Controller::with_config(config)?;
    let saved_path = controller.run(&options.url).await?;

    println!("[saved] {}", saved_path.display());

    Ok(())
}

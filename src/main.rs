// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use vttsync::app_config::{self, Config};
use vttsync::app_controller::Controller;
use vttsync::language_utils;
use vttsync::providers::CaptionProvider;
use vttsync::providers::youtube::YouTubeCaptions;
use vttsync::store::VideoRecord;
use vttsync::subtitle_processor::SubtitleCollection;
use vttsync::time_shift;
use vttsync::timecode;

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
    /// Parse a WebVTT file and print its cues as JSON
    Parse {
        /// WebVTT file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Shift every timestamp of a WebVTT file
    Shift {
        /// WebVTT file to shift
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Offset in milliseconds (negative moves cues earlier)
        #[arg(long, allow_negative_numbers = true)]
        offset_ms: i64,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the caption tracks a video offers
    Tracks {
        /// Provider video id
        video_id: String,
    },

    /// Import captions into the video store
    Import(ImportArgs),

    /// Show the cue active at a playback position
    Active {
        /// Video id in the store
        video_id: String,

        /// Playback position in seconds
        #[arg(long)]
        at: f64,

        /// Display offset in seconds (positive shows cues earlier)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        display_offset: f64,
    },

    /// Add a video to the store, filling missing metadata from the provider
    Add {
        /// Provider video id
        video_id: String,

        /// Video title
        #[arg(long)]
        title: Option<String>,

        /// Thumbnail URL
        #[arg(long)]
        thumb: Option<String>,

        /// Channel name
        #[arg(long)]
        channel: Option<String>,

        /// Store only what is given, without asking the provider
        #[arg(long)]
        no_fetch: bool,
    },

    /// Remove a video from the store
    Remove {
        /// Video id in the store
        video_id: String,
    },

    /// List stored videos
    Videos {
        /// Fill missing metadata from the provider before listing
        #[arg(long)]
        refresh: bool,
    },

    /// Generate shell completions for vttsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Video id to store the cues under (also the provider video id)
    video_id: String,

    /// Import a local WebVTT file instead of fetching from the provider
    #[arg(long, conflicts_with_all = ["lang", "auto", "tlang"])]
    file: Option<PathBuf>,

    /// Caption language code (defaults to the configured language)
    #[arg(long)]
    lang: Option<String>,

    /// Require an auto-generated track
    #[arg(long)]
    auto: bool,

    /// Machine translation target, e.g. 'zh-Hans'
    #[arg(long)]
    tlang: Option<String>,

    /// Persisted offset in milliseconds applied before storing
    #[arg(long, allow_negative_numbers = true)]
    offset_ms: Option<i64>,
}

/// vttsync - WebVTT caption import, shifting and playback sync
#[derive(Parser, Debug)]
#[command(name = "vttsync")]
#[command(version)]
#[command(about = "WebVTT caption import, shifting and playback sync")]
#[command(long_about = "vttsync parses WebVTT captions, shifts their timing, picks caption tracks
from a provider and resolves which cue is showing at a playback position.

EXAMPLES:
    vttsync parse talk.vtt                              # Print cues as JSON
    vttsync shift talk.vtt --offset-ms -500 -o out.vtt  # Move every cue 0.5s earlier
    vttsync add dQw4w9WgXcQ                             # Store a video with its metadata
    vttsync tracks dQw4w9WgXcQ                          # List available caption tracks
    vttsync import dQw4w9WgXcQ --lang es --tlang en     # Fetch, translate and store
    vttsync import dQw4w9WgXcQ --file talk.vtt          # Store a local file
    vttsync active dQw4w9WgXcQ --at 12.5                # Cue showing at 12.5s

CONFIGURATION:
    Configuration is stored in vttsync.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "vttsync.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vttsync", &mut std::io::stdout());
            Ok(())
        }
        Commands::Parse { file } => run_parse(&file),
        Commands::Shift { file, offset_ms, output } => run_shift(&file, offset_ms, output.as_deref()),
        command => {
            let config = load_config(&cli.config_path, cli.log_level.is_some())?;
            let controller = Controller::with_config(config)?;
            run_with_controller(command, &controller).await
        }
    }
}

fn run_parse(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read WebVTT file: {}", file.display()))?;
    let collection = SubtitleCollection::from_webvtt(&content);
    info!("Parsed {} cues from {}", collection.len(), file.display());

    println!("{}", serde_json::to_string_pretty(&collection.cues)?);
    Ok(())
}

fn run_shift(file: &Path, offset_ms: i64, output: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read WebVTT file: {}", file.display()))?;
    let shifted = time_shift::shift_text(&content, offset_ms);

    match output {
        Some(path) => {
            std::fs::write(path, shifted.as_bytes())
                .with_context(|| format!("Failed to write shifted file: {}", path.display()))?;
            info!("Shifted {} by {}ms into {}", file.display(), offset_ms, path.display());
        }
        None => print!("{}", shifted),
    }
    Ok(())
}

async fn run_with_controller(command: Commands, controller: &Controller) -> Result<()> {
    match command {
        Commands::Tracks { video_id } => {
            let provider = build_provider(controller)?;
            let tracks = provider.list_tracks(&video_id).await?;
            if tracks.is_empty() {
                warn!("No caption tracks found for {}", video_id);
            }
            for track in tracks {
                let label = track
                    .name
                    .clone()
                    .or_else(|| language_utils::get_language_name(&track.language_code).ok())
                    .unwrap_or_else(|| "unknown".to_string());
                println!(
                    "{:<10} {:<5} {:<13} {}",
                    track.language_code,
                    if track.kind.is_auto_generated() { "auto" } else { "" },
                    if track.translatable { "translatable" } else { "" },
                    label
                );
            }
        }
        Commands::Import(args) => {
            if let Some(file) = &args.file {
                let content = std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read WebVTT file: {}", file.display()))?;
                let video = controller.import_upload(&args.video_id, &content, args.offset_ms)?;
                info!("Stored {} cues on {}", video.cues().len(), video.id);
                return Ok(());
            }

            let mut request = controller.default_import_request();
            if let Some(lang) = args.lang {
                request.language = lang;
            }
            request.require_auto_generated |= args.auto;
            request.translate_to = args.tlang;
            if let Some(offset_ms) = args.offset_ms {
                request.offset_ms = offset_ms;
            }

            let provider = build_provider(controller)?;
            let outcome = controller
                .import_from_provider(&provider, &args.video_id, &request)
                .await?;
            info!(
                "Stored {} cues on {} from track {}",
                outcome.cue_count, outcome.video.id, outcome.track.language_code
            );
        }
        Commands::Active { video_id, at, display_offset } => {
            match controller.active_cue(&video_id, at, display_offset)? {
                Some((index, cue)) => println!(
                    "#{} {} --> {}\n{}",
                    index,
                    timecode::format_timestamp_ms(cue.start_ms),
                    timecode::format_timestamp_ms(cue.end_ms),
                    cue.text
                ),
                None => println!("(no active cue)"),
            }
        }
        Commands::Add { video_id, title, thumb, channel, no_fetch } => {
            let mut record = VideoRecord::new(video_id.as_str());
            record.title = title;
            record.thumb = thumb;
            record.channel = channel;
            let mut video = controller.add_video(record)?;

            if !no_fetch {
                let provider = build_provider(controller)?;
                video = controller.enrich_metadata(&provider, &video_id).await?;
            }
            println!("{}", serde_json::to_string_pretty(&video)?);
        }
        Commands::Remove { video_id } => {
            if !controller.remove_video(&video_id)? {
                return Err(anyhow!("Video {} not found", video_id));
            }
        }
        Commands::Videos { refresh } => {
            if refresh {
                let provider = build_provider(controller)?;
                for video in controller.store().list()? {
                    controller.enrich_metadata(&provider, &video.id).await?;
                }
            }
            for video in controller.store().list()? {
                println!(
                    "{:<16} {:>5} cues  {}",
                    video.id,
                    video.cues().len(),
                    video.title.as_deref().unwrap_or("")
                );
            }
        }
        Commands::Parse { .. } | Commands::Shift { .. } | Commands::Completions { .. } => {
            return Err(anyhow!("Command does not use the video store"));
        }
    }

    Ok(())
}

fn build_provider(controller: &Controller) -> Result<YouTubeCaptions> {
    let config = &controller.config().provider;
    YouTubeCaptions::new(config.endpoint.clone(), config.timeout_secs, &config.user_agent)
        .context("Failed to create caption provider")
}

fn load_config(config_path: &str, log_level_from_cli: bool) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.validate()
        .context("Configuration validation failed")?;

    if !log_level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

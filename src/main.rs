// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use clipsub::app_config::{self, Config};
use clipsub::app_controller::Controller;
use clipsub::file_utils::{FileManager, FileType};

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
    /// Cut clips from a video (or every video in a directory) and subtitle them
    Process {
        /// Input video file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Build SRT and karaoke ASS files from an aligned word stream JSON file
    Subtitle {
        /// whisperx JSON output (segments or a flat word list)
        #[arg(value_name = "WORDS_JSON")]
        words_file: PathBuf,

        /// Directory receiving the two subtitle files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Generate shell completions for clipsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// clipsub - karaoke subtitles for short clips
///
/// Cuts clips out of a long video, transcribes them with word alignment and
/// writes an SRT track plus a karaoke ASS track per clip.
#[derive(Parser, Debug)]
#[command(name = "clipsub")]
#[command(version)]
#[command(about = "Clip extraction with word-highlighted subtitles")]
#[command(long_about = "clipsub cuts short clips out of a video, transcribes them with whisperx and writes
SRT and karaoke-style ASS subtitles for each clip.

EXAMPLES:
    clipsub process talk.mp4                        # Full pipeline on one video
    clipsub process /videos/                        # Every video in a directory
    clipsub --seed 7 process talk.mp4               # Reproducible line lengths
    clipsub --min-words 3 --max-words 3 process a.mp4
    clipsub subtitle clip_1_audio.json -o out/      # Subtitles from an existing transcript
    clipsub completions bash > clipsub.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in clipsub.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "clipsub.json", env = "CLIPSUB_CONFIG")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Seed for reproducible line lengths
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Smallest number of words per subtitle line
    #[arg(long, global = true)]
    min_words: Option<usize>,

    /// Largest number of words per subtitle line
    #[arg(long, global = true)]
    max_words: Option<usize>,
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

    // @returns: Emoji and ANSI colour for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, colour) = Self::decoration(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
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
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "clipsub", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        log::set_max_level(level_filter(&level.clone().into()));
    }

    let config = load_config(&cli)?;
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Process { input_path } => {
            if input_path.is_file() {
                match FileManager::detect_file_type(&input_path)? {
                    FileType::Video => {}
                    FileType::WordStream => {
                        return Err(anyhow!(
                            "{:?} looks like a word stream; use `clipsub subtitle` for transcripts",
                            input_path
                        ));
                    }
                    FileType::Unknown => warn!("Unrecognised input type for {:?}, trying it as a video", input_path),
                }
                let summary = controller.run(&input_path).await?;
                info!(
                    "{} of {} clip(s) subtitled ({} proposed)",
                    summary.completed.len(),
                    summary.clips_kept,
                    summary.clips_found
                );
            } else if input_path.is_dir() {
                let results = controller.run_folder(&input_path).await?;
                info!("Finished processing {} video(s)", results.len());
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input_path));
            }
        }
        Commands::Subtitle { words_file, output_dir } => {
            let (srt, ass) = controller.subtitle_from_file(&words_file, &output_dir)?;
            info!("Success: {:?}, {:?}", srt, ass);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the configuration file, creating a default one when absent, then apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path: &Path = &cli.config;

    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at {:?}, creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .with_context(|| format!("Failed to write default config to file: {:?}", config_path))?;
        config
    };

    if let Some(seed) = cli.seed {
        config.grouping.seed = Some(seed);
    }
    if let Some(min) = cli.min_words {
        config.grouping.group_size_min = min;
    }
    if let Some(max) = cli.max_words {
        config.grouping.group_size_max = max;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

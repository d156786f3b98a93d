use std::default::Default;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.

// @const: ASS colour literal (&HBBGGRR or &HAABBGGRR)
static ASS_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&H([0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})&?$").unwrap()
});

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Line grouping settings
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Subtitle style; every key is required in the config file
    pub style: StyleConfig,

    /// Clip pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Transcription collaborator settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How words are grouped into lines
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupingConfig {
    /// Smallest number of words per line
    #[serde(default = "default_group_size_min")]
    pub group_size_min: usize,

    /// Largest number of words per line
    #[serde(default = "default_group_size_max")]
    pub group_size_max: usize,

    /// Seed for reproducible line sizing; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            group_size_min: default_group_size_min(),
            group_size_max: default_group_size_max(),
            seed: None,
        }
    }
}

/// ASS style parameters shared by the Default and Highlight styles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleConfig {
    // @field: Font family
    pub font_name: String,
    // @field: Font size in script pixels
    pub font_size: u32,
    // @field: Colours in ASS &HAABBGGRR notation
    pub primary_color: String,
    pub secondary_color: String,
    pub outline_color: String,
    pub back_color: String,
    pub highlight_color: String,
    pub highlight_bg_color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    // @field: Horizontal/vertical scale in percent
    pub scale_x: u32,
    pub scale_y: u32,
    pub spacing: f64,
    pub angle: f64,
    // @field: 1 = outline + shadow, 3 = opaque box
    pub border_style: u8,
    pub outline: f64,
    pub shadow: f64,
    // @field: Numpad alignment code (1-9)
    pub alignment: u8,
    pub margin_l: u32,
    pub margin_r: u32,
    pub margin_v: u32,
    pub encoding: u32,
    // @field: Border size of the highlight box
    pub bg_radius: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size: 24,
            primary_color: "&H00FFFFFF".to_string(),
            secondary_color: "&H000000FF".to_string(),
            outline_color: "&H00000000".to_string(),
            back_color: "&H64000000".to_string(),
            highlight_color: "&H00FFFFFF".to_string(),
            highlight_bg_color: "&H00FF8000".to_string(),
            bold: true,
            italic: false,
            underline: false,
            strike_out: false,
            scale_x: 100,
            scale_y: 100,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 2.0,
            shadow: 0.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 60,
            encoding: 1,
            bg_radius: 6.0,
        }
    }
}

/// What to do when one clip fails
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipFailurePolicy {
    /// Stop the whole run at the first failed clip
    #[default]
    Halt,
    /// Log the failure and continue with the next clip
    Skip,
}

/// Clip pipeline settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Folder receiving clips and subtitle artifacts
    #[serde(default = "default_clips_folder_path")]
    pub clips_folder_path: PathBuf,

    /// Longest clip kept from the clip finder, in seconds
    #[serde(default = "default_max_clip_duration_secs")]
    pub max_clip_duration_secs: f64,

    /// Burn the ASS track into a copy of each clip
    #[serde(default = "default_true")]
    pub burn_subtitles: bool,

    /// Behaviour when a clip fails
    #[serde(default)]
    pub on_clip_failure: ClipFailurePolicy,

    /// Timeout for each external command, in seconds
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// ffmpeg executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Clip finder command line; `{input}` is replaced by the video path.
    /// It must print a JSON array of `{"start_time", "end_time"}` objects.
    #[serde(default = "default_clip_finder_command")]
    pub clip_finder_command: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clips_folder_path: default_clips_folder_path(),
            max_clip_duration_secs: default_max_clip_duration_secs(),
            burn_subtitles: default_true(),
            on_clip_failure: ClipFailurePolicy::default(),
            command_timeout_secs: default_command_timeout_secs(),
            ffmpeg_path: default_ffmpeg_path(),
            clip_finder_command: default_clip_finder_command(),
        }
    }
}

/// Transcription and alignment collaborator settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranscriptionConfig {
    /// whisperx executable
    #[serde(default = "default_whisperx_command")]
    pub command: String,

    /// Whisper model name
    #[serde(default = "default_whisper_model")]
    pub model: String,

    /// Inference device ("cpu", "cuda")
    #[serde(default = "default_device")]
    pub device: String,

    /// Compute type ("int8", "float16", ...)
    #[serde(default = "default_compute_type")]
    pub compute_type: String,

    /// Transcription batch size
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Spoken language code used for alignment
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            command: default_whisperx_command(),
            model: default_whisper_model(),
            device: default_device(),
            compute_type: default_compute_type(),
            batch_size: default_batch_size(),
            language: default_language(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_group_size_min() -> usize {
    2
}

fn default_group_size_max() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_clips_folder_path() -> PathBuf {
    PathBuf::from("clips")
}

fn default_max_clip_duration_secs() -> f64 {
    90.0
}

fn default_command_timeout_secs() -> u64 {
    1800 // transcription of a 90s clip on CPU can take several minutes
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_clip_finder_command() -> Vec<String> {
    vec!["clipsai-find".to_string(), "{input}".to_string()]
}

fn default_whisperx_command() -> String {
    "whisperx".to_string()
}

fn default_whisper_model() -> String {
    "large-v2".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_compute_type() -> String {
    "int8".to_string()
}

fn default_batch_size() -> u32 {
    16
}

fn default_language() -> String {
    "en".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.grouping.validate()?;
        self.style.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }
}

impl GroupingConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.group_size_min == 0 || self.group_size_min > self.group_size_max {
            return Err(ConfigError::InvalidGroupRange {
                min: self.group_size_min,
                max: self.group_size_max,
            });
        }
        Ok(())
    }
}

impl StyleConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.font_name.trim().is_empty() {
            return Err(invalid_style("font_name", "must not be empty".to_string()));
        }
        if self.font_name.contains(',') {
            return Err(invalid_style("font_name", "must not contain a comma".to_string()));
        }
        if self.font_size == 0 {
            return Err(invalid_style("font_size", "must be positive".to_string()));
        }
        if self.scale_x == 0 || self.scale_y == 0 {
            return Err(invalid_style("scale_x/scale_y", "must be positive".to_string()));
        }

        let colors = [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
            ("outline_color", &self.outline_color),
            ("back_color", &self.back_color),
            ("highlight_color", &self.highlight_color),
            ("highlight_bg_color", &self.highlight_bg_color),
        ];
        for (key, value) in colors {
            if !ASS_COLOR_REGEX.is_match(value) {
                return Err(invalid_style(key, format!("'{}' is not an ASS colour (&HAABBGGRR)", value)));
            }
        }

        if !matches!(self.border_style, 1 | 3 | 4) {
            return Err(invalid_style("border_style", format!("unsupported value {}", self.border_style)));
        }
        if !(1..=9).contains(&self.alignment) {
            return Err(invalid_style("alignment", format!("{} is outside 1-9", self.alignment)));
        }

        let non_negative = [
            ("outline", self.outline),
            ("shadow", self.shadow),
            ("bg_radius", self.bg_radius),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_style(key, format!("{} must be a non-negative number", value)));
            }
        }
        if !self.spacing.is_finite() || !self.angle.is_finite() {
            return Err(invalid_style("spacing/angle", "must be finite".to_string()));
        }

        Ok(())
    }
}

fn invalid_style(key: &'static str, message: String) -> ConfigError {
    ConfigError::InvalidStyle { key, message }
}

impl PipelineConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.max_clip_duration_secs.is_finite() || self.max_clip_duration_secs <= 0.0 {
            return Err(ConfigError::InvalidPipeline {
                key: "max_clip_duration_secs",
                message: "must be a positive number of seconds".to_string(),
            });
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::InvalidPipeline {
                key: "command_timeout_secs",
                message: "must be positive".to_string(),
            });
        }
        if self.clip_finder_command.is_empty() {
            return Err(ConfigError::InvalidPipeline {
                key: "clip_finder_command",
                message: "must name a program".to_string(),
            });
        }
        Ok(())
    }
}

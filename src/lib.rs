/*!
 * # clipsub - karaoke subtitles for short video clips
 *
 * A Rust library that turns a long video into short clips with word-level
 * karaoke subtitles.
 *
 * ## Features
 *
 * - Cut clips proposed by an external clip finder
 * - Word-aligned transcription through whisperx
 * - Random-length subtitle lines built from timed words
 * - Plain SRT tracks and karaoke ASS tracks with per-word highlighting
 * - Optional burn-in of the ASS track with ffmpeg
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `words`: Aligned word stream types and JSON parsing
 * - `line_grouper`: Grouping of timed words into lines
 * - `timecode`: SRT and ASS timestamp formatting
 * - `subtitle_processor`: SRT tracks
 * - `karaoke`: ASS highlight events and documents
 * - `clip_subtitles`: Per-clip composition of both documents
 * - `collaborators`: External tools (clip finder, ffmpeg, whisperx) behind traits
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod clip_subtitles;
pub mod collaborators;
pub mod errors;
pub mod file_utils;
pub mod karaoke;
pub mod line_grouper;
pub mod subtitle_processor;
pub mod timecode;
pub mod words;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use clip_subtitles::ClipSubtitles;
pub use errors::{AppError, ClipError, CollaboratorError, ConfigError, SubtitleError};
pub use karaoke::{AssDocument, HighlightEvent, KaraokeComposer};
pub use line_grouper::{FixedGroupSizer, GroupSizer, Line, LineGrouper, RandomGroupSizer};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use timecode::format_ass_timestamp;
pub use words::{AlignedTranscript, Segment, TimedWord, WordEntry};

/*!
 * External collaborators of the clip pipeline.
 *
 * Clip boundary detection, media cutting, audio extraction, subtitle burning
 * and word-level transcription are delegated to external tools. This module
 * defines the request/response contracts the orchestrator relies on:
 * - `ClipFinder`: picks clip boundaries in a source video
 * - `MediaProcessor`: cuts clips, extracts audio, burns subtitles (ffmpeg)
 * - `Transcriber`: produces an aligned word stream for an audio file (whisperx)
 *
 * Collaborators are built once per run and passed by reference into every
 * per-clip call.
 */

use std::fmt::Debug;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CollaboratorError;
use crate::words::AlignedTranscript;

pub mod clip_finder;
pub mod command;
pub mod ffmpeg;
pub mod mock;
pub mod whisperx;

pub use clip_finder::CommandClipFinder;
pub use ffmpeg::FfmpegMedia;
pub use whisperx::WhisperXTranscriber;

/// A time range of the source video, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBoundary {
    #[serde(alias = "start_time")]
    pub start: f64,
    #[serde(alias = "end_time")]
    pub end: f64,
}

impl ClipBoundary {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the clip in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Finds clip boundaries in a source video
#[async_trait]
pub trait ClipFinder: Send + Sync + Debug {
    /// Candidate clips, in source order
    async fn find_clips(&self, video: &Path) -> Result<Vec<ClipBoundary>, CollaboratorError>;
}

/// Video and audio manipulation
#[async_trait]
pub trait MediaProcessor: Send + Sync + Debug {
    /// Cut `clip` out of `video` into `output`
    async fn extract_clip(&self, video: &Path, clip: &ClipBoundary, output: &Path) -> Result<(), CollaboratorError>;

    /// Extract the audio track of `clip_video` into a WAV file
    async fn extract_audio(&self, clip_video: &Path, output: &Path) -> Result<(), CollaboratorError>;

    /// Render `subtitles` into the pixels of `clip_video`
    async fn burn_subtitles(&self, clip_video: &Path, subtitles: &Path, output: &Path) -> Result<(), CollaboratorError>;
}

/// Word-level transcription and alignment of an audio file
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    async fn transcribe(&self, audio: &Path) -> Result<AlignedTranscript, CollaboratorError>;
}

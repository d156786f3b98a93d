/*!
 * Scripted in-memory collaborators for testing.
 *
 * - `MockClipFinder` returns a fixed list of boundaries
 * - `MockMedia` writes small placeholder files instead of running ffmpeg, and
 *   can be told to fail audio extraction or burn-in
 * - `MockTranscriber` returns scripted transcripts, one per call, and can be
 *   told to fail on a given call
 */

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::collaborators::{ClipBoundary, ClipFinder, MediaProcessor, Transcriber};
use crate::errors::CollaboratorError;
use crate::words::AlignedTranscript;

/// Clip finder returning a fixed set of boundaries
#[derive(Debug, Clone, Default)]
pub struct MockClipFinder {
    clips: Vec<ClipBoundary>,
    fail: bool,
}

impl MockClipFinder {
    pub fn new(clips: Vec<ClipBoundary>) -> Self {
        Self { clips, fail: false }
    }

    /// Clip finder that always errors
    pub fn failing() -> Self {
        Self {
            clips: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ClipFinder for MockClipFinder {
    async fn find_clips(&self, _video: &Path) -> Result<Vec<ClipBoundary>, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::CommandFailed {
                program: "mock-clip-finder".to_string(),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(self.clips.clone())
    }
}

/// Media processor writing placeholder files
#[derive(Debug, Clone, Default)]
pub struct MockMedia {
    /// Fail audio extraction for this 1-based call number
    fail_audio_on_call: Option<usize>,
    fail_burn: bool,
    audio_calls: Arc<AtomicUsize>,
    burn_calls: Arc<AtomicUsize>,
}

impl MockMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `call`-th audio extraction (1-based)
    pub fn failing_audio_on_call(call: usize) -> Self {
        Self {
            fail_audio_on_call: Some(call),
            ..Self::default()
        }
    }

    /// Fail every burn-in request
    pub fn failing_burn() -> Self {
        Self {
            fail_burn: true,
            ..Self::default()
        }
    }

    /// Number of audio extractions requested so far
    pub fn audio_calls(&self) -> usize {
        self.audio_calls.load(Ordering::SeqCst)
    }

    /// Number of burn requests so far
    pub fn burn_calls(&self) -> usize {
        self.burn_calls.load(Ordering::SeqCst)
    }

    fn write_placeholder(output: &Path, content: &str) -> Result<(), CollaboratorError> {
        std::fs::write(output, content).map_err(|_| CollaboratorError::MissingOutput(output.to_path_buf()))
    }
}

#[async_trait]
impl MediaProcessor for MockMedia {
    async fn extract_clip(&self, _video: &Path, clip: &ClipBoundary, output: &Path) -> Result<(), CollaboratorError> {
        Self::write_placeholder(output, &format!("clip {}-{}", clip.start, clip.end))
    }

    async fn extract_audio(&self, _clip_video: &Path, output: &Path) -> Result<(), CollaboratorError> {
        let call = self.audio_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_audio_on_call == Some(call) {
            return Err(CollaboratorError::CommandFailed {
                program: "mock-ffmpeg".to_string(),
                stderr: format!("simulated audio failure on call {}", call),
            });
        }
        Self::write_placeholder(output, "wav")
    }

    async fn burn_subtitles(&self, _clip_video: &Path, _subtitles: &Path, output: &Path) -> Result<(), CollaboratorError> {
        self.burn_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_burn {
            return Err(CollaboratorError::CommandFailed {
                program: "mock-ffmpeg".to_string(),
                stderr: "simulated subtitles filter failure".to_string(),
            });
        }
        Self::write_placeholder(output, "burned")
    }
}

/// Transcriber replaying scripted transcripts in call order
#[derive(Debug, Clone, Default)]
pub struct MockTranscriber {
    transcripts: Vec<AlignedTranscript>,
    fail_on_call: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Transcripts are handed out in order, cycling when exhausted
    pub fn new(transcripts: Vec<AlignedTranscript>) -> Self {
        Self {
            transcripts,
            fail_on_call: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail the `call`-th transcription (1-based)
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Number of transcriptions requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &Path) -> Result<AlignedTranscript, CollaboratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(CollaboratorError::CommandFailed {
                program: "mock-whisperx".to_string(),
                stderr: format!("simulated transcription failure on call {}", call),
            });
        }
        if self.transcripts.is_empty() {
            return Ok(AlignedTranscript::default());
        }
        Ok(self.transcripts[(call - 1) % self.transcripts.len()].clone())
    }
}

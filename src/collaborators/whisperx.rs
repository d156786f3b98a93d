use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use tempfile::TempDir;

use crate::app_config::TranscriptionConfig;
use crate::collaborators::Transcriber;
use crate::collaborators::command::run_command;
use crate::errors::CollaboratorError;
use crate::words::AlignedTranscript;

/// Transcription and word alignment through the whisperx command line.
///
/// The handle is created once per run and reused for every clip; each call
/// writes whisperx's JSON into a scratch directory that is removed afterwards.
#[derive(Debug, Clone)]
pub struct WhisperXTranscriber {
    settings: TranscriptionConfig,
    timeout: Duration,
}

impl WhisperXTranscriber {
    pub fn new(settings: TranscriptionConfig, timeout: Duration) -> Self {
        Self { settings, timeout }
    }

    /// Command-line arguments for transcribing `audio` into `output_dir`
    pub fn build_args(&self, audio: &Path, output_dir: &Path) -> Vec<String> {
        let s = &self.settings;
        vec![
            audio.to_string_lossy().to_string(),
            "--model".to_string(),
            s.model.clone(),
            "--device".to_string(),
            s.device.clone(),
            "--compute_type".to_string(),
            s.compute_type.clone(),
            "--batch_size".to_string(),
            s.batch_size.to_string(),
            "--language".to_string(),
            s.language.clone(),
            "--output_format".to_string(),
            "json".to_string(),
            "--output_dir".to_string(),
            output_dir.to_string_lossy().to_string(),
        ]
    }

    /// Where whisperx writes the JSON for `audio`
    pub fn json_output_path(audio: &Path, output_dir: &Path) -> PathBuf {
        let stem = audio.file_stem().unwrap_or_default().to_string_lossy().to_string();
        output_dir.join(format!("{}.json", stem))
    }
}

#[async_trait]
impl Transcriber for WhisperXTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<AlignedTranscript, CollaboratorError> {
        let scratch = TempDir::new().map_err(|e| CollaboratorError::LaunchFailed {
            program: self.settings.command.clone(),
            message: format!("failed to create scratch directory: {}", e),
        })?;

        info!("Transcribing {} with {} ({})", audio.display(), self.settings.model, self.settings.device);
        let args = self.build_args(audio, scratch.path());
        run_command(&self.settings.command, &args, self.timeout).await?;

        let json_path = Self::json_output_path(audio, scratch.path());
        let content = tokio::fs::read_to_string(&json_path)
            .await
            .map_err(|_| CollaboratorError::MissingOutput(json_path.clone()))?;

        let transcript = AlignedTranscript::from_json_str(&content).map_err(|e| CollaboratorError::ParseError {
            program: self.settings.command.clone(),
            message: format!("{:#}", e),
        })?;

        debug!(
            "Transcript has {} segment(s), {} word(s), {} timed",
            transcript.segments.len(),
            transcript.word_count(),
            transcript.timed_word_count()
        );
        Ok(transcript)
    }
}

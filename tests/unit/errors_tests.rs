/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::path::PathBuf;

use clipsub::errors::{AppError, ClipError, CollaboratorError, ConfigError, SubtitleError};

#[test]
fn test_collaboratorError_commandFailed_shouldDisplayProgramAndStderr() {
    let error = CollaboratorError::CommandFailed {
        program: "ffmpeg".to_string(),
        stderr: "clip.mp4: No such file or directory".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("ffmpeg failed"));
    assert!(display.contains("No such file"));
}

#[test]
fn test_collaboratorError_timedOut_shouldDisplaySeconds() {
    let error = CollaboratorError::TimedOut {
        program: "whisperx".to_string(),
        timeout_secs: 30,
    };
    assert_eq!(error.to_string(), "whisperx timed out after 30 seconds");
}

#[test]
fn test_configError_invalidGroupRange_shouldDisplayBounds() {
    let error = ConfigError::InvalidGroupRange { min: 5, max: 2 };
    let display = error.to_string();
    assert!(display.contains("min 5"));
    assert!(display.contains("max 2"));
}

#[test]
fn test_clipError_withContextChain_shouldKeepIndexAndSource() {
    let cause = anyhow::Error::new(CollaboratorError::MissingOutput(PathBuf::from("clip_2_audio.wav")))
        .context("Failed to extract clip audio");
    let error = ClipError::new(2, cause);

    assert_eq!(error.index, 2);
    assert!(error.to_string().starts_with("Clip 2 failed"));
    assert_eq!(
        error.message,
        "Failed to extract clip audio: Expected output was not produced: clip_2_audio.wav"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_appError_fromVariants_shouldWrapCorrectly() {
    let app: AppError = ConfigError::InvalidGroupRange { min: 0, max: 1 }.into();
    assert!(matches!(app, AppError::Config(_)));

    let app: AppError = SubtitleError::WriteFailed {
        path: PathBuf::from("clip_1_srt.srt"),
        message: "disk full".to_string(),
    }
    .into();
    assert!(app.to_string().contains("Subtitle error"));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(app, AppError::Unknown(_)));
}

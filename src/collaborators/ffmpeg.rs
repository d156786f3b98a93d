use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::collaborators::command::run_command;
use crate::collaborators::{ClipBoundary, MediaProcessor};
use crate::errors::CollaboratorError;

/// ffmpeg-backed media processing
#[derive(Debug, Clone)]
pub struct FfmpegMedia {
    program: String,
    timeout: Duration,
}

impl FfmpegMedia {
    pub fn new(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            timeout,
        }
    }

    async fn ffmpeg(&self, args: Vec<String>, output: &Path) -> Result<(), CollaboratorError> {
        let mut full_args = vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
        ];
        full_args.extend(args);
        full_args.push(path_arg(output));

        run_command(&self.program, &full_args, self.timeout).await?;

        if !output.exists() {
            return Err(CollaboratorError::MissingOutput(output.to_path_buf()));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaProcessor for FfmpegMedia {
    async fn extract_clip(&self, video: &Path, clip: &ClipBoundary, output: &Path) -> Result<(), CollaboratorError> {
        debug!("Cutting {:.2}s..{:.2}s into {}", clip.start, clip.end, output.display());
        let args = vec![
            "-ss".to_string(),
            format!("{:.3}", clip.start),
            "-i".to_string(),
            path_arg(video),
            "-t".to_string(),
            format!("{:.3}", clip.duration()),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            "ultrafast".to_string(),
            "-threads".to_string(),
            "1".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
        ];
        self.ffmpeg(args, output).await
    }

    async fn extract_audio(&self, clip_video: &Path, output: &Path) -> Result<(), CollaboratorError> {
        let args = vec![
            "-i".to_string(),
            path_arg(clip_video),
            "-vn".to_string(),
            "-ac".to_string(),
            "1".to_string(),
            "-ar".to_string(),
            "16000".to_string(),
            "-c:a".to_string(),
            "pcm_s16le".to_string(),
        ];
        self.ffmpeg(args, output).await
    }

    async fn burn_subtitles(&self, clip_video: &Path, subtitles: &Path, output: &Path) -> Result<(), CollaboratorError> {
        let args = vec![
            "-i".to_string(),
            path_arg(clip_video),
            "-vf".to_string(),
            subtitles_filter(subtitles),
            "-c:a".to_string(),
            "copy".to_string(),
        ];
        self.ffmpeg(args, output).await
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// `subtitles=` filter argument with the path escaped for the filtergraph parser
pub fn subtitles_filter(subtitles: &Path) -> String {
    let escaped = subtitles
        .to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'");
    format!("subtitles='{}':force_style='Alignment=2'", escaped)
}

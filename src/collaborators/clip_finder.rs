use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::info;

use crate::collaborators::command::run_command;
use crate::collaborators::{ClipBoundary, ClipFinder};
use crate::errors::CollaboratorError;

/// Clip finder backed by an external command.
///
/// The command line comes from configuration; every `{input}` argument is
/// replaced by the video path. The command must print a JSON array of
/// `{"start_time": .., "end_time": ..}` objects on stdout.
#[derive(Debug, Clone)]
pub struct CommandClipFinder {
    command: Vec<String>,
    timeout: Duration,
}

impl CommandClipFinder {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// Program name and substituted arguments for `video`
    pub fn command_line(&self, video: &Path) -> (String, Vec<String>) {
        let video = video.to_string_lossy();
        let mut parts = self.command.iter().map(|part| part.replace("{input}", &video));
        let program = parts.next().unwrap_or_default();
        (program, parts.collect())
    }

    /// Parse the command's stdout
    pub fn parse_boundaries(program: &str, stdout: &str) -> Result<Vec<ClipBoundary>, CollaboratorError> {
        serde_json::from_str(stdout.trim()).map_err(|e| CollaboratorError::ParseError {
            program: program.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ClipFinder for CommandClipFinder {
    async fn find_clips(&self, video: &Path) -> Result<Vec<ClipBoundary>, CollaboratorError> {
        let (program, args) = self.command_line(video);
        let output = run_command(&program, &args, self.timeout).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let clips = Self::parse_boundaries(&program, &stdout)?;
        info!("Clip finder proposed {} clip(s)", clips.len());
        Ok(clips)
    }
}

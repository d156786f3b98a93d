use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;

use log::{debug, error};
use tokio::process::Command;

use crate::errors::CollaboratorError;

// @module: Running external tools with a timeout

/// Run `program` with `args`, failing on launch errors, timeouts and non-zero exit.
///
/// The child is killed if the timeout fires.
pub async fn run_command<I, S>(program: &str, args: I, timeout: Duration) -> Result<Output, CollaboratorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    debug!("Running {:?}", command.as_std());

    let output = tokio::select! {
        result = command.output() => {
            result.map_err(|e| CollaboratorError::LaunchFailed {
                program: program.to_string(),
                message: e.to_string(),
            })?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(CollaboratorError::TimedOut {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let filtered = filter_tool_stderr(&stderr);
        error!("{} exited with {}: {}", program, output.status, filtered);
        return Err(CollaboratorError::CommandFailed {
            program: program.to_string(),
            stderr: filtered,
        });
    }

    Ok(output)
}

/// Keep only meaningful stderr lines, stripping version banners, build
/// configuration and stream metadata noise.
pub fn filter_tool_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "encoder",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "unknown error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}

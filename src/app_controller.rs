use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{ClipFailurePolicy, Config};
use crate::clip_subtitles::ClipSubtitles;
use crate::collaborators::{
    ClipBoundary, ClipFinder, CommandClipFinder, FfmpegMedia, MediaProcessor, Transcriber, WhisperXTranscriber,
};
use crate::errors::{AppError, ClipError};
use crate::file_utils::{ClipArtifactPaths, FileManager};
use crate::line_grouper::RandomGroupSizer;
use crate::words::AlignedTranscript;

// @module: Application controller for the clip subtitle pipeline

/// Outcome of one pipeline run over a source video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Boundaries proposed by the clip finder
    pub clips_found: usize,
    /// Boundaries short enough to process
    pub clips_kept: usize,
    /// Artifacts of every clip that completed
    pub completed: Vec<ClipArtifactPaths>,
    /// Index and error message of every skipped clip
    pub skipped: Vec<(usize, String)>,
}

/// Main application controller
///
/// Collaborators are built once and shared by every clip of a run.
pub struct Controller {
    // @field: App configuration
    config: Config,
    clip_finder: Box<dyn ClipFinder>,
    media: Box<dyn MediaProcessor>,
    transcriber: Box<dyn Transcriber>,
}

impl Controller {
    // @method: Create a controller backed by the external tools named in the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.pipeline.command_timeout_secs);
        let clip_finder = CommandClipFinder::new(config.pipeline.clip_finder_command.clone(), timeout);
        let media = FfmpegMedia::new(&config.pipeline.ffmpeg_path, timeout);
        let transcriber = WhisperXTranscriber::new(config.transcription.clone(), timeout);

        Self::with_collaborators(config, Box::new(clip_finder), Box::new(media), Box::new(transcriber))
    }

    // @method: Create a controller with explicit collaborators
    pub fn with_collaborators(
        config: Config,
        clip_finder: Box<dyn ClipFinder>,
        media: Box<dyn MediaProcessor>,
        transcriber: Box<dyn Transcriber>,
    ) -> Result<Self> {
        config.validate().map_err(AppError::from)?;

        Ok(Self {
            config,
            clip_finder,
            media,
            transcriber,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline on one video, writing into the configured clips folder
    pub async fn run(&self, video: &Path) -> Result<RunSummary> {
        let output_dir = self.config.pipeline.clips_folder_path.clone();
        self.run_into(video, &output_dir).await
    }

    /// Run the pipeline on one video, writing clip artifacts into `output_dir`
    pub async fn run_into(&self, video: &Path, output_dir: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();

        if !video.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", video));
        }
        FileManager::ensure_dir(output_dir)?;

        let boundaries = self
            .clip_finder
            .find_clips(video)
            .await
            .with_context(|| format!("Failed to find clips in {:?}", video))?;

        let max_duration = self.config.pipeline.max_clip_duration_secs;
        let clips: Vec<ClipBoundary> = boundaries
            .iter()
            .filter(|clip| clip.duration() <= max_duration)
            .copied()
            .collect();

        let mut summary = RunSummary {
            clips_found: boundaries.len(),
            clips_kept: clips.len(),
            ..RunSummary::default()
        };
        info!(
            "Keeping {} of {} clip(s) no longer than {}s",
            clips.len(),
            boundaries.len(),
            max_duration
        );

        let progress_bar = ProgressBar::new(clips.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} clips ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        for (position, clip) in clips.iter().enumerate() {
            let index = position + 1;
            progress_bar.set_message(format!("clip {}", index));

            match self.process_clip(video, index, clip, output_dir).await {
                Ok(paths) => summary.completed.push(paths),
                Err(e) => {
                    let clip_error = ClipError::new(index, e);
                    match self.config.pipeline.on_clip_failure {
                        ClipFailurePolicy::Halt => {
                            progress_bar.abandon_with_message(format!("clip {} failed", index));
                            error!("{}", clip_error);
                            return Err(AppError::from(clip_error).into());
                        }
                        ClipFailurePolicy::Skip => {
                            warn!("{}; continuing with the next clip", clip_error);
                            summary.skipped.push((index, clip_error.message.clone()));
                        }
                    }
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");
        info!(
            "Finished {:?}: {} clip(s) written, {} skipped in {}",
            video,
            summary.completed.len(),
            summary.skipped.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Extract, transcribe, subtitle and optionally burn one clip
    async fn process_clip(
        &self,
        video: &Path,
        index: usize,
        clip: &ClipBoundary,
        output_dir: &Path,
    ) -> Result<ClipArtifactPaths> {
        let paths = FileManager::clip_artifact_paths(output_dir, index);
        debug!("Processing clip {} ({:.2}s..{:.2}s)", index, clip.start, clip.end);

        self.media
            .extract_clip(video, clip, &paths.video)
            .await
            .context("Failed to extract clip video")?;
        self.media
            .extract_audio(&paths.video, &paths.audio)
            .await
            .context("Failed to extract clip audio")?;

        let transcript = self
            .transcriber
            .transcribe(&paths.audio)
            .await
            .context("Failed to transcribe clip audio")?;

        let subtitles = self.compose(&transcript, index);
        subtitles.write_to(&paths.srt, &paths.ass)?;

        if self.config.pipeline.burn_subtitles {
            if let Err(e) = self.media.burn_subtitles(&paths.video, &paths.ass, &paths.subtitled).await {
                // A failed clip keeps no subtitle artifacts
                FileManager::remove_files(&[paths.srt.as_path(), paths.ass.as_path(), paths.subtitled.as_path()]);
                return Err(anyhow::Error::new(e).context("Failed to burn subtitles"));
            }
        }

        Ok(paths)
    }

    /// Group and compose a transcript; a configured seed is offset by the clip index
    pub fn compose(&self, transcript: &AlignedTranscript, index: usize) -> ClipSubtitles {
        let grouping = &self.config.grouping;
        let style = &self.config.style;

        match grouping.seed {
            Some(seed) => {
                let sizer = RandomGroupSizer::seeded(seed.wrapping_add(index as u64));
                ClipSubtitles::compose(transcript, grouping, style, sizer)
            }
            None => ClipSubtitles::compose(transcript, grouping, style, RandomGroupSizer::from_thread_rng()),
        }
    }

    /// Build both subtitle files from an aligner JSON file without running any external tool
    pub fn subtitle_from_file(&self, words_file: &Path, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let content = FileManager::read_to_string(words_file)?;
        let transcript = AlignedTranscript::from_json_str(&content)
            .with_context(|| format!("Failed to read word stream from {:?}", words_file))?;

        let stem = words_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "subtitles".to_string());
        let srt_path = output_dir.join(format!("{}_srt.srt", stem));
        let ass_path = output_dir.join(format!("{}_ass.ass", stem));

        let subtitles = self.compose(&transcript, 1);
        subtitles.write_to(&srt_path, &ass_path).map_err(AppError::from)?;

        info!(
            "Wrote {} line(s) and {} highlight event(s) to {:?}",
            subtitles.srt.entries.len(),
            subtitles.ass.events.len(),
            output_dir
        );
        Ok((srt_path, ass_path))
    }

    /// Format a duration in a human-readable form
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the pipeline on every video below `input_dir`.
    ///
    /// Each video gets its own subfolder of the clips folder, named after the
    /// video's file stem.
    pub async fn run_folder(&self, input_dir: &Path) -> Result<Vec<(PathBuf, RunSummary)>> {
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let videos = FileManager::find_videos(input_dir)?;
        if videos.is_empty() {
            return Err(anyhow::anyhow!("No video files found in directory: {:?}", input_dir));
        }
        info!("Found {} video file(s) in {:?}", videos.len(), input_dir);

        let mut results = Vec::with_capacity(videos.len());
        for video in videos {
            let stem = video
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "video".to_string());
            let output_dir = self.config.pipeline.clips_folder_path.join(stem);

            match self.run_into(&video, &output_dir).await {
                Ok(summary) => results.push((video, summary)),
                Err(e) if self.config.pipeline.on_clip_failure == ClipFailurePolicy::Skip => {
                    warn!("Skipping {:?}: {:#}", video, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }
}

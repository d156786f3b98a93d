use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Container extensions treated as video input
const VIDEO_EXTENSIONS: [&str; 14] = [
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ogv", "ts", "mts", "m2ts",
];

// @const: Bytes read when sniffing a file without a known extension
const SNIFF_BYTES: u64 = 8 * 1024;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Artifact paths for 1-based clip `index` inside `dir`
    pub fn clip_artifact_paths<P: AsRef<Path>>(dir: P, index: usize) -> ClipArtifactPaths {
        ClipArtifactPaths::for_clip(dir.as_ref(), index)
    }

    /// Find video files below a directory, sorted by path
    pub fn find_videos<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && has_video_extension(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Write several files so that either all of them appear or none do.
    ///
    /// Every document is first written to a temporary file next to its
    /// target. Only once all writes succeeded are the temporaries renamed into
    /// place; if a rename fails the already persisted targets are removed.
    pub fn write_artifacts_atomically(artifacts: &[(&Path, &str)]) -> Result<()> {
        let mut staged = Vec::with_capacity(artifacts.len());

        for (path, content) in artifacts {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            Self::ensure_dir(parent)?;

            let mut temp = NamedTempFile::new_in(parent)
                .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
            temp.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
            temp.flush()?;
            staged.push((temp, *path));
        }

        let mut persisted: Vec<&Path> = Vec::with_capacity(staged.len());
        for (temp, path) in staged {
            if let Err(e) = temp.persist(path) {
                for done in &persisted {
                    let _ = fs::remove_file(done);
                }
                return Err(e.error).with_context(|| format!("Failed to move artifact into place: {:?}", path));
            }
            persisted.push(path);
        }

        Ok(())
    }

    /// Remove files that may exist, logging the ones that could not be deleted
    pub fn remove_files(paths: &[&Path]) {
        for path in paths {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove {:?}: {}", path, e);
                }
            }
        }
    }

    /// Classify an input file by extension, falling back to content sniffing
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if has_video_extension(path) {
            return Ok(FileType::Video);
        }

        if let Some(ext) = path.extension() {
            if ext.to_string_lossy().eq_ignore_ascii_case("json") {
                return Ok(FileType::WordStream);
            }
        }

        // Extension-less aligner dumps still start with a JSON object or array
        let mut prefix = Vec::with_capacity(SNIFF_BYTES as usize);
        fs::File::open(path)
            .and_then(|file| file.take(SNIFF_BYTES).read_to_end(&mut prefix))
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        Ok(if Self::looks_like_json(&prefix, prefix.len() < SNIFF_BYTES as usize) {
            FileType::WordStream
        } else {
            FileType::Unknown
        })
    }

    /// A truncated prefix only has to open like JSON text; a complete file must parse
    fn looks_like_json(prefix: &[u8], complete: bool) -> bool {
        let text = match std::str::from_utf8(prefix) {
            Ok(text) => text,
            // The cut may split a multi-byte character
            Err(e) if !complete && e.error_len().is_none() => {
                std::str::from_utf8(&prefix[..e.valid_up_to()]).unwrap_or_default()
            }
            Err(_) => return false,
        };

        let trimmed = text.trim_start();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            return false;
        }
        !complete || serde_json::from_str::<serde_json::Value>(text).is_ok()
    }
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Enum representing different input file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Video file handed to the clip pipeline
    Video,
    /// Aligned word stream (whisperx JSON)
    WordStream,
    /// Unknown file type
    Unknown,
}

/// Output locations for one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipArtifactPaths {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub srt: PathBuf,
    pub ass: PathBuf,
    pub subtitled: PathBuf,
}

impl ClipArtifactPaths {
    pub fn for_clip(dir: &Path, index: usize) -> Self {
        Self {
            video: dir.join(format!("clip_{}.mp4", index)),
            audio: dir.join(format!("clip_{}_audio.wav", index)),
            srt: dir.join(format!("clip_{}_srt.srt", index)),
            ass: dir.join(format!("clip_{}_ass.ass", index)),
            subtitled: dir.join(format!("clip_{}_subtitled.mp4", index)),
        }
    }
}

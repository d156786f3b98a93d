/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;

use clipsub::file_utils::{ClipArtifactPaths, FileManager, FileType};

use crate::common;

/// Test ensuring a directory exists
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // Idempotent on an existing directory
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

#[test]
fn test_clipArtifactPaths_withIndex_shouldFollowNamingScheme() {
    let paths = FileManager::clip_artifact_paths("/out", 3);
    assert_eq!(
        paths,
        ClipArtifactPaths {
            video: "/out/clip_3.mp4".into(),
            audio: "/out/clip_3_audio.wav".into(),
            srt: "/out/clip_3_srt.srt".into(),
            ass: "/out/clip_3_ass.ass".into(),
            subtitled: "/out/clip_3_subtitled.mp4".into(),
        }
    );
}

/// Test finding videos recursively
#[test]
fn test_find_videos_withMixedFiles_shouldReturnSortedVideosOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub = temp_dir.path().join("nested");
    fs::create_dir(&sub)?;

    common::create_test_file(temp_dir.path(), "b.mp4", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;
    common::create_test_file(&sub, "a.MKV", "")?;
    common::create_test_file(&sub, "words.json", "[]")?;

    let videos = FileManager::find_videos(temp_dir.path())?;
    assert_eq!(videos.len(), 2);
    assert!(videos.iter().any(|p| p.ends_with("b.mp4")));
    assert!(videos.iter().any(|p| p.ends_with("nested/a.MKV")));
    let mut sorted = videos.clone();
    sorted.sort();
    assert_eq!(videos, sorted);
    Ok(())
}

#[test]
fn test_detect_file_type_withKnownAndUnknownFiles_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "talk.mov", "")?;
    let words = common::create_test_file(temp_dir.path(), "clip.json", "{}")?;
    let dump = common::create_test_file(temp_dir.path(), "aligned", r#"[{"word": "hi"}]"#)?;
    let text = common::create_test_file(temp_dir.path(), "readme", "hello")?;

    assert_eq!(FileManager::detect_file_type(&video)?, FileType::Video);
    assert_eq!(FileManager::detect_file_type(&words)?, FileType::WordStream);
    assert_eq!(FileManager::detect_file_type(&dump)?, FileType::WordStream);
    assert_eq!(FileManager::detect_file_type(&text)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.mp4")).is_err());
    Ok(())
}

/// Large extension-less files are classified from their first bytes only
#[test]
fn test_detect_file_type_withLargeUnknownFiles_shouldSniffPrefix() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let mut transcript = String::from("[");
    for i in 0..2_000 {
        transcript.push_str(&format!(r#"{{"word": "w{}", "start": {}.0, "end": {}.5}},"#, i, i, i));
    }
    transcript.push_str(r#"{"word": "end"}]"#);
    let long_dump = common::create_test_file(temp_dir.path(), "aligned_long", &transcript)?;

    let binary = temp_dir.path().join("recording");
    fs::write(&binary, vec![0u8; 64 * 1024])?;

    assert_eq!(FileManager::detect_file_type(&long_dump)?, FileType::WordStream);
    assert_eq!(FileManager::detect_file_type(&binary)?, FileType::Unknown);
    Ok(())
}

#[test]
fn test_remove_files_withPresentAndMissingFiles_shouldDeleteWhatExists() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "clip_1_srt.srt", "x")?;
    let missing = temp_dir.path().join("clip_1_ass.ass");

    FileManager::remove_files(&[srt.as_path(), missing.as_path()]);

    assert!(!srt.exists());
    assert!(!missing.exists());
    Ok(())
}

#[test]
fn test_write_artifacts_atomically_withTwoFiles_shouldWriteBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = temp_dir.path().join("out").join("one.srt");
    let second = temp_dir.path().join("out").join("one.ass");

    FileManager::write_artifacts_atomically(&[(first.as_path(), "srt body"), (second.as_path(), "ass body")])?;

    assert_eq!(FileManager::read_to_string(&first)?, "srt body");
    assert_eq!(FileManager::read_to_string(&second)?, "ass body");

    // No temporary files left next to the artifacts
    let leftovers = fs::read_dir(temp_dir.path().join("out"))?.count();
    assert_eq!(leftovers, 2);
    Ok(())
}

#[test]
fn test_write_artifacts_atomically_withBlockedTarget_shouldRollBack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = temp_dir.path().join("one.srt");
    let blocked = temp_dir.path().join("one.ass");
    fs::create_dir(&blocked)?;
    common::create_test_file(&blocked, "occupied", "x")?;

    let result = FileManager::write_artifacts_atomically(&[(first.as_path(), "a"), (blocked.as_path(), "b")]);

    assert!(result.is_err());
    assert!(!first.exists());
    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep").join("file.txt");

    FileManager::write_to_file(&path, "content")?;
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}

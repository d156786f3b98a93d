/*!
 * Integration tests for the word stream to subtitle files workflow
 */

use anyhow::Result;

use clipsub::app_controller::Controller;
use clipsub::collaborators::mock::{MockClipFinder, MockMedia, MockTranscriber};
use clipsub::file_utils::FileManager;

use crate::common;

fn offline_controller(group_size: usize, out: &std::path::Path) -> Result<Controller> {
    Controller::with_collaborators(
        common::test_config(out, group_size),
        Box::new(MockClipFinder::default()),
        Box::new(MockMedia::new()),
        Box::new(MockTranscriber::default()),
    )
}

/// A whisperx JSON file becomes an SRT and an ASS file
#[test]
fn test_subtitleFromFile_withWhisperxJson_shouldWriteBothFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let words = common::create_test_file(temp_dir.path(), "clip_1_audio.json", common::sample_whisperx_json())?;
    let out = temp_dir.path().join("out");

    let controller = offline_controller(3, &out)?;
    let (srt_path, ass_path) = controller.subtitle_from_file(&words, &out)?;

    assert!(srt_path.ends_with("clip_1_audio_srt.srt"));
    assert!(ass_path.ends_with("clip_1_audio_ass.ass"));

    // The untimed number stays visible but the line is timed from its timed words
    assert_eq!(
        FileManager::read_to_string(&srt_path)?,
        "1\n00:00:00,000 --> 00:00:00,500\nIt was 1999\n\n2\n00:00:01,100 --> 00:00:02,100\nand we left.\n\n"
    );

    let ass = FileManager::read_to_string(&ass_path)?;
    // 5 timed words, 5 events
    assert_eq!(ass.lines().filter(|l| l.starts_with("Dialogue:")).count(), 5);
    Ok(())
}

#[test]
fn test_subtitleFromFile_withFlatWordArray_shouldTreatAsOneSegment() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let words = common::create_test_file(
        temp_dir.path(),
        "words.json",
        r#"[{"word": "hi", "start": 0.0, "end": 0.5},
            {"word": "there", "start": 0.5, "end": 1.0},
            {"word": "friend", "start": 1.0, "end": 1.6}]"#,
    )?;
    let out = temp_dir.path().to_path_buf();

    let controller = offline_controller(2, &out)?;
    let (srt_path, _) = controller.subtitle_from_file(&words, &out)?;

    assert_eq!(
        FileManager::read_to_string(&srt_path)?,
        "1\n00:00:00,000 --> 00:00:01,000\nhi there\n\n2\n00:00:01,000 --> 00:00:01,600\nfriend\n\n"
    );
    Ok(())
}

#[test]
fn test_subtitleFromFile_withMalformedJson_shouldFailWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let words = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;
    let out = temp_dir.path().join("out");

    let controller = offline_controller(2, &out)?;
    assert!(controller.subtitle_from_file(&words, &out).is_err());
    assert!(!out.join("broken_srt.srt").exists());
    Ok(())
}

/// A fixed seed gives the same line breaks on every run
#[test]
fn test_compose_withSameSeed_shouldBeDeterministic() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path(), 2);
    config.grouping.group_size_max = 5;
    let controller = Controller::with_collaborators(
        config,
        Box::new(MockClipFinder::default()),
        Box::new(MockMedia::new()),
        Box::new(MockTranscriber::default()),
    )?;

    let words: Vec<String> = (0..30).map(|i| format!("w{}", i)).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let transcript = clipsub::words::AlignedTranscript::new(vec![clipsub::words::Segment::from_words(
        common::timed_words(&refs),
    )]);

    let first = controller.compose(&transcript, 4);
    let second = controller.compose(&transcript, 4);
    assert_eq!(first.srt.to_srt_string(), second.srt.to_srt_string());
    assert_eq!(first.ass.to_ass_string(), second.ass.to_ass_string());
    Ok(())
}

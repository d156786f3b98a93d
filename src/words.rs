/*!
 * Word stream types produced by the alignment collaborator.
 *
 * The aligner emits segments of recognized words. Individual words may lack
 * `start`/`end` when alignment could not place them (numbers and symbols are
 * the usual culprits), so timing is optional on the input side and only
 * [`TimedWord`] carries guaranteed timing.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// @struct: Single recognized word as reported by the aligner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    // @field: Recognized text
    pub word: String,

    // @field: Start time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    // @field: End time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl WordEntry {
    /// Word with both timestamps
    pub fn timed(word: &str, start: f64, end: f64) -> Self {
        Self {
            word: word.to_string(),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Word the aligner could not place in time
    pub fn untimed(word: &str) -> Self {
        Self {
            word: word.to_string(),
            start: None,
            end: None,
        }
    }

    /// Timed view of this word, if both start and end are known
    pub fn as_timed(&self) -> Option<TimedWord> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(TimedWord {
                text: self.word.clone(),
                start,
                end,
            }),
            _ => None,
        }
    }
}

/// A word with a defined `[start, end)` window in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimedWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// One aligned segment; grouping never crosses segment boundaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub words: Vec<WordEntry>,
}

impl Segment {
    /// Build a segment from a bare word list
    pub fn from_words(words: Vec<WordEntry>) -> Self {
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            start: words.iter().find_map(|w| w.start),
            end: words.iter().rev().find_map(|w| w.end),
            text,
            words,
        }
    }
}

/// Aligned transcript of one clip's audio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedTranscript {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Accepted JSON layouts for a word stream file. `Words` is tried before
/// `Segments` because every segment field is optional.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptJson {
    Transcript(AlignedTranscript),
    Words(Vec<WordEntry>),
    Segments(Vec<Segment>),
}

impl AlignedTranscript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parse aligner JSON: a `{"segments": [...]}` object, a bare segment array,
    /// or a flat word array (treated as a single segment)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let parsed: TranscriptJson =
            serde_json::from_str(content).context("Failed to parse aligned transcript JSON")?;

        Ok(match parsed {
            TranscriptJson::Transcript(transcript) => transcript,
            TranscriptJson::Words(words) => Self::new(vec![Segment::from_words(words)]),
            TranscriptJson::Segments(segments) => Self::new(segments),
        })
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// Number of words carrying both timestamps
    pub fn timed_word_count(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|s| s.words.iter())
            .filter(|w| w.start.is_some() && w.end.is_some())
            .count()
    }
}

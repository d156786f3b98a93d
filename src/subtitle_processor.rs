use std::fmt;

use log::warn;

use crate::line_grouper::Line;
use crate::timecode;

// @module: Plain sequential subtitle (SRT) track

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: 1-based sequence number
    pub seq_num: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start: f64, end: f64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start,
            end,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_srt_timestamp(self.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_srt_timestamp(self.end)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered SRT track for one clip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleCollection {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Build the track from grouped lines: one entry per line, numbered from 1
    pub fn from_lines(lines: &[Line]) -> Self {
        let entries = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if line.start >= line.end {
                    warn!(
                        "Subtitle {} has a non-positive duration ({} -> {})",
                        i + 1,
                        line.start,
                        line.end
                    );
                }
                SubtitleEntry::new(i + 1, line.start, line.end, line.text.clone())
            })
            .collect();

        Self { entries }
    }

    /// Render the whole track as SRT text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }
}

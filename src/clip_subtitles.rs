/*!
 * Per-clip subtitle composition.
 *
 * Ties the grouper and both composers together: a clip's aligned transcript
 * becomes a set of lines, the SRT track and the karaoke ASS document, all held
 * in memory until they are written side by side.
 */

use std::path::Path;

use log::debug;

use crate::app_config::{GroupingConfig, StyleConfig};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::karaoke::{AssDocument, KaraokeComposer};
use crate::line_grouper::{GroupSizer, GroupingStats, Line, LineGrouper};
use crate::subtitle_processor::SubtitleCollection;
use crate::words::AlignedTranscript;

/// Both subtitle documents for one clip
#[derive(Debug, Clone)]
pub struct ClipSubtitles {
    pub lines: Vec<Line>,
    pub srt: SubtitleCollection,
    pub ass: AssDocument,
    pub stats: GroupingStats,
}

impl ClipSubtitles {
    /// Group `transcript` and compose both documents
    pub fn compose<S: GroupSizer>(
        transcript: &AlignedTranscript,
        grouping: &GroupingConfig,
        style: &StyleConfig,
        sizer: S,
    ) -> Self {
        let mut grouper = LineGrouper::new(grouping.group_size_min, grouping.group_size_max, sizer);
        let lines = grouper.group_segments(&transcript.segments);
        let mut subtitles = Self::from_lines(lines, style);
        subtitles.stats = grouper.stats();
        subtitles
    }

    /// Compose both documents from already grouped lines
    pub fn from_lines(lines: Vec<Line>, style: &StyleConfig) -> Self {
        let srt = SubtitleCollection::from_lines(&lines);
        let ass = KaraokeComposer::new(style).compose_document(&lines);
        debug!("Composed {} subtitle entries and {} highlight events", srt.entries.len(), ass.events.len());

        Self {
            lines,
            srt,
            ass,
            stats: GroupingStats::default(),
        }
    }

    /// Write the SRT and ASS documents; neither file is left behind unless both are written
    pub fn write_to(&self, srt_path: &Path, ass_path: &Path) -> Result<(), SubtitleError> {
        let srt = self.srt.to_srt_string();
        let ass = self.ass.to_ass_string();

        FileManager::write_artifacts_atomically(&[(srt_path, srt.as_str()), (ass_path, ass.as_str())]).map_err(
            |e| SubtitleError::WriteFailed {
                path: srt_path.to_path_buf(),
                message: format!("{:#}", e),
            },
        )
    }
}

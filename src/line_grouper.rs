/*!
 * Grouping of timed words into subtitle lines.
 *
 * The stream is walked with a cursor. At each step a group size is drawn from
 * the configured inclusive range and the next that many words become a
 * candidate line. Words without timing stay in the line's visible text but are
 * excluded from its timed words; a candidate with no timed word at all is
 * dropped. The cursor always advances by the candidate size.
 */

use log::{debug, warn};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::words::{Segment, TimedWord, WordEntry};

/// Source of line sizes for the grouper
pub trait GroupSizer {
    /// Draw a group size in `[min, max]` (inclusive)
    fn draw_group_size(&mut self, min: usize, max: usize) -> usize;
}

/// Uniform random group sizes backed by any `rand` generator
#[derive(Debug)]
pub struct RandomGroupSizer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomGroupSizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomGroupSizer<ThreadRng> {
    /// Sizer driven by the thread-local generator
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl RandomGroupSizer<StdRng> {
    /// Reproducible sizer for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GroupSizer for RandomGroupSizer<R> {
    fn draw_group_size(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }
}

/// Always returns the same size, clamped to the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedGroupSizer(pub usize);

impl GroupSizer for FixedGroupSizer {
    fn draw_group_size(&mut self, min: usize, max: usize) -> usize {
        self.0.clamp(min, max)
    }
}

/// Replays a fixed sequence of sizes, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceGroupSizer {
    sizes: Vec<usize>,
    next: usize,
}

impl SequenceGroupSizer {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes, next: 0 }
    }
}

impl GroupSizer for SequenceGroupSizer {
    fn draw_group_size(&mut self, min: usize, max: usize) -> usize {
        if self.sizes.is_empty() {
            return min;
        }
        let size = self.sizes[self.next % self.sizes.len()];
        self.next += 1;
        size.clamp(min, max)
    }
}

/// One subtitle line.
///
/// `text` holds every candidate word, timed or not, while `words` only holds
/// the timed ones. A line's token count can therefore exceed its word count.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<TimedWord>,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Line {
    /// Whitespace tokens of the displayed text
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// True when untimed words were folded into the displayed text
    pub fn has_untimed_words(&self) -> bool {
        self.tokens().len() != self.words.len()
    }
}

/// Bookkeeping from one grouping run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStats {
    pub candidate_groups: usize,
    pub emitted_lines: usize,
    pub discarded_groups: usize,
    pub untimed_words: usize,
}

/// Partitions word streams into subtitle lines
#[derive(Debug)]
pub struct LineGrouper<S: GroupSizer> {
    min: usize,
    max: usize,
    sizer: S,
    stats: GroupingStats,
}

impl<S: GroupSizer> LineGrouper<S> {
    /// Create a grouper for the inclusive size range `[min, max]`.
    ///
    /// The range must satisfy `1 <= min <= max`; this is checked when the
    /// configuration is validated.
    pub fn new(min: usize, max: usize, sizer: S) -> Self {
        debug_assert!(min >= 1 && min <= max, "invalid group range {}..={}", min, max);
        Self {
            min,
            max,
            sizer,
            stats: GroupingStats::default(),
        }
    }

    /// Statistics accumulated since construction
    pub fn stats(&self) -> GroupingStats {
        self.stats
    }

    /// Group a flat word stream into lines
    pub fn group(&mut self, words: &[WordEntry]) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut cursor = 0;

        while cursor < words.len() {
            // a zero draw would never advance the cursor
            let size = self.sizer.draw_group_size(self.min, self.max).max(1);
            let end = (cursor + size).min(words.len());
            let candidate = &words[cursor..end];
            self.stats.candidate_groups += 1;

            let timed: Vec<TimedWord> = candidate.iter().filter_map(WordEntry::as_timed).collect();
            self.stats.untimed_words += candidate.len() - timed.len();

            if timed.is_empty() {
                debug!(
                    "Discarding group of {} word(s) at position {} with no timing",
                    candidate.len(),
                    cursor
                );
                self.stats.discarded_groups += 1;
            } else {
                let text = candidate
                    .iter()
                    .map(|w| w.word.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let start = timed[0].start;
                let end_time = timed[timed.len() - 1].end;
                if end_time < start {
                    warn!("Line '{}' ends before it starts ({} < {})", text, end_time, start);
                }

                lines.push(Line {
                    words: timed,
                    start,
                    end: end_time,
                    text,
                });
                self.stats.emitted_lines += 1;
            }

            cursor += size;
        }

        lines
    }

    /// Group each segment independently and concatenate the lines in order
    pub fn group_segments(&mut self, segments: &[Segment]) -> Vec<Line> {
        let mut lines = Vec::new();
        for segment in segments {
            lines.extend(self.group(&segment.words));
        }

        debug!(
            "Grouped {} segment(s) into {} line(s), {} group(s) discarded, {} untimed word(s)",
            segments.len(),
            self.stats.emitted_lines,
            self.stats.discarded_groups,
            self.stats.untimed_words
        );

        lines
    }
}

/*!
 * Property tests for line grouping
 */

use std::cell::RefCell;
use std::rc::Rc;

use clipsub::line_grouper::{FixedGroupSizer, GroupSizer, LineGrouper, RandomGroupSizer, SequenceGroupSizer};
use clipsub::words::WordEntry;

use crate::common;

/// Sizer that records every size it hands out
struct RecordingSizer<S: GroupSizer> {
    inner: S,
    drawn: Rc<RefCell<Vec<usize>>>,
}

impl<S: GroupSizer> GroupSizer for RecordingSizer<S> {
    fn draw_group_size(&mut self, min: usize, max: usize) -> usize {
        let size = self.inner.draw_group_size(min, max);
        self.drawn.borrow_mut().push(size);
        size
    }
}

fn long_stream(len: usize) -> Vec<WordEntry> {
    let texts: Vec<String> = (0..len).map(|i| format!("w{}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    common::timed_words(&refs)
}

/// Every timed word lands in exactly one line, in input order
#[test]
fn test_group_withRandomSizes_shouldPartitionTheStream() {
    let words = long_stream(103);
    for seed in 0..20 {
        let lines = LineGrouper::new(2, 5, RandomGroupSizer::seeded(seed)).group(&words);

        let joined: Vec<String> = lines
            .iter()
            .flat_map(|l| l.words.iter().map(|w| w.text.clone()))
            .collect();
        let expected: Vec<String> = words.iter().map(|w| w.word.clone()).collect();
        assert_eq!(joined, expected, "seed {}", seed);
    }
}

/// Every candidate is within bounds, except a short final one
#[test]
fn test_group_withRecordedDraws_shouldRespectSizeBounds() {
    let words = long_stream(57);
    let drawn = Rc::new(RefCell::new(Vec::new()));
    let mut grouper = LineGrouper::new(
        3,
        6,
        RecordingSizer {
            inner: RandomGroupSizer::seeded(99),
            drawn: Rc::clone(&drawn),
        },
    );
    let lines = grouper.group(&words);

    assert!(drawn.borrow().iter().all(|size| (3..=6).contains(size)));
    assert_eq!(drawn.borrow().len(), grouper.stats().candidate_groups);

    let (last, rest) = lines.split_last().unwrap();
    for line in rest {
        assert!((3..=6).contains(&line.words.len()), "line '{}' out of range", line.text);
    }
    assert!(last.words.len() <= 6 && !last.words.is_empty());
    assert_eq!(grouper.stats().candidate_groups, lines.len());
}

#[test]
fn test_group_withUntimedWords_shouldStillAdvanceByCandidateSize() {
    // Positions 2 and 5 are untimed; sizes 3,3,3 cover all nine words
    let mut words = long_stream(9);
    words[2] = WordEntry::untimed("x");
    words[5] = WordEntry::untimed("y");

    let lines = LineGrouper::new(3, 3, SequenceGroupSizer::new(vec![3])).group(&words);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].text, "w0 w1 x");
    assert_eq!(lines[0].words.len(), 2);
    assert_eq!(lines[1].text, "w3 w4 y");
    assert_eq!(lines[2].text, "w6 w7 w8");
}

/// Line boundaries come from the first and last timed words
#[test]
fn test_group_withLeadingUntimedWord_shouldTimeFromTimedSubset() {
    let words = vec![
        WordEntry::untimed("$5"),
        WordEntry::timed("dollars", 3.0, 3.4),
        WordEntry::timed("please", 3.4, 3.9),
        WordEntry::untimed("!"),
    ];
    let lines = LineGrouper::new(4, 4, FixedGroupSizer(4)).group(&words);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].start, 3.0);
    assert_eq!(lines[0].end, 3.9);
    assert_eq!(lines[0].text, "$5 dollars please !");
}

/// Lines are ordered by time and never overlap when the input does not
#[test]
fn test_group_withMonotonicInput_shouldProduceOrderedLines() {
    let words = long_stream(40);
    let lines = LineGrouper::new(1, 4, RandomGroupSizer::seeded(5)).group(&words);

    for pair in lines.windows(2) {
        assert!(pair[0].end <= pair[1].start);
        assert!(pair[0].start <= pair[0].end);
    }
}

#[test]
fn test_group_withSingleWordGroups_shouldEmitOneLinePerWord() {
    let words = long_stream(5);
    let lines = LineGrouper::new(1, 1, RandomGroupSizer::from_thread_rng()).group(&words);
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.words.len() == 1));
}

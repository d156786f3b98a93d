/*!
 * Tests for karaoke ASS composition
 */

use clipsub::app_config::StyleConfig;
use clipsub::karaoke::{HIGHLIGHT_STYLE, KaraokeComposer};
use clipsub::line_grouper::{FixedGroupSizer, LineGrouper, RandomGroupSizer};
use clipsub::words::WordEntry;

use crate::common;

fn highlight_style() -> StyleConfig {
    StyleConfig {
        bg_radius: 8.0,
        ..StyleConfig::default()
    }
}

/// One event per timed word, each spanning that word's window
#[test]
fn test_composeEvents_withRandomLines_shouldCoverEveryTimedWord() {
    let words = common::timed_words(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
    let lines = LineGrouper::new(2, 4, RandomGroupSizer::seeded(3)).group(&words);
    let style = highlight_style();
    let events = KaraokeComposer::new(&style).compose_events(&lines);

    assert_eq!(events.len(), words.len());
    for (event, word) in events.iter().zip(&words) {
        assert_eq!(Some(event.start), word.start);
        assert_eq!(Some(event.end), word.end);
        assert_eq!(event.style, HIGHLIGHT_STYLE);
        assert_eq!(event.layer, 0);
    }
}

#[test]
fn test_composeDocument_withHiThereFriend_shouldMatchExpectedEvents() {
    let transcript = common::hi_there_friend();
    let lines = LineGrouper::new(2, 2, FixedGroupSizer(2)).group_segments(&transcript.segments);
    let style = highlight_style();
    let document = KaraokeComposer::new(&style).compose_document(&lines);
    let ass = document.to_ass_string();

    let dialogues: Vec<&str> = ass.lines().filter(|l| l.starts_with("Dialogue:")).collect();
    assert_eq!(
        dialogues,
        vec![
            "Dialogue: 0,0:00:00.00,0:00:00.50,Highlight,,0,0,0,,{\\rHighlight}{\\bord8}{\\xbord1.5}{\\ybord1.5}{\\shad0}hi{\\rDefault} there",
            "Dialogue: 0,0:00:00.50,0:00:01.00,Highlight,,0,0,0,,{\\rDefault}hi {\\rHighlight}{\\bord8}{\\xbord1.5}{\\ybord1.5}{\\shad0}there{\\rDefault}",
            "Dialogue: 0,0:00:01.00,0:00:01.60,Highlight,,0,0,0,,{\\rHighlight}{\\bord8}{\\xbord1.5}{\\ybord1.5}{\\shad0}friend{\\rDefault}",
        ]
    );
    assert!(!ass.ends_with('\n'));
}

#[test]
fn test_headerLines_withCustomStyle_shouldRenderStyleFields() {
    let style = StyleConfig {
        font_name: "Montserrat".to_string(),
        font_size: 48,
        italic: true,
        highlight_color: "&H0000FFFF".to_string(),
        highlight_bg_color: "&H00202020".to_string(),
        ..StyleConfig::default()
    };
    let header = KaraokeComposer::new(&style).header_lines();

    let default = header.iter().find(|l| l.starts_with("Style: Default,")).unwrap();
    assert!(default.starts_with("Style: Default,Montserrat,48,&H00FFFFFF,&H000000FF,&H00000000,&H64000000,-1,-1,0,0,"));

    let highlight = header.iter().find(|l| l.starts_with("Style: Highlight,")).unwrap();
    assert!(highlight.starts_with("Style: Highlight,Montserrat,48,&H0000FFFF,&H0000FFFF,&H00202020,&H00202020,"));
}

/// Same lines always render to the same document
#[test]
fn test_composeDocument_calledTwice_shouldBeIdentical() {
    let words = common::timed_words(&["one", "two", "three", "four", "five"]);
    let lines = LineGrouper::new(2, 3, RandomGroupSizer::seeded(11)).group(&words);
    let style = StyleConfig::default();
    let composer = KaraokeComposer::new(&style);

    assert_eq!(
        composer.compose_document(&lines).to_ass_string(),
        composer.compose_document(&lines).to_ass_string()
    );
}

/// An untimed word shifts highlighting to the wrong token; the shift is kept as-is
#[test]
fn test_composeLine_withUntimedMiddleWord_shouldHighlightByTimedIndex() {
    let words = vec![
        WordEntry::timed("it", 0.0, 0.2),
        WordEntry::untimed("1999"),
        WordEntry::timed("ended", 0.6, 1.0),
    ];
    let lines = LineGrouper::new(3, 3, FixedGroupSizer(3)).group(&words);
    let style = StyleConfig::default();
    let events = KaraokeComposer::new(&style).compose_line(&lines[0]);

    assert_eq!(events.len(), 2);
    assert_eq!((events[1].start, events[1].end), (0.6, 1.0));
    assert!(events[1].text.contains("{\\shad0}1999{\\rDefault}"));
}

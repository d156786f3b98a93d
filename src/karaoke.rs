/*!
 * Karaoke event track (ASS).
 *
 * Every timed word of a line gets its own event spanning that word's window.
 * The event re-renders the whole line: tokens before the focus word use the
 * default style, the focus word is switched to the highlight style with a
 * boxed border, and the remaining tokens are left untagged.
 *
 * The focus token is picked by the timed word's index into the displayed
 * tokens. Lines that contain untimed words therefore highlight by position,
 * not by matching the word itself.
 */

use std::fmt;

use log::debug;

use crate::app_config::StyleConfig;
use crate::line_grouper::Line;
use crate::timecode::format_ass_timestamp;

/// Style name used for already-spoken words and the line body
pub const DEFAULT_STYLE: &str = "Default";

/// Style name carried by every event and applied to the focus word
pub const HIGHLIGHT_STYLE: &str = "Highlight";

const SCRIPT_INFO: [&str; 3] = ["[Script Info]", "Title: Styled Subtitles", "ScriptType: v4.00+"];

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str = "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// One `Dialogue:` event highlighting a single word
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightEvent {
    pub layer: u32,
    pub start: f64,
    pub end: f64,
    pub style: &'static str,
    pub text: String,
}

impl fmt::Display for HighlightEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Dialogue: {},{},{},{},,0,0,0,,{}",
            self.layer,
            format_ass_timestamp(self.start),
            format_ass_timestamp(self.end),
            self.style,
            self.text
        )
    }
}

/// Builds highlight events and the ASS document for a set of lines
#[derive(Debug, Clone, Copy)]
pub struct KaraokeComposer<'a> {
    style: &'a StyleConfig,
}

impl<'a> KaraokeComposer<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self { style }
    }

    /// Events for all lines, grouped by line and ordered by focus word
    pub fn compose_events(&self, lines: &[Line]) -> Vec<HighlightEvent> {
        lines.iter().flat_map(|line| self.compose_line(line)).collect()
    }

    /// One event per timed word of `line`
    pub fn compose_line(&self, line: &Line) -> Vec<HighlightEvent> {
        let tokens = line.tokens();
        if tokens.len() != line.words.len() {
            debug!(
                "Line '{}' has {} token(s) but {} timed word(s); highlighting by position",
                line.text,
                tokens.len(),
                line.words.len()
            );
        }

        line.words
            .iter()
            .enumerate()
            .map(|(focus, word)| HighlightEvent {
                layer: 0,
                start: word.start,
                end: word.end,
                style: HIGHLIGHT_STYLE,
                text: self.highlighted_text(&tokens, focus),
            })
            .collect()
    }

    /// Render `tokens` with the token at `focus` highlighted
    pub fn highlighted_text(&self, tokens: &[&str], focus: usize) -> String {
        let mut text = String::new();
        for (k, token) in tokens.iter().enumerate() {
            if k < focus {
                text.push_str(&format!("{{\\r{}}}{} ", DEFAULT_STYLE, token));
            } else if k == focus {
                text.push_str(&format!(
                    "{{\\r{}}}{{\\bord{}}}{{\\xbord1.5}}{{\\ybord1.5}}{{\\shad0}}{}{{\\r{}}} ",
                    HIGHLIGHT_STYLE, self.style.bg_radius, token, DEFAULT_STYLE
                ));
            } else {
                text.push_str(token);
                text.push(' ');
            }
        }
        text.trim().to_string()
    }

    /// `[Script Info]`, `[V4+ Styles]` and `[Events]` header lines
    pub fn header_lines(&self) -> Vec<String> {
        let s = self.style;
        let shared_tail = format!("{},{},{},{}", s.margin_l, s.margin_r, s.margin_v, s.encoding);
        let flags = format!(
            "{},{},{},{},{},{},{},{}",
            ass_bool(s.bold),
            ass_bool(s.italic),
            ass_bool(s.underline),
            ass_bool(s.strike_out),
            s.scale_x,
            s.scale_y,
            s.spacing,
            s.angle
        );

        let default_style = format!(
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{}",
            DEFAULT_STYLE,
            s.font_name,
            s.font_size,
            s.primary_color,
            s.secondary_color,
            s.outline_color,
            s.back_color,
            flags,
            s.border_style,
            s.outline,
            s.shadow,
            s.alignment,
            shared_tail
        );

        // opaque box (border style 3) sized by the highlight radius, bottom-centred
        let highlight_style = format!(
            "Style: {},{},{},{},{},{},{},{},3,{},{},2,{}",
            HIGHLIGHT_STYLE,
            s.font_name,
            s.font_size,
            s.highlight_color,
            s.highlight_color,
            s.highlight_bg_color,
            s.highlight_bg_color,
            flags,
            s.bg_radius,
            s.bg_radius,
            shared_tail
        );

        let mut lines: Vec<String> = SCRIPT_INFO.iter().map(|l| l.to_string()).collect();
        lines.push(String::new());
        lines.push("[V4+ Styles]".to_string());
        lines.push(STYLE_FORMAT.to_string());
        lines.push(default_style);
        lines.push(highlight_style);
        lines.push(String::new());
        lines.push("[Events]".to_string());
        lines.push(EVENT_FORMAT.to_string());
        lines
    }

    /// Full ASS document for `lines`
    pub fn compose_document(&self, lines: &[Line]) -> AssDocument {
        AssDocument {
            header: self.header_lines(),
            events: self.compose_events(lines),
        }
    }
}

fn ass_bool(flag: bool) -> i32 {
    if flag { -1 } else { 0 }
}

/// Header plus events, rendered newline-separated without a trailing newline
#[derive(Debug, Clone, PartialEq)]
pub struct AssDocument {
    pub header: Vec<String>,
    pub events: Vec<HighlightEvent>,
}

impl AssDocument {
    pub fn to_ass_string(&self) -> String {
        let mut lines = self.header.clone();
        lines.extend(self.events.iter().map(|event| event.to_string()));
        lines.join("\n")
    }
}

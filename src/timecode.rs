/*!
 * Timestamp formatting for the two subtitle formats.
 *
 * Word timings arrive as fractional seconds. They are first rounded to whole
 * microseconds, the resolution of the duration values the composers work
 * with, and every coarser field is then obtained by truncation.
 */

// @const: Microseconds per second
const MICROS_PER_SECOND: u64 = 1_000_000;

/// Convert fractional seconds to whole microseconds.
///
/// Inputs are non-negative finite durations derived from word timing; anything
/// else is an upstream contract violation.
pub fn seconds_to_micros(seconds: f64) -> u64 {
    debug_assert!(
        seconds.is_finite() && seconds >= 0.0,
        "timestamp must be a non-negative finite duration, got {}",
        seconds
    );
    (seconds * MICROS_PER_SECOND as f64).round() as u64
}

/// Format seconds as an ASS event timestamp `H:MM:SS.CC`.
///
/// Hours are unpadded, centiseconds are truncated rather than rounded, so
/// `3661.256` renders as `1:01:01.25`.
pub fn format_ass_timestamp(seconds: f64) -> String {
    let micros = seconds_to_micros(seconds);
    let total_seconds = micros / MICROS_PER_SECOND;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    let centis = (micros % MICROS_PER_SECOND) / 10_000;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Format seconds as an SRT timestamp `HH:MM:SS,mmm` (milliseconds truncated)
pub fn format_srt_timestamp(seconds: f64) -> String {
    format_srt_millis(seconds_to_micros(seconds) / 1_000)
}

/// Format a millisecond count as an SRT timestamp
pub fn format_srt_millis(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

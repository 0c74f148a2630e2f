/*!
 * Uniform time shifting of WebVTT text and parsed cues.
 *
 * Shifted timestamps are clamped at zero. An offset of zero is an exact
 * identity for both forms; for text that means byte-identical output.
 */

use std::borrow::Cow;

use log::{debug, warn};
use regex::Captures;

use crate::subtitle_processor::{Cue, SubtitleCollection, TIMING_LINE_REGEX};
use crate::timecode;

/// Shift every timing line in a WebVTT document by `offset_ms`.
///
/// Only the two timestamps of each timing line are rewritten (as
/// `HH:MM:SS.mmm --> HH:MM:SS.mmm`); headers, identifiers, cue settings and
/// payload pass through untouched.
pub fn shift_text(vtt: &str, offset_ms: i64) -> Cow<'_, str> {
    if offset_ms == 0 {
        return Cow::Borrowed(vtt);
    }

    let mut shifted_lines = 0usize;
    let result = TIMING_LINE_REGEX.replace_all(vtt, |caps: &Captures| {
        match (
            timecode::parse_timestamp(&caps[2]),
            timecode::parse_timestamp(&caps[3]),
        ) {
            (Ok(start), Ok(end)) => {
                shifted_lines += 1;
                format!(
                    "{}{} --> {}",
                    &caps[1],
                    timecode::format_timestamp_ms(timecode::offset_ms(start, offset_ms)),
                    timecode::format_timestamp_ms(timecode::offset_ms(end, offset_ms)),
                )
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Leaving timing line unshifted: {}", e);
                caps[0].to_string()
            }
        }
    });

    debug!("Shifted {} timing lines by {}ms", shifted_lines, offset_ms);
    result
}

/// Shift a single cue, clamping both bounds at zero
pub fn shift_cue(cue: &Cue, offset_ms: i64) -> Cue {
    Cue {
        start_ms: timecode::offset_ms(cue.start_ms, offset_ms),
        end_ms: timecode::offset_ms(cue.end_ms, offset_ms),
        text: cue.text.clone(),
    }
}

/// Shift every cue by `offset_ms`
pub fn shift_cues(cues: &[Cue], offset_ms: i64) -> Vec<Cue> {
    cues.iter().map(|cue| shift_cue(cue, offset_ms)).collect()
}

impl SubtitleCollection {
    /// A copy of the collection with every cue shifted by `offset_ms`
    pub fn shifted(&self, offset_ms: i64) -> Self {
        Self::new(shift_cues(&self.cues, offset_ms))
    }
}

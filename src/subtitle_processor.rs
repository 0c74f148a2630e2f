use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::timecode;

// @module: WebVTT cue model, parsing and writing

// @const: Timing line, two timestamps separated by `-->`.
// Group 1 is whatever precedes the first timestamp (line start or a non-word
// character), so a match never starts inside a digit run or a word.
// Hours take any number of digits.
pub(crate) static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)(^|[^\w:.])(\d+:\d{2}:\d{2}\.\d{3}|\d{1,2}:\d{2}\.\d{3})[ \t]*-->[ \t]*(\d+:\d{2}:\d{2}\.\d{3}|\d{1,2}:\d{2}\.\d{3})",
    )
    .unwrap()
});

// @const: Inline markup such as <c>, <v Roger>, <00:00:01.000>
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").unwrap());

static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^WEBVTT").unwrap());

static NOTE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^NOTE\b").unwrap());

/// A single timed caption entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in ms
    pub start_ms: u64,

    /// End time in ms
    pub end_ms: u64,

    /// Plain text, lines joined by '\n'
    pub text: String,
}

impl Cue {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Cue {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Start time in seconds
    pub fn start_secs(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    /// End time in seconds
    pub fn end_secs(&self) -> f64 {
        self.end_ms as f64 / 1000.0
    }

    /// Whether the cue is showing at `ms` (start inclusive, end exclusive)
    pub fn contains_ms(&self, ms: u64) -> bool {
        self.start_ms <= ms && ms < self.end_ms
    }

    /// Whether the cue is showing at `secs` (start inclusive, end exclusive)
    pub fn contains_secs(&self, secs: f64) -> bool {
        self.start_secs() <= secs && secs < self.end_secs()
    }

    pub fn format_start_time(&self) -> String {
        timecode::format_timestamp_ms(self.start_ms)
    }

    pub fn format_end_time(&self) -> String {
        timecode::format_timestamp_ms(self.end_ms)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered cues in source appearance order
pub type CueSequence = Vec<Cue>;

/// Collection of cues parsed from, or destined for, a WebVTT document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCollection {
    /// Cues in appearance order
    pub cues: CueSequence,
}

impl SubtitleCollection {
    pub fn new(cues: CueSequence) -> Self {
        SubtitleCollection { cues }
    }

    /// Parse a WebVTT document into a collection
    pub fn from_webvtt(content: &str) -> Self {
        Self::new(Self::parse_webvtt(content))
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Parse WebVTT text into cues.
    ///
    /// Lenient, line-oriented: identifiers, `NOTE` lines, header metadata and
    /// malformed timing lines are skipped, never rejected. Input without any
    /// usable timing line yields an empty sequence.
    pub fn parse_webvtt(content: &str) -> CueSequence {
        let normalized = content.replace('\r', "");
        let lines: Vec<&str> = normalized.split('\n').collect();
        let mut cues = Vec::new();
        let mut i = 0;

        while i < lines.len() && is_preamble_line(lines[i]) {
            i += 1;
        }

        while i < lines.len() {
            // Optional cue identifier
            if !lines[i].contains("-->") && !lines[i].trim().is_empty() {
                i += 1;
            }
            if i >= lines.len() {
                break;
            }

            let Some(caps) = TIMING_LINE_REGEX.captures(lines[i]) else {
                i += 1;
                continue;
            };

            let (start_ms, end_ms) = match (
                timecode::parse_timestamp(&caps[2]),
                timecode::parse_timestamp(&caps[3]),
            ) {
                (Ok(start), Ok(end)) => (start, end),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping timing line {}: {}", i + 1, e);
                    i += 1;
                    continue;
                }
            };
            i += 1;

            let mut texts = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                texts.push(strip_inline_tags(lines[i]));
                i += 1;
            }

            if end_ms <= start_ms {
                debug!("Cue at line {} ends before it starts ({} <= {})", i, end_ms, start_ms);
            }
            cues.push(Cue::new(start_ms, end_ms, texts.join("\n")));

            while i < lines.len() && lines[i].trim().is_empty() {
                i += 1;
            }
        }

        debug!("Parsed {} cues from {} lines", cues.len(), lines.len());
        cues
    }

    /// Serialize the collection as a WebVTT document
    pub fn to_webvtt(&self) -> String {
        self.to_string()
    }
}

impl From<CueSequence> for SubtitleCollection {
    fn from(cues: CueSequence) -> Self {
        Self::new(cues)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "WEBVTT")?;
        writeln!(f)?;
        for cue in &self.cues {
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

/// Parse a WebVTT document into cues
pub fn parse_webvtt(content: &str) -> CueSequence {
    SubtitleCollection::parse_webvtt(content)
}

fn is_preamble_line(line: &str) -> bool {
    line.trim().is_empty() || HEADER_REGEX.is_match(line) || NOTE_REGEX.is_match(line)
}

fn strip_inline_tags(line: &str) -> String {
    INLINE_TAG_REGEX.replace_all(line, "").into_owned()
}

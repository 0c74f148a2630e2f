/*!
 * Caption track selection.
 *
 * Picks the best caption track for a requested language from the list a
 * caption provider reports. Selection order:
 * 1. exact `language_code` match, restricted to auto-generated tracks when
 *    the request requires them (any kind otherwise)
 * 2. first track whose `language_code` starts with the requested code
 *    (`es` finds `es-419`), regardless of kind
 * 3. nothing
 */

use serde::{Deserialize, Serialize};
use log::debug;

/// How a caption track was produced
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Authored by a human
    #[default]
    Standard,
    /// Automatic speech recognition
    #[serde(rename = "asr")]
    AutoGenerated,
}

impl TrackKind {
    pub fn is_auto_generated(&self) -> bool {
        matches!(self, Self::AutoGenerated)
    }
}

/// An available caption track, as reported by a caption provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    /// BCP-47 style code, e.g. "en", "es-419"
    pub language_code: String,

    #[serde(default)]
    pub kind: TrackKind,

    /// Whether the provider can machine-translate this track
    #[serde(default)]
    pub translatable: bool,

    /// Human readable label, when the provider has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the track body can be fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl CaptionTrack {
    pub fn new(language_code: impl Into<String>, kind: TrackKind, translatable: bool) -> Self {
        Self {
            language_code: language_code.into(),
            kind,
            translatable,
            name: None,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// What the caller is looking for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackRequest {
    pub language_code: String,

    /// Only accept auto-generated tracks on an exact language match
    pub require_auto_generated: bool,

    /// Machine translation target. Not checked here; the consumer of the
    /// selected track decides whether the track's `translatable` flag allows it.
    pub translate_to: Option<String>,
}

impl TrackRequest {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            ..Self::default()
        }
    }

    pub fn auto_generated(mut self, required: bool) -> Self {
        self.require_auto_generated = required;
        self
    }

    pub fn translate_to(mut self, target: Option<String>) -> Self {
        self.translate_to = target;
        self
    }

    fn accepts_kind(&self, kind: TrackKind) -> bool {
        !self.require_auto_generated || kind.is_auto_generated()
    }
}

/// Select the best matching caption track, or `None` when nothing matches.
///
/// A blank language code never matches.
pub fn select_caption_track<'a>(
    tracks: &'a [CaptionTrack],
    request: &TrackRequest,
) -> Option<&'a CaptionTrack> {
    let language = request.language_code.trim();
    if language.is_empty() {
        return None;
    }

    let exact = tracks
        .iter()
        .find(|t| t.language_code == language && request.accepts_kind(t.kind));
    if let Some(track) = exact {
        debug!("Selected exact caption track {} ({:?})", track.language_code, track.kind);
        return Some(track);
    }

    let prefixed = tracks.iter().find(|t| t.language_code.starts_with(language));
    match prefixed {
        Some(track) => debug!(
            "Selected caption track {} by prefix match on {}",
            track.language_code, language
        ),
        None => debug!("No caption track for {} among {} tracks", language, tracks.len()),
    }
    prefixed
}

/*!
 * Active cue resolution against a playback clock.
 *
 * The shown time is `max(0, playback + display_offset)`. The active cue is the
 * lowest-indexed cue with `start <= shown < end`; overlapping or unordered cues
 * are tolerated and resolved by that first-match rule.
 *
 * The display offset is a view-time correction only. Nothing here mutates
 * the cues it is given.
 */

use crate::subtitle_processor::Cue;

/// Shown time in seconds for a playback position and display offset
pub fn shown_time_secs(playback_secs: f64, display_offset_secs: f64) -> f64 {
    let shown = playback_secs + display_offset_secs;
    // NaN clock readings resolve to the start
    if shown.is_nan() { 0.0 } else { shown.max(0.0) }
}

/// Shown time in milliseconds for a playback position and display offset
pub fn shown_time_ms(playback_ms: i64, display_offset_ms: i64) -> u64 {
    playback_ms.saturating_add(display_offset_ms).max(0) as u64
}

/// Index of the cue active at `playback_secs + display_offset_secs`.
///
/// Builds a fresh [`CueIndex`] on each call, which scans the whole list to
/// pick a search strategy. Callers resolving on every clock tick should keep a
/// [`CueIndex`] or an [`ActiveCueTracker`] around instead.
pub fn resolve_active_cue(cues: &[Cue], playback_secs: f64, display_offset_secs: f64) -> Option<usize> {
    CueIndex::new(cues).active_at_secs(shown_time_secs(playback_secs, display_offset_secs))
}

/// Where to seek the player so that `cue` shows under `display_offset_secs`
pub fn seek_target_secs(cue: &Cue, display_offset_secs: f64) -> f64 {
    (cue.start_secs() - display_offset_secs).max(0.0)
}

/// Case-insensitive text filter that keeps each cue's original index.
///
/// A blank query keeps everything.
pub fn search_cues<'a>(cues: &'a [Cue], query: &str) -> Vec<(usize, &'a Cue)> {
    let needle = query.trim().to_lowercase();
    cues.iter()
        .enumerate()
        .filter(|(_, cue)| needle.is_empty() || cue.text.to_lowercase().contains(&needle))
        .collect()
}

/// Search strategy chosen from the shape of the cue list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Starts non-decreasing and no cue overlaps the next: at most one cue
    /// can contain any instant, so a binary search finds it
    Disjoint,
    /// Anything else: linear first-match scan
    Unordered,
}

/// Borrowed view over cues that picks binary search when it is safe
#[derive(Debug, Clone, Copy)]
pub struct CueIndex<'a> {
    cues: &'a [Cue],
    layout: Layout,
}

impl<'a> CueIndex<'a> {
    pub fn new(cues: &'a [Cue]) -> Self {
        let disjoint = cues
            .windows(2)
            .all(|w| w[0].start_ms <= w[1].start_ms && w[0].end_ms <= w[1].start_ms);
        Self {
            cues,
            layout: if disjoint { Layout::Disjoint } else { Layout::Unordered },
        }
    }

    pub fn cues(&self) -> &'a [Cue] {
        self.cues
    }

    /// Whether lookups use binary search
    pub fn is_disjoint(&self) -> bool {
        self.layout == Layout::Disjoint
    }

    /// Index of the cue active at `shown_ms`
    pub fn active_at_ms(&self, shown_ms: u64) -> Option<usize> {
        match self.layout {
            Layout::Disjoint => {
                let after = self.cues.partition_point(|c| c.start_ms <= shown_ms);
                after
                    .checked_sub(1)
                    .filter(|&i| self.cues[i].contains_ms(shown_ms))
            }
            Layout::Unordered => self.cues.iter().position(|c| c.contains_ms(shown_ms)),
        }
    }

    /// Index of the cue active at `shown_secs`
    pub fn active_at_secs(&self, shown_secs: f64) -> Option<usize> {
        match self.layout {
            Layout::Disjoint => {
                let after = self.cues.partition_point(|c| c.start_secs() <= shown_secs);
                after
                    .checked_sub(1)
                    .filter(|&i| self.cues[i].contains_secs(shown_secs))
            }
            Layout::Unordered => self.cues.iter().position(|c| c.contains_secs(shown_secs)),
        }
    }
}

/// Per-tick resolver for a render loop.
///
/// Remembers the last active index and checks it (and its successor) before
/// falling back to a full lookup. Every answer equals [`resolve_active_cue`]
/// for the same inputs.
#[derive(Debug, Clone)]
pub struct ActiveCueTracker<'a> {
    index: CueIndex<'a>,
    last: Option<usize>,
}

impl<'a> ActiveCueTracker<'a> {
    pub fn new(cues: &'a [Cue]) -> Self {
        Self {
            index: CueIndex::new(cues),
            last: None,
        }
    }

    /// Resolve for one clock tick
    pub fn tick(&mut self, playback_secs: f64, display_offset_secs: f64) -> Option<usize> {
        let shown = shown_time_secs(playback_secs, display_offset_secs);
        let cues = self.index.cues();

        let cached = if self.index.is_disjoint() {
            self.last.and_then(|i| {
                [i, i + 1]
                    .into_iter()
                    .find(|&j| cues.get(j).is_some_and(|c| c.contains_secs(shown)))
            })
        } else {
            None
        };

        let active = cached.or_else(|| self.index.active_at_secs(shown));
        self.last = active;
        active
    }

    /// Last resolved index
    pub fn current(&self) -> Option<usize> {
        self.last
    }
}

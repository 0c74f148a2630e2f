/*!
 * Caption providers.
 *
 * A caption provider reports which caption tracks exist for a video, serves
 * the WebVTT body of a chosen track and describes the video itself:
 * - `youtube`: YouTube watch-page scraping over HTTP
 * - `mock`: canned tracks and bodies for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::track_selector::CaptionTrack;

/// Descriptive metadata for a video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: Option<String>,
    /// URL of the widest thumbnail
    pub thumb: Option<String>,
    pub channel: Option<String>,
}

/// Common trait for all caption providers
#[async_trait]
pub trait CaptionProvider: Send + Sync + Debug {
    /// List the caption tracks available for a video
    ///
    /// # Arguments
    /// * `video_id` - Provider specific video identifier
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, ProviderError>;

    /// Fetch the WebVTT body of a track
    ///
    /// # Arguments
    /// * `track` - A track previously returned by `list_tracks`
    /// * `translate_to` - Optional machine translation target; only honoured
    ///   by the provider when the track is translatable
    async fn fetch_vtt(&self, track: &CaptionTrack, translate_to: Option<&str>) -> Result<String, ProviderError>;

    /// Title, thumbnail and channel of a video; fields the provider does not
    /// know are `None`
    async fn video_details(&self, video_id: &str) -> Result<VideoDetails, ProviderError>;
}

pub mod youtube;
pub mod mock;

/*!
 * Mock caption provider for testing.
 *
 * - `MockCaptionProvider::new(tracks)` serves the given tracks
 * - `with_body(language, body)` registers the VTT body for a track language
 * - `with_details(details)` sets the video metadata served
 * - `MockCaptionProvider::failing()` errors on every call
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::errors::ProviderError;
use crate::providers::{CaptionProvider, VideoDetails};
use crate::track_selector::CaptionTrack;

/// A recorded `fetch_vtt` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub language_code: String,
    pub translate_to: Option<String>,
}

/// Mock provider for testing ingestion workflows
#[derive(Debug, Default)]
pub struct MockCaptionProvider {
    tracks: Vec<CaptionTrack>,
    /// VTT bodies keyed by track language code
    bodies: HashMap<String, String>,
    details: VideoDetails,
    failing: bool,
    request_count: Arc<AtomicUsize>,
    fetches: Mutex<Vec<FetchRecord>>,
}

impl MockCaptionProvider {
    pub fn new(tracks: Vec<CaptionTrack>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    /// A provider whose every call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Register the body served for tracks with `language_code`
    pub fn with_body(mut self, language_code: &str, body: &str) -> Self {
        self.bodies.insert(language_code.to_string(), body.to_string());
        self
    }

    /// Metadata returned by `video_details`
    pub fn with_details(mut self, details: VideoDetails) -> Self {
        self.details = details;
        self
    }

    /// Number of calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Fetch calls made so far, in order
    pub fn fetches(&self) -> Vec<FetchRecord> {
        self.fetches.lock().clone()
    }

    fn check_failing(&self) -> Result<(), ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ProviderError::ConnectionError("mock provider is failing".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CaptionProvider for MockCaptionProvider {
    async fn list_tracks(&self, _video_id: &str) -> Result<Vec<CaptionTrack>, ProviderError> {
        self.check_failing()?;
        Ok(self.tracks.clone())
    }

    async fn fetch_vtt(&self, track: &CaptionTrack, translate_to: Option<&str>) -> Result<String, ProviderError> {
        self.check_failing()?;
        self.fetches.lock().push(FetchRecord {
            language_code: track.language_code.clone(),
            translate_to: translate_to.map(str::to_string),
        });

        self.bodies
            .get(&track.language_code)
            .cloned()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 404,
                message: format!("no body for {}", track.language_code),
            })
    }

    async fn video_details(&self, _video_id: &str) -> Result<VideoDetails, ProviderError> {
        self.check_failing()?;
        Ok(self.details.clone())
    }
}

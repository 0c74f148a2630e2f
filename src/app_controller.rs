use log::{debug, info, warn};
use crate::app_config::Config;
use crate::errors::{AppError, SubtitleError};
use crate::language_utils;
use crate::providers::{CaptionProvider, VideoDetails};
use crate::resolver;
use crate::store::{TimedText, VideoRecord, VideoStore};
use crate::subtitle_processor::{Cue, SubtitleCollection};
use crate::time_shift;
use crate::track_selector::{self, CaptionTrack, TrackRequest};

// @module: Caption ingestion and playback queries

/// Parameters for importing captions from a provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRequest {
    /// Requested language code
    pub language: String,
    /// Only accept auto-generated tracks on an exact language match
    pub require_auto_generated: bool,
    /// Machine translation target
    pub translate_to: Option<String>,
    /// Persisted offset in milliseconds, applied before the cues are stored
    pub offset_ms: i64,
}

/// Result of a provider import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The stored record
    pub video: VideoRecord,
    /// Number of cues stored
    pub cue_count: usize,
    /// The track the cues came from
    pub track: CaptionTrack,
}

/// Application controller tying parsing, shifting and selection to storage
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Video record storage
    store: VideoStore,
}

impl Controller {
    /// Create a controller using the store configured in `config`
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;
        let store = VideoStore::new(&config.store_path);
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &VideoStore {
        &self.store
    }

    /// Build an import request from the configured defaults
    pub fn default_import_request(&self) -> ImportRequest {
        ImportRequest {
            language: self.config.captions.default_language.clone(),
            require_auto_generated: self.config.captions.prefer_auto_generated,
            translate_to: None,
            offset_ms: self.config.captions.offset_ms,
        }
    }

    /// Shift uploaded WebVTT text by the persisted offset, parse it and store
    /// the cues on `video_id`.
    ///
    /// `offset_ms` of `None` uses the configured default offset.
    pub fn import_upload(
        &self,
        video_id: &str,
        vtt_text: &str,
        offset_ms: Option<i64>,
    ) -> Result<VideoRecord, AppError> {
        let offset_ms = offset_ms.unwrap_or(self.config.captions.offset_ms);
        let shifted = time_shift::shift_text(vtt_text, offset_ms);
        let collection = SubtitleCollection::from_webvtt(&shifted);
        if collection.is_empty() {
            warn!("Upload for {} contained no cues", video_id);
        }
        info!(
            "Importing {} uploaded cues into {} (offset {}ms)",
            collection.len(),
            video_id,
            offset_ms
        );

        let video = self
            .store
            .upsert(VideoRecord::new(video_id).with_cues(collection.cues))?;
        Ok(video)
    }

    /// Select a track from `provider`, fetch and shift it, and store the cues
    pub async fn import_from_provider(
        &self,
        provider: &dyn CaptionProvider,
        video_id: &str,
        request: &ImportRequest,
    ) -> Result<ImportOutcome, AppError> {
        let tracks = provider.list_tracks(video_id).await?;
        debug!("Provider reported {} tracks for {}", tracks.len(), video_id);

        let track_request = TrackRequest::new(request.language.as_str())
            .auto_generated(request.require_auto_generated)
            .translate_to(request.translate_to.clone());

        let track = track_selector::select_caption_track(&tracks, &track_request)
            .cloned()
            .ok_or_else(|| SubtitleError::NoCaptionTrackFound {
                language: request.language.clone(),
            })?;

        if let Some(target) = &request.translate_to {
            if language_utils::validate_language_code(target).is_err() {
                warn!("Translation target {} is not a known language code", target);
            }
            if !track.translatable {
                warn!("Track {} does not advertise translation to {}", track.language_code, target);
            }
        }

        let vtt = provider
            .fetch_vtt(&track, request.translate_to.as_deref())
            .await?;
        let shifted = time_shift::shift_text(&vtt, request.offset_ms);
        let cues = SubtitleCollection::parse_webvtt(&shifted);
        let cue_count = cues.len();

        let mut patch = VideoRecord::new(video_id).with_cues(cues);
        patch.timedtext = Some(TimedText {
            lang: request
                .translate_to
                .clone()
                .unwrap_or_else(|| track.language_code.clone()),
            name: track.name.clone(),
        });
        let video = self.store.upsert(patch)?;

        info!(
            "Imported {} cues for {} from {} track {} (offset {}ms)",
            cue_count,
            video_id,
            if track.kind.is_auto_generated() { "auto-generated" } else { "standard" },
            track.language_code,
            request.offset_ms
        );

        Ok(ImportOutcome { video, cue_count, track })
    }

    /// Create a video record, or merge the given metadata into an existing one
    pub fn add_video(&self, video: VideoRecord) -> Result<VideoRecord, AppError> {
        info!("Adding video {}", video.id);
        Ok(self.store.upsert(video)?)
    }

    /// Delete a video record. Returns whether it existed.
    pub fn remove_video(&self, video_id: &str) -> Result<bool, AppError> {
        let removed = self.store.delete(video_id)?;
        if removed {
            info!("Removed video {}", video_id);
        } else {
            warn!("Video {} was not in the store", video_id);
        }
        Ok(removed)
    }

    /// Fill a stored video's missing title, thumbnail and channel from `provider`.
    ///
    /// Fields already set are kept. A record with all three set is returned
    /// without asking the provider. Provider failures are logged and the
    /// stored record is returned unchanged.
    pub async fn enrich_metadata(
        &self,
        provider: &dyn CaptionProvider,
        video_id: &str,
    ) -> Result<VideoRecord, AppError> {
        let video = self.store.require(video_id)?;
        if video.title.is_some() && video.thumb.is_some() && video.channel.is_some() {
            return Ok(video);
        }

        let details = match provider.video_details(video_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Failed to fetch metadata for {}: {}", video_id, e);
                return Ok(video);
            }
        };

        let VideoDetails { title, thumb, channel } = details;
        let mut patch = VideoRecord::new(video_id);
        patch.title = video.title.is_none().then_some(title).flatten();
        patch.thumb = video.thumb.is_none().then_some(thumb).flatten();
        patch.channel = video.channel.is_none().then_some(channel).flatten();

        if patch.title.is_none() && patch.thumb.is_none() && patch.channel.is_none() {
            debug!("Provider had no new metadata for {}", video_id);
            return Ok(video);
        }
        Ok(self.store.upsert(patch)?)
    }

    /// The cue showing on `video_id` at `playback_secs` under a display offset.
    ///
    /// The display offset is applied to the lookup only; stored cues are not touched.
    pub fn active_cue(
        &self,
        video_id: &str,
        playback_secs: f64,
        display_offset_secs: f64,
    ) -> Result<Option<(usize, Cue)>, AppError> {
        let video = self.store.require(video_id)?;
        let cues = video.cues();
        Ok(resolver::resolve_active_cue(cues, playback_secs, display_offset_secs)
            .map(|i| (i, cues[i].clone())))
    }
}

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{CaptionProvider, VideoDetails};
use crate::track_selector::{CaptionTrack, TrackKind};

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";
const VIDEO_DETAILS_KEY: &str = "\"videoDetails\":";
const OWNER_CHANNEL_KEY: &str = "\"ownerChannelName\":";

/// YouTube caption client
///
/// Track lists come from the `captionTracks` array embedded in the watch
/// page's player response; track bodies from each track's `baseUrl`.
#[derive(Debug, Clone)]
pub struct YouTubeCaptions {
    /// Base URL, e.g. "https://www.youtube.com"
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

/// Caption track as it appears in the player response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
    #[serde(default)]
    name: Option<Value>,
}

/// `videoDetails` object of the player response
#[derive(Debug, Deserialize)]
struct RawVideoDetails {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    thumbnail: Option<RawThumbnails>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnails {
    #[serde(default)]
    thumbnails: Vec<RawThumbnail>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: String,
    #[serde(default)]
    width: Option<u32>,
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        let kind = match raw.kind.as_deref() {
            Some("asr") => TrackKind::AutoGenerated,
            _ => TrackKind::Standard,
        };
        let mut track = CaptionTrack::new(raw.language_code, kind, raw.is_translatable)
            .with_base_url(raw.base_url);
        track.name = raw.name.as_ref().and_then(label_text);
        track
    }
}

// Labels are either {"simpleText": ".."} or {"runs": [{"text": ".."}, ..]}
fn label_text(name: &Value) -> Option<String> {
    if let Some(text) = name.get("simpleText").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let runs = name.get("runs")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

// Deserialize the JSON value that follows the first occurrence of `key`
fn value_after<'de, T: Deserialize<'de>>(body: &'de str, key: &str) -> Option<Result<T, ProviderError>> {
    let pos = body.find(key)?;
    let rest = &body[pos + key.len()..];
    let value = serde_json::Deserializer::from_str(rest)
        .into_iter::<T>()
        .next()
        .unwrap_or_else(|| Err(<serde_json::Error as serde::de::Error>::custom("missing value")))
        .map_err(|e| ProviderError::ParseError(format!("Invalid {} value: {}", key.trim_end_matches(':'), e)));
    Some(value)
}

/// Extract caption tracks from a watch page or player response body.
///
/// A body without a `captionTracks` array means the video has no captions
/// and yields an empty list.
pub fn parse_caption_tracks(body: &str) -> Result<Vec<CaptionTrack>, ProviderError> {
    let Some(raw) = value_after::<Vec<RawCaptionTrack>>(body, CAPTION_TRACKS_KEY) else {
        debug!("No captionTracks in response body ({} bytes)", body.len());
        return Ok(Vec::new());
    };

    Ok(raw?.into_iter().map(CaptionTrack::from).collect())
}

/// Extract title, widest thumbnail and channel from a watch page body.
///
/// The channel is the `videoDetails` author, falling back to the
/// microformat's `ownerChannelName`. Missing pieces stay `None`.
pub fn parse_video_details(body: &str) -> Result<VideoDetails, ProviderError> {
    let raw = value_after::<RawVideoDetails>(body, VIDEO_DETAILS_KEY).transpose()?;
    let owner = value_after::<String>(body, OWNER_CHANNEL_KEY).and_then(Result::ok);

    let Some(raw) = raw else {
        debug!("No videoDetails in response body ({} bytes)", body.len());
        return Ok(VideoDetails { channel: owner, ..VideoDetails::default() });
    };

    // First of the widest thumbnails
    let thumb = raw
        .thumbnail
        .map(|t| t.thumbnails)
        .unwrap_or_default()
        .into_iter()
        .reduce(|best, t| if t.width.unwrap_or(0) > best.width.unwrap_or(0) { t } else { best })
        .map(|t| t.url);

    Ok(VideoDetails {
        title: raw.title.filter(|t| !t.is_empty()),
        thumb,
        channel: raw.author.filter(|a| !a.is_empty()).or(owner),
    })
}

/// Build the fetch URL for a track: `fmt=vtt`, plus `tlang` when translating
pub fn track_url(track: &CaptionTrack, translate_to: Option<&str>) -> Result<Url, ProviderError> {
    let base = track.base_url.as_deref().ok_or_else(|| {
        ProviderError::ParseError(format!("Track {} has no base URL", track.language_code))
    })?;
    let mut url = Url::parse(base)
        .map_err(|e| ProviderError::ParseError(format!("Invalid track URL {}: {}", base, e)))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt" && k != "tlang")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept);
        query.append_pair("fmt", "vtt");
        if let Some(target) = translate_to {
            query.append_pair("tlang", target);
        }
    }

    Ok(url)
}

impl YouTubeCaptions {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - Base URL of the site
    /// * `timeout_secs` - Per-request timeout
    /// * `user_agent` - User agent header sent with every request
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn watch_page(&self, video_id: &str) -> Result<String, ProviderError> {
        let mut url = Url::parse(&format!("{}/watch", self.endpoint))
            .map_err(|e| ProviderError::ParseError(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;
        url.query_pairs_mut().append_pair("v", video_id);
        self.get_text(url).await
    }

    async fn get_text(&self, url: Url) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("GET {} returned {}", url.path(), status);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))
    }
}

#[async_trait]
impl CaptionProvider for YouTubeCaptions {
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>, ProviderError> {
        let body = self.watch_page(video_id).await?;
        let tracks = parse_caption_tracks(&body)?;
        debug!("Video {} has {} caption tracks", video_id, tracks.len());
        Ok(tracks)
    }

    async fn fetch_vtt(&self, track: &CaptionTrack, translate_to: Option<&str>) -> Result<String, ProviderError> {
        if translate_to.is_some() && !track.translatable {
            warn!("Track {} is not translatable, requesting translation anyway", track.language_code);
        }
        let url = track_url(track, translate_to)?;
        self.get_text(url).await
    }

    async fn video_details(&self, video_id: &str) -> Result<VideoDetails, ProviderError> {
        let body = self.watch_page(video_id).await?;
        let details = parse_video_details(&body)?;
        debug!("Video {} details: {:?}", video_id, details);
        Ok(details)
    }
}

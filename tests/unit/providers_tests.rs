/*!
 * Tests for caption provider implementations
 */

use vttsync::errors::ProviderError;
use vttsync::providers::{CaptionProvider, VideoDetails};
use vttsync::providers::mock::{FetchRecord, MockCaptionProvider};
use vttsync::providers::youtube::{parse_caption_tracks, parse_video_details, track_url};
use vttsync::track_selector::{CaptionTrack, TrackKind};

const WATCH_PAGE: &str = r#"<html><script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"vssId":".en","languageCode":"en","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en&kind=asr","name":{"runs":[{"text":"English (auto-generated)"}]},"languageCode":"en","kind":"asr","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=es-419","languageCode":"es-419"}],"audioTracks":[{"captionTrackIndices":[0,1]}]}}};</script></html>"#;

#[test]
fn test_parse_caption_tracks_withWatchPage_shouldExtractTracks() {
    let tracks = parse_caption_tracks(WATCH_PAGE).unwrap();

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].language_code, "en");
    assert_eq!(tracks[0].kind, TrackKind::Standard);
    assert!(tracks[0].translatable);
    assert_eq!(tracks[0].name.as_deref(), Some("English"));
    assert_eq!(
        tracks[0].base_url.as_deref(),
        Some("https://www.youtube.com/api/timedtext?v=abc&lang=en")
    );

    assert_eq!(tracks[1].kind, TrackKind::AutoGenerated);
    assert_eq!(tracks[1].name.as_deref(), Some("English (auto-generated)"));

    assert_eq!(tracks[2].language_code, "es-419");
    assert!(!tracks[2].translatable);
    assert!(tracks[2].name.is_none());
}

#[test]
fn test_parse_caption_tracks_withoutCaptions_shouldReturnEmpty() {
    let tracks = parse_caption_tracks("<html>no captions here</html>").unwrap();
    assert!(tracks.is_empty());
}

#[test]
fn test_parse_caption_tracks_withBrokenArray_shouldReturnParseError() {
    let result = parse_caption_tracks(r#"{"captionTracks":[{"languageCode": }"#);
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_track_url_withTranslation_shouldSetFormatAndTarget() {
    let track = CaptionTrack::new("es", TrackKind::Standard, true)
        .with_base_url("https://www.youtube.com/api/timedtext?v=abc&lang=es&fmt=srv3");

    let url = track_url(&track, Some("zh-Hans")).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("v".to_string(), "abc".to_string()),
            ("lang".to_string(), "es".to_string()),
            ("fmt".to_string(), "vtt".to_string()),
            ("tlang".to_string(), "zh-Hans".to_string()),
        ]
    );

    let plain = track_url(&track, None).unwrap();
    assert!(!plain.as_str().contains("tlang"));
}

#[test]
fn test_track_url_withoutBaseUrl_shouldFail() {
    let track = CaptionTrack::new("en", TrackKind::Standard, false);
    assert!(matches!(track_url(&track, None), Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_mockCaptionProvider_withBody_shouldServeAndRecordFetches() {
    let track = CaptionTrack::new("en", TrackKind::Standard, true);
    let provider = MockCaptionProvider::new(vec![track.clone()]).with_body("en", "WEBVTT\n");

    assert_eq!(provider.list_tracks("abc").await.unwrap(), vec![track.clone()]);
    assert_eq!(provider.fetch_vtt(&track, Some("fr")).await.unwrap(), "WEBVTT\n");
    assert_eq!(provider.request_count(), 2);
    assert_eq!(
        provider.fetches(),
        vec![FetchRecord { language_code: "en".to_string(), translate_to: Some("fr".to_string()) }]
    );
}

#[test]
fn test_mockCaptionProvider_failing_shouldReturnConnectionError() {
    let provider = MockCaptionProvider::failing();
    let result = tokio_test::block_on(provider.list_tracks("abc"));
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

const DETAILS_PAGE: &str = r#"<script>var ytInitialPlayerResponse = {"videoDetails":{"videoId":"abc","title":"Talk about captions","lengthSeconds":"212","author":"Caption Channel","thumbnail":{"thumbnails":[{"url":"https://i.ytimg.com/vi/abc/default.jpg","width":120,"height":90},{"url":"https://i.ytimg.com/vi/abc/hqdefault.jpg","width":480,"height":360},{"url":"https://i.ytimg.com/vi/abc/hq2.jpg","width":480,"height":360},{"url":"https://i.ytimg.com/vi/abc/mqdefault.jpg","width":320,"height":180}]}},"microformat":{"playerMicroformatRenderer":{"ownerChannelName":"Owner Name"}}};</script>"#;

#[test]
fn test_parse_video_details_withWatchPage_shouldPickWidestThumbnail() {
    let details = parse_video_details(DETAILS_PAGE).unwrap();

    assert_eq!(
        details,
        VideoDetails {
            title: Some("Talk about captions".to_string()),
            thumb: Some("https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string()),
            channel: Some("Caption Channel".to_string()),
        }
    );
}

#[test]
fn test_parse_video_details_withoutAuthor_shouldUseOwnerChannelName() {
    let body = r#"{"videoDetails":{"title":"No author"},"microformat":{"ownerChannelName":"Owner Name"}}"#;
    let details = parse_video_details(body).unwrap();

    assert_eq!(details.title.as_deref(), Some("No author"));
    assert_eq!(details.thumb, None);
    assert_eq!(details.channel.as_deref(), Some("Owner Name"));
}

#[test]
fn test_parse_video_details_withoutDetails_shouldReturnEmpty() {
    assert_eq!(parse_video_details("<html></html>").unwrap(), VideoDetails::default());
}

#[tokio::test]
async fn test_mockCaptionProvider_withDetails_shouldServeThem() {
    let details = VideoDetails {
        title: Some("Title".to_string()),
        ..VideoDetails::default()
    };
    let provider = MockCaptionProvider::default().with_details(details.clone());

    assert_eq!(provider.video_details("abc").await.unwrap(), details);
    assert_eq!(provider.request_count(), 1);
}

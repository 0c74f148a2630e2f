/*!
 * Tests for the JSON video store
 */

use anyhow::Result;
use vttsync::errors::StoreError;
use vttsync::store::{TimedText, VideoRecord, VideoStore};
use vttsync::subtitle_processor::Cue;
use crate::common;

#[test]
fn test_list_withMissingFile_shouldCreateEmptyStore() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("nested").join("videos.json");
    let store = VideoStore::new(&path);

    assert!(store.list()?.is_empty());
    assert!(path.exists());
    let raw = std::fs::read_to_string(&path)?;
    assert_eq!(serde_json::from_str::<serde_json::Value>(&raw)?, serde_json::json!({"videos": []}));
    Ok(())
}

#[test]
fn test_upsert_withNewAndExistingIds_shouldInsertThenMerge() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let store = VideoStore::new(dir.path().join("videos.json"));

    let mut first = VideoRecord::new("abc");
    first.title = Some("First title".to_string());
    store.upsert(first)?;

    let cues = vec![Cue::new(1_000, 2_000, "hi")];
    let stored = store.upsert(VideoRecord::new("abc").with_cues(cues.clone()))?;

    assert_eq!(stored.title.as_deref(), Some("First title"));
    assert_eq!(stored.cues(), cues.as_slice());
    assert_eq!(store.list()?.len(), 1);
    Ok(())
}

#[test]
fn test_upsert_shouldPreserveCueTimestampsExactly() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let store = VideoStore::new(dir.path().join("videos.json"));
    let cues = vec![Cue::new(0, 1, "a"), Cue::new(3_599_999, 3_600_001, "b\nc")];

    store.upsert(VideoRecord::new("v").with_cues(cues.clone()))?;

    let reopened = VideoStore::new(store.path());
    assert_eq!(reopened.require("v")?.cues(), cues.as_slice());
    Ok(())
}

#[test]
fn test_get_withUnknownId_shouldReturnNoneAndRequireShouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let store = VideoStore::new(dir.path().join("videos.json"));

    assert!(store.get("missing")?.is_none());
    assert!(matches!(store.require("missing"), Err(StoreError::NotFound(id)) if id == "missing"));
    Ok(())
}

#[test]
fn test_delete_withExistingAndMissingIds_shouldReportRemoval() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let store = VideoStore::new(dir.path().join("videos.json"));
    store.upsert(VideoRecord::new("a"))?;
    store.upsert(VideoRecord::new("b"))?;

    assert!(store.delete("a")?);
    assert!(!store.delete("a")?);
    let ids: Vec<String> = store.list()?.into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["b".to_string()]);
    Ok(())
}

#[test]
fn test_load_withCamelCaseDocument_shouldReadOptionalFields() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "videos.json",
        r#"{"videos":[{"id":"x","vttUrl":"https://example.com/x.vtt","timedtext":{"lang":"en"}}]}"#,
    )?;
    let store = VideoStore::new(path);

    let video = store.require("x")?;
    assert_eq!(video.vtt_url.as_deref(), Some("https://example.com/x.vtt"));
    assert_eq!(video.timedtext, Some(TimedText { lang: "en".to_string(), name: None }));
    assert!(video.cues().is_empty());
    Ok(())
}

#[test]
fn test_load_withCorruptFile_shouldReturnSerializationError() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "videos.json", "{ not json")?;
    let store = VideoStore::new(path);

    assert!(matches!(store.list(), Err(StoreError::Serialization(_))));
    Ok(())
}

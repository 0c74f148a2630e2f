/*!
 * JSON file store for video records.
 *
 * The whole store is one document, `{ "videos": [...] }`, rewritten on every
 * change through a temp file and rename. Cues are stored exactly as given.
 */

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::errors::StoreError;
use crate::subtitle_processor::Cue;

/// Language of the captions attached to a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedText {
    pub lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A stored video with optional metadata and cues.
///
/// Also used as a patch for [`VideoStore::upsert`]: `None` fields leave the
/// stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cues: Option<Vec<Cue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timedtext: Option<TimedText>,
}

impl VideoRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_cues(mut self, cues: Vec<Cue>) -> Self {
        self.cues = Some(cues);
        self
    }

    /// Overwrite fields that are set in `patch`
    fn merge(&mut self, patch: VideoRecord) {
        let VideoRecord { id: _, title, thumb, channel, vtt_url, cues, timedtext } = patch;
        if title.is_some() {
            self.title = title;
        }
        if thumb.is_some() {
            self.thumb = thumb;
        }
        if channel.is_some() {
            self.channel = channel;
        }
        if vtt_url.is_some() {
            self.vtt_url = vtt_url;
        }
        if cues.is_some() {
            self.cues = cues;
        }
        if timedtext.is_some() {
            self.timedtext = timedtext;
        }
    }

    /// Stored cues, empty when none were imported
    pub fn cues(&self) -> &[Cue] {
        self.cues.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    videos: Vec<VideoRecord>,
}

/// File-backed video store
#[derive(Debug)]
pub struct VideoStore {
    path: PathBuf,
    // serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl VideoStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order
    pub fn list(&self) -> Result<Vec<VideoRecord>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.videos)
    }

    pub fn get(&self, id: &str) -> Result<Option<VideoRecord>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.videos.into_iter().find(|v| v.id == id))
    }

    /// Like [`get`](Self::get) but a missing record is an error
    pub fn require(&self, id: &str) -> Result<VideoRecord, StoreError> {
        self.get(id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Merge `patch` into the record with the same id, inserting it when absent.
    /// Returns the stored record.
    pub fn upsert(&self, patch: VideoRecord) -> Result<VideoRecord, StoreError> {
        let _guard = self.lock.lock();
        let mut doc = self.load()?;

        let stored = match doc.videos.iter_mut().find(|v| v.id == patch.id) {
            Some(existing) => {
                existing.merge(patch);
                existing.clone()
            }
            None => {
                doc.videos.push(patch.clone());
                patch
            }
        };

        self.save(&doc)?;
        debug!("Stored video {} ({} cues)", stored.id, stored.cues().len());
        Ok(stored)
    }

    /// Remove a record. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock();
        let mut doc = self.load()?;
        let before = doc.videos.len();
        doc.videos.retain(|v| v.id != id);
        self.save(&doc)?;
        Ok(doc.videos.len() < before)
    }

    fn load(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            let doc = StoreDocument::default();
            self.save(&doc)?;
            return Ok(doc);
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let tmp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

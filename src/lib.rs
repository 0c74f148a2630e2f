/*!
 * # vttsync - WebVTT captions for interactive playback
 *
 * A Rust library for importing WebVTT captions, shifting their timing and
 * resolving which cue is showing at any point of playback.
 *
 * ## Features
 *
 * - Lenient WebVTT parsing (identifiers, NOTE lines and broken blocks are skipped)
 * - Uniform time shifting of raw WebVTT text or parsed cues, clamped at zero
 * - Caption track selection by language code, kind and regional prefix
 * - Active cue resolution from a playback clock and a display offset
 * - JSON video store and caption provider clients for ingestion and video metadata
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Timestamp parsing and formatting
 * - `subtitle_processor`: Cue model, WebVTT parser and writer
 * - `time_shift`: Time offset transform for text and cues
 * - `track_selector`: Caption track selection
 * - `resolver`: Active cue resolution
 * - `language_utils`: ISO language code utilities
 * - `providers`: Caption provider clients:
 *   - `providers::youtube`: YouTube caption tracks over HTTP
 *   - `providers::mock`: Canned provider for tests
 * - `store`: JSON file storage for video records
 * - `app_config`: Configuration management
 * - `app_controller`: Import workflows and playback queries
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod resolver;
pub mod store;
pub mod subtitle_processor;
pub mod time_shift;
pub mod timecode;
pub mod track_selector;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ImportOutcome, ImportRequest};
pub use errors::{AppError, ProviderError, StoreError, SubtitleError};
pub use providers::{CaptionProvider, VideoDetails};
pub use resolver::{ActiveCueTracker, CueIndex, resolve_active_cue};
pub use store::{VideoRecord, VideoStore};
pub use subtitle_processor::{Cue, CueSequence, SubtitleCollection, parse_webvtt};
pub use time_shift::{shift_cues, shift_text};
pub use timecode::{format_timestamp, parse_timestamp};
pub use track_selector::{CaptionTrack, TrackKind, TrackRequest, select_caption_track};

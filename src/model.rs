//! On-disk document types shared by the fetch and split binaries.
//!
//! Field names mirror the persisted JSON exactly. Downstream consumers index
//! into the nested `contentDetails`/`snippet` shape, so renames here would
//! break them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier wrapper nested under `contentDetails` in the persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Title wrapper nested under `snippet` in the persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
}

/// One playlist entry: `{"contentDetails": {"videoId": ...}, "snippet": {"title": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: ContentDetails,
    pub snippet: Snippet,
}

impl PlaylistItem {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            content_details: ContentDetails {
                video_id: video_id.into(),
            },
            snippet: Snippet {
                title: title.into(),
            },
        }
    }

    pub fn video_id(&self) -> &str {
        &self.content_details.video_id
    }

    pub fn title(&self) -> &str {
        &self.snippet.title
    }
}

/// Single timed caption line. Offsets are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Value stored in the transcripts map. An empty `transcript` records a video
/// whose captions were missing or could not be retrieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub transcript: Vec<TranscriptSegment>,
}

impl TranscriptEntry {
    pub fn new(video_id: impl Into<String>, transcript: Vec<TranscriptSegment>) -> Self {
        Self {
            video_id: video_id.into(),
            transcript,
        }
    }

    pub fn empty(video_id: impl Into<String>) -> Self {
        Self::new(video_id, Vec::new())
    }
}

/// Aggregate document written by `fetch_transcripts` and consumed by
/// `split_json`. Chunk files reuse the same shape, restricted to a contiguous
/// run of `playlistItems` and the transcripts belonging to that run.
///
/// Every key in `transcripts` corresponds to a video present in
/// `playlistItems`; the reverse need not hold in chunk documents, where a
/// video without a source transcript carries no entry at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
    #[serde(rename = "playlistItems")]
    pub playlist_items: Vec<PlaylistItem>,
    pub transcripts: BTreeMap<String, TranscriptEntry>,
}

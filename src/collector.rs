#![forbid(unsafe_code)]

//! Ties the playlist and transcript sources together into one aggregate
//! document and persists it.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::model::{PlaylistDocument, TranscriptEntry};
use crate::playlist::PlaylistSource;
use crate::transcript::{TranscriptOutcome, TranscriptSource};

/// Fetches the playlist and one transcript per video. A playlist source
/// failure aborts the run; a transcript failure only costs that video its
/// captions (the entry stays, with an empty transcript) and processing
/// continues with the next video.
pub fn collect<P, T>(config: &FetchConfig, playlist: &P, transcripts: &T) -> Result<PlaylistDocument>
where
    P: PlaylistSource,
    T: TranscriptSource,
{
    let items = playlist.list_playlist(&config.playlist_id)?;
    for item in &items {
        println!("Found video: {} ({})", item.title(), item.video_id());
    }

    let mut transcripts_map = BTreeMap::new();
    for item in &items {
        let video_id = item.video_id();
        println!("Fetching transcript for video: {} - {}", video_id, item.title());

        let transcript = match transcripts.fetch_transcript(video_id) {
            Ok(TranscriptOutcome::Found(segments)) => segments,
            Ok(TranscriptOutcome::Missing) => {
                println!("No transcript available for video {video_id}");
                Vec::new()
            }
            Err(err) => {
                eprintln!("Could not retrieve transcript for video {video_id}: {err:#}");
                Vec::new()
            }
        };

        transcripts_map.insert(
            video_id.to_string(),
            TranscriptEntry::new(video_id, transcript),
        );
    }

    Ok(PlaylistDocument {
        playlist_id: config.playlist_id.clone(),
        playlist_items: items,
        transcripts: transcripts_map,
    })
}

/// Writes the aggregate document to `<output_dir>/<playlistId>.json`,
/// creating the directory if needed. Returns the path written.
pub fn persist_document(document: &PlaylistDocument, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let path = output_dir.join(format!("{}.json", document.playlist_id));
    let json =
        serde_json::to_string_pretty(document).context("serializing playlist document")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlaylistItem, TranscriptSegment};
    use anyhow::anyhow;
    use std::collections::HashMap;

    struct FakePlaylist(Vec<PlaylistItem>);

    impl PlaylistSource for FakePlaylist {
        fn list_playlist(&self, _playlist_id: &str) -> Result<Vec<PlaylistItem>> {
            Ok(self.0.clone())
        }
    }

    struct FailingPlaylist;

    impl PlaylistSource for FailingPlaylist {
        fn list_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
            Err(anyhow!("no such playlist: {playlist_id}"))
        }
    }

    enum Canned {
        Found(Vec<TranscriptSegment>),
        Missing,
        Fail,
    }

    struct FakeTranscripts(HashMap<String, Canned>);

    impl TranscriptSource for FakeTranscripts {
        fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptOutcome> {
            match self.0.get(video_id) {
                Some(Canned::Found(segments)) => Ok(TranscriptOutcome::Found(segments.clone())),
                Some(Canned::Missing) | None => Ok(TranscriptOutcome::Missing),
                Some(Canned::Fail) => Err(anyhow!("connection reset")),
            }
        }
    }

    fn test_config() -> FetchConfig {
        FetchConfig {
            playlist_id: "PLtest".into(),
            output_dir: "out".into(),
            language: "en".into(),
        }
    }

    fn segment(text: &str) -> TranscriptSegment {
        TranscriptSegment {
            text: text.into(),
            start: 0.0,
            duration: 1.0,
        }
    }

    #[test]
    fn transcript_failure_keeps_entry_and_continues() {
        let playlist = FakePlaylist(vec![
            PlaylistItem::new("a1", "First"),
            PlaylistItem::new("b2", "Second"),
            PlaylistItem::new("c3", "Third"),
        ]);
        let transcripts = FakeTranscripts(HashMap::from([
            ("a1".to_string(), Canned::Found(vec![segment("hi")])),
            ("b2".to_string(), Canned::Fail),
            ("c3".to_string(), Canned::Missing),
        ]));

        let document = collect(&test_config(), &playlist, &transcripts).unwrap();

        assert_eq!(document.playlist_id, "PLtest");
        assert_eq!(document.playlist_items.len(), 3);
        assert_eq!(document.transcripts.len(), 3);
        assert_eq!(document.transcripts["a1"].transcript.len(), 1);
        assert!(document.transcripts["b2"].transcript.is_empty());
        assert!(document.transcripts["c3"].transcript.is_empty());
    }

    #[test]
    fn every_transcript_key_matches_a_playlist_item() {
        let playlist = FakePlaylist(vec![
            PlaylistItem::new("a1", "First"),
            PlaylistItem::new("b2", "Second"),
        ]);
        let transcripts = FakeTranscripts(HashMap::new());

        let document = collect(&test_config(), &playlist, &transcripts).unwrap();

        for key in document.transcripts.keys() {
            assert!(
                document
                    .playlist_items
                    .iter()
                    .any(|item| item.video_id() == key)
            );
        }
    }

    #[test]
    fn playlist_failure_aborts_collection() {
        let transcripts = FakeTranscripts(HashMap::new());
        let err = collect(&test_config(), &FailingPlaylist, &transcripts).unwrap_err();
        assert!(err.to_string().contains("no such playlist"));
    }

    #[test]
    fn persist_document_writes_exact_on_disk_shape() {
        let playlist = FakePlaylist(vec![PlaylistItem::new("a1", "First")]);
        let transcripts = FakeTranscripts(HashMap::from([(
            "a1".to_string(),
            Canned::Found(vec![segment("hello")]),
        )]));
        let document = collect(&test_config(), &playlist, &transcripts).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = persist_document(&document, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("PLtest.json"));

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["playlistId"], "PLtest");
        assert_eq!(value["playlistItems"][0]["contentDetails"]["videoId"], "a1");
        assert_eq!(value["playlistItems"][0]["snippet"]["title"], "First");
        assert_eq!(value["transcripts"]["a1"]["videoId"], "a1");
        assert_eq!(value["transcripts"]["a1"]["transcript"][0]["text"], "hello");
    }
}

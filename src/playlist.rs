#![forbid(unsafe_code)]

//! Playlist listing backed by yt-dlp.
//!
//! `--flat-playlist --dump-json` prints one JSON object per entry without
//! resolving each video, which is all we need: an id and a title.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::process::Command;
#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Mutex, MutexGuard};

use crate::model::PlaylistItem;

/// Title recorded when the platform does not report one.
pub const TITLE_UNAVAILABLE: &str = "(Title unavailable)";

/// Yields the ordered video list for a playlist identifier.
pub trait PlaylistSource {
    fn list_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>>;
}

#[cfg(test)]
static YT_DLP_STUB: Mutex<Option<PathBuf>> = Mutex::new(None);
#[cfg(test)]
static STUB_USE_LOCK: Mutex<()> = Mutex::new(());

fn yt_dlp_command() -> Command {
    #[cfg(test)]
    {
        if let Some(path) = YT_DLP_STUB.lock().unwrap().clone() {
            return Command::new(path);
        }
    }
    Command::new("yt-dlp")
}

#[cfg(test)]
fn set_yt_dlp_stub_path(path: PathBuf) -> YtDlpStubGuard {
    let guard = STUB_USE_LOCK.lock().unwrap();
    {
        let mut lock = YT_DLP_STUB.lock().unwrap();
        *lock = Some(path);
    }
    YtDlpStubGuard { lock: Some(guard) }
}

#[cfg(test)]
struct YtDlpStubGuard {
    lock: Option<MutexGuard<'static, ()>>,
}

#[cfg(test)]
impl Drop for YtDlpStubGuard {
    fn drop(&mut self) {
        *YT_DLP_STUB.lock().unwrap() = None;
        self.lock.take();
    }
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={playlist_id}")
}

/// Production source shelling out to yt-dlp.
#[derive(Debug, Clone, Copy, Default)]
pub struct YtDlpPlaylist;

impl PlaylistSource for YtDlpPlaylist {
    fn list_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let url = playlist_url(playlist_id);
        let output = yt_dlp_command()
            .arg("--flat-playlist")
            .arg("--dump-json")
            .arg("--ignore-errors")
            .arg(&url)
            .output()
            .with_context(|| format!("retrieving playlist {playlist_id}"))?;

        if !output.status.success() {
            bail!(
                "failed to list playlist {} (status: {})",
                playlist_id,
                output.status
            );
        }

        let content = String::from_utf8_lossy(&output.stdout);
        let items = parse_flat_playlist(&content);
        if items.is_empty() {
            bail!("playlist {} yielded no entries; the identifier may be invalid", playlist_id);
        }
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
}

/// Parses yt-dlp's one-object-per-line output. Entries without an id and
/// lines that are not JSON objects are skipped; a missing or empty title
/// becomes the placeholder.
fn parse_flat_playlist(content: &str) -> Vec<PlaylistItem> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<FlatEntry>(line).ok())
        .filter_map(|entry| {
            let id = entry.id.filter(|id| !id.is_empty())?;
            let title = entry
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| TITLE_UNAVAILABLE.to_string());
            Some(PlaylistItem::new(id, title))
        })
        .collect()
}

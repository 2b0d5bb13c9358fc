#![forbid(unsafe_code)]

//! Splits a persisted playlist document into smaller chunk documents.
//!
//! The chunk count is derived from the byte size of the original file, not
//! from each chunk's own serialized size, so an individual chunk file can
//! land above the budget. The budget controls how many chunks exist, nothing
//! more.

use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::PlaylistDocument;

pub const DEFAULT_CHUNK_DIR: &str = "output/chunks";
pub const DEFAULT_CHUNK_SIZE_MB: u64 = 100;

/// Partitions the document's items into contiguous, order-preserving runs and
/// builds one self-contained document per run.
///
/// A video with no transcript entry in the source contributes no entry to its
/// chunk either; empty-transcript entries are carried through as-is. A
/// non-positive `target_chunk_bytes` is a caller error and fails before
/// anything is produced.
pub fn split_document(
    document: &PlaylistDocument,
    source_byte_size: u64,
    target_chunk_bytes: u64,
) -> Result<Vec<PlaylistDocument>> {
    ensure!(target_chunk_bytes > 0, "target chunk size must be positive");

    let total_items = document.playlist_items.len();
    if total_items == 0 {
        return Ok(Vec::new());
    }

    let chunk_count = source_byte_size.div_ceil(target_chunk_bytes).max(1) as usize;
    let items_per_chunk = total_items.div_ceil(chunk_count).max(1);

    let mut chunks = Vec::with_capacity(chunk_count);
    for run in document.playlist_items.chunks(items_per_chunk) {
        let transcripts = run
            .iter()
            .filter_map(|item| {
                let id = item.video_id();
                document
                    .transcripts
                    .get(id)
                    .map(|entry| (id.to_string(), entry.clone()))
            })
            .collect();
        chunks.push(PlaylistDocument {
            playlist_id: document.playlist_id.clone(),
            playlist_items: run.to_vec(),
            transcripts,
        });
    }
    Ok(chunks)
}

/// Persists chunks as `chunk_<index>.json` (zero-based) under `output_dir`.
/// Callers compute the full chunk set first, so contract violations never
/// leave a partial set behind.
pub fn write_chunks(chunks: &[PlaylistDocument], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let mut paths = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let path = output_dir.join(format!("chunk_{index}.json"));
        let json = serde_json::to_string_pretty(chunk)
            .with_context(|| format!("serializing chunk {index}"))?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        paths.push(path);
    }
    Ok(paths)
}

#![forbid(unsafe_code)]

//! Splits a large playlist transcript JSON file into chunk files. The number
//! of chunks comes from the source file's byte size divided by the budget, so
//! individual chunk files are only approximately bounded.

use anyhow::{Context, Result, bail};
use playlist_transcripts::chunks::{
    DEFAULT_CHUNK_DIR, DEFAULT_CHUNK_SIZE_MB, split_document, write_chunks,
};
use playlist_transcripts::model::PlaylistDocument;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct SplitArgs {
    input: PathBuf,
    output_dir: PathBuf,
    chunk_size_mb: u64,
}

impl SplitArgs {
    fn parse() -> Result<Self> {
        Self::from_iter(env::args().skip(1))
    }

    #[cfg(test)]
    fn from_slice(values: &[&str]) -> Result<Self> {
        Self::from_iter(values.iter().map(|value| value.to_string()))
    }

    fn from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut input: Option<PathBuf> = None;
        let mut output_dir: Option<PathBuf> = None;
        let mut chunk_size_mb: Option<u64> = None;
        let mut args = iter.into_iter();

        while let Some(arg) = args.next() {
            if let Some(value) = arg.strip_prefix("--chunk-size-mb=") {
                chunk_size_mb = Some(parse_chunk_size(value)?);
                continue;
            }
            if let Some(value) = arg.strip_prefix("--output-dir=") {
                output_dir = Some(PathBuf::from(value));
                continue;
            }

            match arg.as_str() {
                "--chunk-size-mb" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--chunk-size-mb requires a value"))?;
                    chunk_size_mb = Some(parse_chunk_size(&value)?);
                }
                "--output-dir" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--output-dir requires a value"))?;
                    output_dir = Some(PathBuf::from(value));
                }
                _ if arg.starts_with('-') => {
                    bail!("unknown argument: {arg}");
                }
                _ => {
                    if input.is_some() {
                        bail!("only one input file may be provided");
                    }
                    input = Some(PathBuf::from(arg));
                }
            }
        }

        let Some(input) = input else {
            bail!("Usage: split_json <input.json> [--chunk-size-mb <n>] [--output-dir <path>]");
        };

        Ok(Self {
            input,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CHUNK_DIR)),
            chunk_size_mb: chunk_size_mb.unwrap_or(DEFAULT_CHUNK_SIZE_MB),
        })
    }
}

fn parse_chunk_size(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("invalid chunk size: {value}"))
}

fn main() -> Result<()> {
    run(SplitArgs::parse()?)
}

fn run(args: SplitArgs) -> Result<()> {
    let source_byte_size = fs::metadata(&args.input)
        .with_context(|| format!("reading metadata for {}", args.input.display()))?
        .len();
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let document: PlaylistDocument =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.input.display()))?;

    let chunks = split_document(&document, source_byte_size, args.chunk_size_mb * 1024 * 1024)?;
    if chunks.is_empty() {
        println!("No playlist items in {}; nothing to split", args.input.display());
        return Ok(());
    }

    let paths = write_chunks(&chunks, &args.output_dir)?;
    for path in &paths {
        println!("Created chunk: {}", path.display());
    }
    Ok(())
}

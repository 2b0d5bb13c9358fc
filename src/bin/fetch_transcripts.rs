#![forbid(unsafe_code)]

//! Fetches every video in a YouTube playlist together with its transcript and
//! writes one aggregate JSON document under the output directory. The
//! playlist identifier comes from the environment (`YOUTUBE_PLAYLIST_ID`, via
//! `.env` or the process environment) unless overridden on the command line.

use anyhow::{Result, bail};
use playlist_transcripts::collector::{collect, persist_document};
use playlist_transcripts::config::{FetchOverrides, resolve_fetch_config};
use playlist_transcripts::playlist::YtDlpPlaylist;
use playlist_transcripts::transcript::TimedTextClient;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
struct FetchArgs {
    overrides: FetchOverrides,
}

impl FetchArgs {
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
        let mut overrides = FetchOverrides::default();
        let mut args = iter.into_iter();

        while let Some(arg) = args.next() {
            if let Some(value) = arg.strip_prefix("--playlist-id=") {
                overrides.playlist_id = Some(value.to_string());
                continue;
            }
            if let Some(value) = arg.strip_prefix("--output-dir=") {
                overrides.output_dir = Some(PathBuf::from(value));
                continue;
            }
            if let Some(value) = arg.strip_prefix("--lang=") {
                overrides.language = Some(value.to_string());
                continue;
            }
            if let Some(value) = arg.strip_prefix("--env-file=") {
                overrides.env_path = Some(PathBuf::from(value));
                continue;
            }

            match arg.as_str() {
                "--playlist-id" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--playlist-id requires a value"))?;
                    overrides.playlist_id = Some(value);
                }
                "--output-dir" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--output-dir requires a value"))?;
                    overrides.output_dir = Some(PathBuf::from(value));
                }
                "--lang" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--lang requires a value"))?;
                    overrides.language = Some(value);
                }
                "--env-file" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--env-file requires a value"))?;
                    overrides.env_path = Some(PathBuf::from(value));
                }
                _ => {
                    bail!(
                        "unknown argument: {arg}\nUsage: fetch_transcripts [--playlist-id <id>] [--output-dir <path>] [--lang <code>] [--env-file <path>]"
                    );
                }
            }
        }

        Ok(Self { overrides })
    }
}

fn main() -> Result<()> {
    let FetchArgs { overrides } = FetchArgs::parse()?;
    let config = resolve_fetch_config(overrides)?;

    println!("===================================");
    println!("Playlist Transcript Fetcher");
    println!("===================================");
    println!("Playlist: {}", config.playlist_id);
    println!("Output directory: {}", config.output_dir.display());
    println!("Transcript language: {}", config.language);
    println!();

    let playlist = YtDlpPlaylist;
    let transcripts = TimedTextClient::new(config.language.as_str());
    let document = collect(&config, &playlist, &transcripts)?;
    let path = persist_document(&document, &config.output_dir)?;

    println!();
    println!("Transcripts saved to {}", path.display());
    Ok(())
}

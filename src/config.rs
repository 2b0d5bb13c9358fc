#![forbid(unsafe_code)]

use anyhow::{Context, Result, anyhow};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolved settings for a fetch run. The playlist identifier is the only
/// required value; everything else falls back to the conventions the split
/// tooling expects.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub playlist_id: String,
    pub output_dir: PathBuf,
    pub language: String,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOverrides {
    pub playlist_id: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub language: Option<String>,
    pub env_path: Option<PathBuf>,
}

pub fn resolve_fetch_config(overrides: FetchOverrides) -> Result<FetchConfig> {
    let env_path = overrides
        .env_path
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_ENV_PATH));
    let file_vars = read_env_file(env_path)?;
    build_fetch_config(&file_vars, env_var_string, overrides)
}

fn build_fetch_config(
    file_vars: &HashMap<String, String>,
    env_lookup: impl Fn(&str) -> Option<String>,
    overrides: FetchOverrides,
) -> Result<FetchConfig> {
    let playlist_id = overrides
        .playlist_id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| lookup_value("YOUTUBE_PLAYLIST_ID", file_vars, &env_lookup))
        .ok_or_else(|| anyhow!("YOUTUBE_PLAYLIST_ID not set"))?;
    let output_dir = overrides
        .output_dir
        .or_else(|| {
            lookup_value("TRANSCRIPT_OUTPUT_DIR", file_vars, &env_lookup).map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let language = overrides
        .language
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| lookup_value("TRANSCRIPT_LANG", file_vars, &env_lookup))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    Ok(FetchConfig {
        playlist_id,
        output_dir,
        language,
    })
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn lookup_value(
    key: &str,
    file_vars: &HashMap<String, String>,
    env_lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_lookup(key).or_else(|| file_vars.get(key).cloned())
}

pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    if !path.exists() {
        return Ok(vars);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value_raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value_raw.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|value| value.strip_suffix('"'))
            .or_else(|| {
                value
                    .strip_prefix('\'')
                    .and_then(|value| value.strip_suffix('\''))
            })
            .unwrap_or(value);
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

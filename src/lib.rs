#![forbid(unsafe_code)]

//! Shared library for the playlist transcript tools: `fetch_transcripts`
//! collects a playlist's videos and captions into one JSON document, and
//! `split_json` partitions such a document into smaller chunk files.

pub mod chunks;
pub mod collector;
pub mod config;
pub mod model;
pub mod playlist;
pub mod transcript;

//! Transcript retrieval from the YouTube timedtext endpoint.
//!
//! With `fmt=json3` the endpoint answers `{"events": [...]}` where each event
//! carries millisecond offsets and a list of text runs. Videos without
//! captions answer 404 or an empty body.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::TranscriptSegment;

/// Yields the transcript for a single video, or an absence marker.
pub trait TranscriptSource {
    fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptOutcome>;
}

/// "No captions exist" is a normal outcome; only transport-level failures
/// surface as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    Found(Vec<TranscriptSegment>),
    Missing,
}

/// Production source talking to video.google.com over HTTP.
#[derive(Debug, Clone)]
pub struct TimedTextClient {
    language: String,
}

impl TimedTextClient {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    fn endpoint(&self, video_id: &str) -> String {
        format!(
            "https://video.google.com/timedtext?v={video_id}&lang={}&fmt=json3",
            self.language
        )
    }
}

impl TranscriptSource for TimedTextClient {
    fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptOutcome> {
        let url = self.endpoint(video_id);
        let response = match ureq::get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(TranscriptOutcome::Missing),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("fetching transcript for video {video_id}"));
            }
        };
        let body = response
            .into_string()
            .with_context(|| format!("reading transcript body for video {video_id}"))?;
        if body.trim().is_empty() {
            return Ok(TranscriptOutcome::Missing);
        }
        let track: TimedTextTrack = serde_json::from_str(&body)
            .with_context(|| format!("parsing transcript for video {video_id}"))?;
        let segments = track.into_segments();
        if segments.is_empty() {
            return Ok(TranscriptOutcome::Missing);
        }
        Ok(TranscriptOutcome::Found(segments))
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextTrack {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<i64>,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<i64>,
    #[serde(default)]
    segs: Vec<TimedTextRun>,
}

#[derive(Debug, Deserialize)]
struct TimedTextRun {
    #[serde(default)]
    utf8: String,
}

impl TimedTextTrack {
    /// Flattens events into timed segments. Window events without text runs
    /// are dropped.
    fn into_segments(self) -> Vec<TranscriptSegment> {
        self.events
            .into_iter()
            .filter_map(|event| {
                let text: String = event.segs.iter().map(|run| run.utf8.as_str()).collect();
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(TranscriptSegment {
                    text: text.to_string(),
                    start: event.start_ms.unwrap_or(0) as f64 / 1000.0,
                    duration: event.duration_ms.unwrap_or(0) as f64 / 1000.0,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_video_id_and_language() {
        let client = TimedTextClient::new("de");
        assert_eq!(
            client.endpoint("abc123"),
            "https://video.google.com/timedtext?v=abc123&lang=de&fmt=json3"
        );
    }

    #[test]
    fn json3_events_become_segments() {
        let raw = r#"{
            "events": [
                {"tStartMs": 0, "dDurationMs": 1500, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
                {"tStartMs": 1500, "dDurationMs": 2000},
                {"tStartMs": 3500, "dDurationMs": 1000, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 4500, "dDurationMs": 500, "segs": [{"utf8": "bye"}]}
            ]
        }"#;
        let track: TimedTextTrack = serde_json::from_str(raw).unwrap();
        let segments = track.into_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello world");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].duration, 1.5);
        assert_eq!(segments[1].text, "bye");
        assert_eq!(segments[1].start, 4.5);
    }

    #[test]
    fn empty_event_list_yields_no_segments() {
        let track: TimedTextTrack = serde_json::from_str(r#"{"events": []}"#).unwrap();
        assert!(track.into_segments().is_empty());
    }

    #[test]
    fn missing_events_key_is_tolerated() {
        let track: TimedTextTrack = serde_json::from_str("{}").unwrap();
        assert!(track.into_segments().is_empty());
    }
}

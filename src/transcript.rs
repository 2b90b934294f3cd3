use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, TelopError};
use crate::subtitle::Segment;

// Structs for parsing whisper.cpp JSON output (`-oj`)
#[derive(Debug, Clone, Deserialize)]
struct WhisperCppOutput {
    transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Deserialize)]
struct WhisperCppSegment {
    offsets: WhisperCppOffsets,
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct WhisperCppOffsets {
    from: i64,
    to: i64,
}

impl From<WhisperCppSegment> for Segment {
    fn from(seg: WhisperCppSegment) -> Self {
        // Offsets are milliseconds
        Segment {
            start: seg.offsets.from as f64 / 1000.0,
            end: seg.offsets.to as f64 / 1000.0,
            text: seg.text.trim().to_string(),
        }
    }
}

/// An ordered segment sequence read from a recognizer's JSON output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Parse any of the supported shapes:
    /// - OpenAI whisper: `{"segments": [{"start", "end", "text", ...}]}`
    /// - whisper.cpp: `{"transcription": [{"offsets": {"from", "to"}, "text"}]}`
    /// - a bare array of `{"start", "end", "text"}`
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;

        let segments = match value {
            Value::Array(items) => parse_segments(items)?,
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("segments") {
                    parse_segments(items)?
                } else if map.contains_key("transcription") {
                    let output: WhisperCppOutput = serde_json::from_value(Value::Object(map))
                        .map_err(|e| TelopError::Transcript(format!("Invalid whisper.cpp output: {}", e)))?;
                    output.transcription.into_iter().map(Segment::from).collect()
                } else {
                    return Err(TelopError::Transcript(
                        "Expected a 'segments' or 'transcription' array".to_string(),
                    ));
                }
            }
            _ => {
                return Err(TelopError::Transcript(
                    "Transcript must be a JSON object or array".to_string(),
                ));
            }
        };

        debug!("Parsed {} transcript segments", segments.len());
        Ok(Self { segments })
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TelopError::FileNotFound(path.display().to_string()));
        }

        info!("Loading transcript: {}", path.display());
        let content = fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }
}

fn parse_segments(items: Vec<Value>) -> Result<Vec<Segment>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Segment>(item).map_err(|e| {
                TelopError::Transcript(format!("Segment {} is malformed: {}", index, e))
            })
        })
        .collect()
}

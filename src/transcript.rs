use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use anyhow::anyhow;
use crate::errors::TranscriptError;
use crate::timecode::SrtTimestamp;

// @module: Transcript schema and boundary validation

/// How chunk timestamps outside the valid range are treated
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Reject negative, non-finite and reversed timestamps
    #[default]
    Strict,
    /// Clamp negatives to zero and reversed ranges to zero length
    Clamp,
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Clamp => write!(f, "clamp"),
        }
    }
}

impl FromStr for TimestampPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "clamp" => Ok(Self::Clamp),
            _ => Err(anyhow!("Invalid timestamp policy: {}", s)),
        }
    }
}

// @struct: One timestamped text segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    // @field: (start, end) in seconds from media start
    pub timestamp: (f64, f64),

    // @field: Caption text, trimmed on output
    pub text: String,
}

impl Chunk {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Chunk {
            timestamp: (start, end),
            text: text.into(),
        }
    }

    pub fn start(&self) -> f64 {
        self.timestamp.0
    }

    pub fn end(&self) -> f64 {
        self.timestamp.1
    }

    /// Resolve the chunk's time range under the given policy.
    /// `position` is the zero-based index used in error messages.
    pub fn resolve_range(&self, position: usize, policy: TimestampPolicy) -> Result<(SrtTimestamp, SrtTimestamp), TranscriptError> {
        let (start, end) = self.timestamp;

        for (label, value) in [("start", start), ("end", end)] {
            if !value.is_finite() {
                return Err(TranscriptError::InvalidTimestamp {
                    chunk: position,
                    reason: format!("{} is not a finite number ({})", label, value),
                });
            }
        }

        match policy {
            TimestampPolicy::Strict => {
                if start < 0.0 || end < 0.0 {
                    return Err(TranscriptError::InvalidTimestamp {
                        chunk: position,
                        reason: format!("negative offset ({} --> {})", start, end),
                    });
                }
                if end < start {
                    return Err(TranscriptError::InvalidTimestamp {
                        chunk: position,
                        reason: format!("end {} is before start {}", end, start),
                    });
                }
                Ok((SrtTimestamp::from_seconds(start), SrtTimestamp::from_seconds(end)))
            }
            TimestampPolicy::Clamp => {
                let start = start.max(0.0);
                let end = end.max(start);
                Ok((SrtTimestamp::from_seconds(start), SrtTimestamp::from_seconds(end)))
            }
        }
    }

    /// Build a chunk from an untyped JSON value found at `chunks[position]`
    fn from_value(position: usize, value: &Value) -> Result<Self, TranscriptError> {
        let location = format!("chunks[{}]", position);
        let object = value.as_object().ok_or_else(|| TranscriptError::InvalidShape {
            location: location.clone(),
            reason: "expected an object".to_string(),
        })?;

        let timestamp = object.get("timestamp").ok_or_else(|| TranscriptError::MissingField {
            field: "timestamp",
            location: location.clone(),
        })?;
        let timestamp = Self::parse_timestamp_pair(&location, timestamp)?;

        let text = object.get("text").ok_or_else(|| TranscriptError::MissingField {
            field: "text",
            location: location.clone(),
        })?;
        let text = text.as_str().ok_or_else(|| TranscriptError::InvalidShape {
            location: format!("{}.text", location),
            reason: "expected a string".to_string(),
        })?;

        Ok(Chunk {
            timestamp,
            text: text.to_string(),
        })
    }

    fn parse_timestamp_pair(location: &str, value: &Value) -> Result<(f64, f64), TranscriptError> {
        let shape_error = || TranscriptError::InvalidShape {
            location: format!("{}.timestamp", location),
            reason: "expected a [start, end] pair of numbers".to_string(),
        };

        match value.as_array().map(Vec::as_slice) {
            Some([start, end]) => {
                let start = start.as_f64().ok_or_else(shape_error)?;
                let end = end.as_f64().ok_or_else(shape_error)?;
                Ok((start, end))
            }
            _ => Err(shape_error()),
        }
    }
}

/// A transcript as produced by a speech-recognition pipeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Speaker descriptors; accepted but never rendered
    #[serde(default)]
    pub speakers: Vec<Value>,

    /// Chunks in display order
    pub chunks: Vec<Chunk>,
}

impl Transcript {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Transcript {
            speakers: Vec::new(),
            chunks,
        }
    }

    /// Validate an untyped transcript object and convert it to the typed model.
    ///
    /// Fails on the first structural problem; nothing is partially accepted.
    pub fn from_value(value: &Value) -> Result<Self, TranscriptError> {
        let object = value.as_object().ok_or_else(|| TranscriptError::InvalidShape {
            location: "transcript".to_string(),
            reason: "expected an object".to_string(),
        })?;

        let speakers = match object.get("speakers") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(TranscriptError::InvalidShape {
                    location: "speakers".to_string(),
                    reason: "expected an array".to_string(),
                });
            }
        };

        let chunks = object
            .get("chunks")
            .ok_or_else(|| TranscriptError::MissingField {
                field: "chunks",
                location: "transcript".to_string(),
            })?
            .as_array()
            .ok_or_else(|| TranscriptError::InvalidShape {
                location: "chunks".to_string(),
                reason: "expected an array".to_string(),
            })?;

        let chunks = chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| Chunk::from_value(position, chunk))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Transcript { speakers, chunks })
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> Result<Self, TranscriptError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }
}

use std::fmt;
use log::debug;
use serde_json::Value;
use crate::errors::TranscriptError;
use crate::timecode::SrtTimestamp;
use crate::transcript::{TimestampPolicy, Transcript};

// @module: Transcript to SRT conversion

// @struct: Single numbered subtitle block
#[derive(Debug, Clone, PartialEq)]
pub struct SrtBlock {
    // @field: 1-based sequence number
    pub index: usize,

    // @field: Display start
    pub start: SrtTimestamp,

    // @field: Display end
    pub end: SrtTimestamp,

    // @field: Trimmed caption text
    pub text: String,
}

impl SrtBlock {
    pub fn new(index: usize, start: SrtTimestamp, end: SrtTimestamp, text: &str) -> Self {
        SrtBlock {
            index,
            start,
            end,
            text: text.trim().to_string(),
        }
    }
}

impl fmt::Display for SrtBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered subtitle blocks; renders with one blank line between blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SrtDocument {
    pub blocks: Vec<SrtBlock>,
}

impl SrtDocument {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for SrtDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

/// Converts transcripts to SRT under a fixed timestamp policy
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtConverter {
    policy: TimestampPolicy,
}

impl SrtConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: TimestampPolicy) -> Self {
        SrtConverter { policy }
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// Build the block list. Any rejected chunk aborts the whole conversion.
    pub fn to_document(&self, transcript: &Transcript) -> Result<SrtDocument, TranscriptError> {
        let blocks = transcript
            .chunks
            .iter()
            .enumerate()
            .map(|(position, chunk)| {
                let (start, end) = chunk.resolve_range(position, self.policy)?;
                Ok(SrtBlock::new(position + 1, start, end, &chunk.text))
            })
            .collect::<Result<Vec<_>, TranscriptError>>()?;

        debug!("Converted {} chunks to SRT blocks ({} policy)", blocks.len(), self.policy);

        Ok(SrtDocument { blocks })
    }

    /// Render the transcript as SRT text
    pub fn convert(&self, transcript: &Transcript) -> Result<String, TranscriptError> {
        Ok(self.to_document(transcript)?.to_string())
    }

    /// Validate an untyped transcript object, then render it
    pub fn convert_value(&self, value: &Value) -> Result<String, TranscriptError> {
        let transcript = Transcript::from_value(value)?;
        self.convert(&transcript)
    }

    /// Parse a JSON transcript, then render it
    pub fn convert_json_str(&self, content: &str) -> Result<String, TranscriptError> {
        let transcript = Transcript::from_json_str(content)?;
        self.convert(&transcript)
    }
}

/// Render the transcript as SRT text using the default (strict) policy
pub fn convert(transcript: &Transcript) -> Result<String, TranscriptError> {
    SrtConverter::new().convert(transcript)
}

/// Validate and render an untyped transcript object using the default policy
pub fn convert_value(value: &Value) -> Result<String, TranscriptError> {
    SrtConverter::new().convert_value(value)
}

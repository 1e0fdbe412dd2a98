//! Session frame log
//!
//! Records the decoded frames of a streaming session for later inspection
//! or export. The log is append-only while a session runs; saving produces
//! a JSON document that round-trips through [`SessionLog::load`], and
//! [`SessionLog::export_csv`] writes a spreadsheet-friendly view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, StreamVisError};
use crate::types::{BusType, DecoderMethod};

/// Metadata for a recorded session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Name/title of the session
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// When the session was recorded
    pub recorded_at: DateTime<Utc>,
    /// Transport the session streamed from
    pub bus: BusType,
    /// Decoder method the session used
    pub decoder: DecoderMethod,
    /// Number of frames recorded
    pub frame_count: usize,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        Self {
            name: String::from("Untitled Session"),
            description: None,
            recorded_at: Utc::now(),
            bus: BusType::Serial,
            decoder: DecoderMethod::PlainText,
            frame_count: 0,
        }
    }
}

impl SessionMetadata {
    /// Create new metadata with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One decoded frame in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Extractor-assigned sequence number
    pub sequence: u64,
    /// Time offset from session start
    pub offset: Duration,
    /// Decoded payload text
    pub text: String,
}

/// A complete recorded session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    /// Session metadata
    pub metadata: SessionMetadata,
    /// Recorded frames, in sequence order
    pub records: Vec<FrameRecord>,
}

impl SessionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with metadata
    pub fn with_metadata(metadata: SessionMetadata) -> Self {
        Self {
            metadata,
            records: Vec::new(),
        }
    }

    /// Append a decoded frame
    pub fn record(&mut self, sequence: u64, offset: Duration, text: impl Into<String>) {
        self.records.push(FrameRecord {
            sequence,
            offset,
            text: text.into(),
        });
    }

    /// Total duration covered by the log
    pub fn duration(&self) -> Duration {
        self.records.last().map(|r| r.offset).unwrap_or(Duration::ZERO)
    }

    /// Number of recorded frames
    pub fn frame_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Update metadata counters from the recorded frames
    pub fn finalize(&mut self) {
        self.metadata.frame_count = self.records.len();
    }

    /// Save the log to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StreamVisError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a log from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&json)
            .map_err(|e| StreamVisError::Serialization(format!("invalid session log: {e}")))
    }

    /// Export the log as CSV (sequence, offset in milliseconds, text)
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = std::fs::File::create(path.as_ref())?;
        writeln!(file, "sequence,offset_ms,text")?;
        for record in &self.records {
            writeln!(
                file,
                "{},{:.3},{}",
                record.sequence,
                record.offset.as_secs_f64() * 1000.0,
                csv_escape(&record.text)
            )?;
        }
        Ok(())
    }
}

/// Quote a CSV field, doubling any embedded quotes
fn csv_escape(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

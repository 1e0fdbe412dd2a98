//! Configuration for connections and projects
//!
//! This module handles the per-session stream configuration and project
//! file persistence:
//!
//! - [`ConnectionConfig`] - decoder, frame detection, delimiters, transport
//! - [`ProjectFile`] - a saved dashboard project (connection + groups)
//!
//! Configuration is validated once, before streaming begins; a malformed
//! delimiter setup is a setup-time [`StreamVisError::Config`], never a
//! per-frame error. Project files are JSON and round-trip through serde;
//! widget identifier strings inside them are resolved leniently (unknown
//! identifiers survive a load as "no widget" sentinels).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, StreamVisError};
use crate::model::Group;
use crate::types::{BusType, DecoderMethod, FrameDetection, OperationMode};

/// Project file extension
pub const PROJECT_FILE_EXTENSION: &str = "svproj";

/// Default maximum accumulation buffer size in bytes
///
/// Bounds a delimiter-less misconfiguration to constant memory. The limit is
/// deliberately far above any sane telemetry frame; hitting it means the
/// configured delimiter never occurs in the stream.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Default frame finish sequence
pub const DEFAULT_FINISH_SEQUENCE: &str = "\n";

/// Per-session stream configuration
///
/// Immutable while a connection is open; reconfiguring resets the
/// extraction state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Transport the stream arrives on
    pub bus_type: BusType,

    /// How the dashboard is constructed from decoded frames
    pub operation_mode: OperationMode,

    /// How raw frame bytes are decoded into text
    pub decoder_method: DecoderMethod,

    /// How frame boundaries are detected
    pub frame_detection: FrameDetection,

    /// Start delimiter (required for start+end detection, ignored otherwise)
    pub start_sequence: String,

    /// End delimiter (required unless detection is NoDelimiters)
    pub finish_sequence: String,

    /// Maximum bytes buffered while searching for a delimiter
    #[serde(default = "default_max_frame_size")]
    pub max_frame_size: usize,
}

fn default_max_frame_size() -> usize {
    DEFAULT_MAX_FRAME_SIZE
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            bus_type: BusType::Serial,
            operation_mode: OperationMode::QuickPlot,
            decoder_method: DecoderMethod::PlainText,
            frame_detection: FrameDetection::EndDelimiterOnly,
            start_sequence: String::new(),
            finish_sequence: String::from(DEFAULT_FINISH_SEQUENCE),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration with defaults (quick plot, newline frames)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transport
    pub fn with_bus_type(mut self, bus_type: BusType) -> Self {
        self.bus_type = bus_type;
        self
    }

    /// Set the operation mode
    pub fn with_operation_mode(mut self, mode: OperationMode) -> Self {
        self.operation_mode = mode;
        self
    }

    /// Set the decoder method
    pub fn with_decoder_method(mut self, method: DecoderMethod) -> Self {
        self.decoder_method = method;
        self
    }

    /// Set the frame detection strategy
    pub fn with_frame_detection(mut self, detection: FrameDetection) -> Self {
        self.frame_detection = detection;
        self
    }

    /// Set the start delimiter
    pub fn with_start_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.start_sequence = sequence.into();
        self
    }

    /// Set the end delimiter
    pub fn with_finish_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.finish_sequence = sequence.into();
        self
    }

    /// Set the maximum accumulation buffer size
    pub fn with_max_frame_size(mut self, bytes: usize) -> Self {
        self.max_frame_size = bytes;
        self
    }

    /// Start delimiter as raw bytes
    pub fn start_bytes(&self) -> &[u8] {
        self.start_sequence.as_bytes()
    }

    /// End delimiter as raw bytes
    pub fn finish_bytes(&self) -> &[u8] {
        self.finish_sequence.as_bytes()
    }

    /// Validate the configuration before streaming begins
    ///
    /// Checks the delimiter requirements of the selected detection mode and
    /// that the buffer bound leaves room for at least the delimiters
    /// themselves.
    pub fn validate(&self) -> Result<()> {
        match self.frame_detection {
            FrameDetection::EndDelimiterOnly => {
                if self.finish_sequence.is_empty() {
                    return Err(StreamVisError::Config(
                        "end-delimiter detection requires a non-empty finish sequence".to_string(),
                    ));
                }
            }
            FrameDetection::StartAndEndDelimiter => {
                if self.start_sequence.is_empty() || self.finish_sequence.is_empty() {
                    return Err(StreamVisError::Config(
                        "start+end detection requires non-empty start and finish sequences"
                            .to_string(),
                    ));
                }
            }
            FrameDetection::NoDelimiters => {}
        }

        let delimiter_len = self.start_sequence.len() + self.finish_sequence.len();
        if self.max_frame_size == 0 || self.max_frame_size < delimiter_len {
            return Err(StreamVisError::Config(format!(
                "max frame size {} cannot hold the configured delimiters ({} bytes)",
                self.max_frame_size, delimiter_len
            )));
        }

        Ok(())
    }
}

/// A saved dashboard project
///
/// Contains everything needed to reopen a session: the stream configuration
/// and the group/dataset layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project title
    pub title: String,

    /// Stream configuration
    pub connection: ConnectionConfig,

    /// Dashboard groups, in declaration order
    pub groups: Vec<Group>,
}

impl ProjectFile {
    /// Create a new project with the given title and default configuration
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Load a project from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let project: ProjectFile = serde_json::from_str(&json)
            .map_err(|e| StreamVisError::Serialization(format!("invalid project file: {e}")))?;
        project.connection.validate()?;
        Ok(project)
    }

    /// Save the project to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StreamVisError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

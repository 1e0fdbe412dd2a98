//! Core data types for the StreamVis pipeline
//!
//! This module contains the fundamental enumerations that configure the
//! stream-processing pipeline, plus the [`Frame`] unit that flows through it.
//!
//! # Main Types
//!
//! - [`DecoderMethod`] - How raw frame bytes are turned into text
//! - [`FrameDetection`] - How frame boundaries are found in the stream
//! - [`OperationMode`] - How the dashboard is constructed
//! - [`BusType`] - Which transport a frame originated from
//! - [`AxisVisibility`] - Which plot axes are rendered
//! - [`DatasetOptions`] - Bit-flag set of rendering intents on a dataset
//! - [`Frame`] - One complete, delimited unit of payload bytes
//!
//! All configuration enums are closed sets dispatched with exhaustive
//! `match`; serde representations are stable and used verbatim in project
//! files.

use serde::{Deserialize, Serialize};

/// Transport a data stream originates from
///
/// Carried as frame metadata only; the pipeline never branches on it.
/// Opening and reading the actual connection is the transport layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BusType {
    /// Serial port communication
    #[default]
    Serial,
    /// Network socket communication
    Network,
    /// Bluetooth Low Energy communication
    BluetoothLe,
}

impl BusType {
    /// Get all bus types
    pub fn all() -> &'static [BusType] {
        &[BusType::Serial, BusType::Network, BusType::BluetoothLe]
    }

    /// Get display name for this bus type
    pub fn display_name(&self) -> &'static str {
        match self {
            BusType::Serial => "Serial",
            BusType::Network => "Network",
            BusType::BluetoothLe => "Bluetooth LE",
        }
    }
}

impl std::fmt::Display for BusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Method used to decode raw frame bytes into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecoderMethod {
    /// Interpret the bytes as plain text (lossy UTF-8, never fails)
    #[default]
    PlainText,
    /// Interpret the bytes as hexadecimal digit pairs
    Hexadecimal,
    /// Interpret the bytes as Base64
    Base64,
}

impl DecoderMethod {
    /// Get all decoder methods
    pub fn all() -> &'static [DecoderMethod] {
        &[
            DecoderMethod::PlainText,
            DecoderMethod::Hexadecimal,
            DecoderMethod::Base64,
        ]
    }

    /// Get display name for this decoder method
    pub fn display_name(&self) -> &'static str {
        match self {
            DecoderMethod::PlainText => "Plain Text",
            DecoderMethod::Hexadecimal => "Hexadecimal",
            DecoderMethod::Base64 => "Base64",
        }
    }
}

impl std::fmt::Display for DecoderMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Strategy used to detect frame boundaries within a continuous stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FrameDetection {
    /// A frame is everything before each occurrence of the end delimiter
    #[default]
    EndDelimiterOnly,
    /// A frame is the bytes strictly between a start and an end delimiter
    StartAndEndDelimiter,
    /// No boundary detection; each read is treated as one frame
    NoDelimiters,
}

impl FrameDetection {
    /// Get all frame detection strategies
    pub fn all() -> &'static [FrameDetection] {
        &[
            FrameDetection::EndDelimiterOnly,
            FrameDetection::StartAndEndDelimiter,
            FrameDetection::NoDelimiters,
        ]
    }

    /// Get display name for this detection strategy
    pub fn display_name(&self) -> &'static str {
        match self {
            FrameDetection::EndDelimiterOnly => "End Delimiter Only",
            FrameDetection::StartAndEndDelimiter => "Start + End Delimiter",
            FrameDetection::NoDelimiters => "No Delimiters",
        }
    }
}

impl std::fmt::Display for FrameDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Strategy used to construct the dashboard from incoming data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperationMode {
    /// Build the dashboard from a predefined project file
    ProjectFile,
    /// Build the dashboard from device-sent JSON
    DeviceSendsJson,
    /// Quick and simple data plotting mode
    #[default]
    QuickPlot,
}

impl OperationMode {
    /// Get all operation modes
    pub fn all() -> &'static [OperationMode] {
        &[
            OperationMode::ProjectFile,
            OperationMode::DeviceSendsJson,
            OperationMode::QuickPlot,
        ]
    }

    /// Get display name for this operation mode
    pub fn display_name(&self) -> &'static str {
        match self {
            OperationMode::ProjectFile => "Project File",
            OperationMode::DeviceSendsJson => "Device Sends JSON",
            OperationMode::QuickPlot => "Quick Plot",
        }
    }
}

/// Visibility flags for plot axes
///
/// Stored as a two-bit mask: bit 0 is the X axis, bit 1 is the Y axis.
/// Independent of widget selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisVisibility {
    /// Neither axis is visible
    NoAxesVisible = 0b00,
    /// Only the X axis is visible
    AxisX = 0b01,
    /// Only the Y axis is visible
    AxisY = 0b10,
    /// Both X and Y axes are visible
    #[default]
    AxisXY = 0b11,
}

impl AxisVisibility {
    /// Reconstruct from a raw two-bit mask; higher bits are ignored
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b01 => AxisVisibility::AxisX,
            0b10 => AxisVisibility::AxisY,
            0b11 => AxisVisibility::AxisXY,
            _ => AxisVisibility::NoAxesVisible,
        }
    }

    /// Get the raw bit mask
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Whether the X axis is visible
    pub fn shows_x(&self) -> bool {
        self.bits() & 0b01 != 0
    }

    /// Whether the Y axis is visible
    pub fn shows_y(&self) -> bool {
        self.bits() & 0b10 != 0
    }
}

/// Bit-flag set of rendering intents declared on a dataset
///
/// A dataset may serve several visualizations at once (e.g. a plot and an
/// FFT of the same channel), so the options combine with `|` and are
/// order-independent. The empty set ([`DatasetOptions::GENERIC`]) means the
/// dataset has no dedicated widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DatasetOptions(u8);

impl DatasetOptions {
    /// No rendering intent declared
    pub const GENERIC: DatasetOptions = DatasetOptions(0b0000_0000);
    /// Render the dataset on a 2D plot
    pub const PLOT: DatasetOptions = DatasetOptions(0b0000_0001);
    /// Render the dataset's frequency spectrum
    pub const FFT: DatasetOptions = DatasetOptions(0b0000_0010);
    /// Render the dataset as a bar level
    pub const BAR: DatasetOptions = DatasetOptions(0b0000_0100);
    /// Render the dataset as a gauge
    pub const GAUGE: DatasetOptions = DatasetOptions(0b0000_1000);
    /// Render the dataset as a compass heading
    pub const COMPASS: DatasetOptions = DatasetOptions(0b0001_0000);
    /// Render the dataset as an LED indicator
    pub const LED: DatasetOptions = DatasetOptions(0b0010_0000);

    /// All defined option bits set
    pub const ALL: DatasetOptions = DatasetOptions(0b0011_1111);

    /// Reconstruct from a raw mask; undefined bits are dropped
    pub fn from_bits(bits: u8) -> Self {
        DatasetOptions(bits & Self::ALL.0)
    }

    /// Get the raw bit mask
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether every bit in `other` is set in `self`
    pub fn contains(&self, other: DatasetOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no option bit is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DatasetOptions {
    type Output = DatasetOptions;

    fn bitor(self, rhs: DatasetOptions) -> DatasetOptions {
        DatasetOptions(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DatasetOptions {
    fn bitor_assign(&mut self, rhs: DatasetOptions) {
        self.0 |= rhs.0;
    }
}

/// One complete, delimited unit of payload bytes extracted from a stream
///
/// Frames carry a monotonic sequence number assigned by the extractor, so
/// consumers that decode out of order can resequence results before display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The payload bytes (delimiters already stripped)
    pub bytes: Vec<u8>,
    /// Transport the frame originated from; metadata only
    pub bus: BusType,
    /// Monotonic per-extractor sequence number, starting at 0
    pub sequence: u64,
}

impl Frame {
    /// Create a new frame
    pub fn new(bytes: Vec<u8>, bus: BusType, sequence: u64) -> Self {
        Self {
            bytes,
            bus,
            sequence,
        }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_visibility_bits() {
        assert_eq!(AxisVisibility::NoAxesVisible.bits(), 0b00);
        assert_eq!(AxisVisibility::AxisX.bits(), 0b01);
        assert_eq!(AxisVisibility::AxisY.bits(), 0b10);
        assert_eq!(AxisVisibility::AxisXY.bits(), 0b11);

        for &v in &[
            AxisVisibility::NoAxesVisible,
            AxisVisibility::AxisX,
            AxisVisibility::AxisY,
            AxisVisibility::AxisXY,
        ] {
            assert_eq!(AxisVisibility::from_bits(v.bits()), v);
        }
    }

    #[test]
    fn test_axis_visibility_components() {
        assert!(AxisVisibility::AxisXY.shows_x());
        assert!(AxisVisibility::AxisXY.shows_y());
        assert!(AxisVisibility::AxisX.shows_x());
        assert!(!AxisVisibility::AxisX.shows_y());
        assert!(!AxisVisibility::NoAxesVisible.shows_x());
        assert!(!AxisVisibility::NoAxesVisible.shows_y());
    }

    #[test]
    fn test_dataset_options_combine() {
        let opts = DatasetOptions::PLOT | DatasetOptions::FFT;
        assert!(opts.contains(DatasetOptions::PLOT));
        assert!(opts.contains(DatasetOptions::FFT));
        assert!(!opts.contains(DatasetOptions::GAUGE));

        // Order-independent
        assert_eq!(
            DatasetOptions::FFT | DatasetOptions::PLOT,
            DatasetOptions::PLOT | DatasetOptions::FFT
        );
    }

    #[test]
    fn test_dataset_options_empty_and_all() {
        assert!(DatasetOptions::GENERIC.is_empty());
        assert!(DatasetOptions::default().is_empty());
        assert!(DatasetOptions::ALL.contains(DatasetOptions::LED));
        // The empty set is contained in everything
        assert!(DatasetOptions::GENERIC.contains(DatasetOptions::GENERIC));
        assert!(DatasetOptions::ALL.contains(DatasetOptions::GENERIC));
    }

    #[test]
    fn test_dataset_options_from_bits_masks_undefined() {
        let opts = DatasetOptions::from_bits(0xFF);
        assert_eq!(opts, DatasetOptions::ALL);
    }

    #[test]
    fn test_decoder_method_serde_roundtrip() {
        for &method in DecoderMethod::all() {
            let json = serde_json::to_string(&method).unwrap();
            let back: DecoderMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(back, method);
        }
    }

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(b"A,1".to_vec(), BusType::Serial, 7);
        assert_eq!(frame.len(), 3);
        assert!(!frame.is_empty());
        assert_eq!(frame.sequence, 7);
    }
}

//! Builders for test fixtures

use streamvis_rs::config::{ConnectionConfig, ProjectFile};
use streamvis_rs::model::{Dataset, Group};
use streamvis_rs::types::{DatasetOptions, DecoderMethod, FrameDetection};

/// A ready-made quick-plot configuration with newline framing
pub fn newline_config() -> ConnectionConfig {
    ConnectionConfig::default()
}

/// A start+end configuration with the given single-character delimiters
pub fn bracketed_config(start: &str, finish: &str) -> ConnectionConfig {
    ConnectionConfig::default()
        .with_frame_detection(FrameDetection::StartAndEndDelimiter)
        .with_start_sequence(start)
        .with_finish_sequence(finish)
}

/// A hex-decoded newline-framed configuration
pub fn hex_config() -> ConnectionConfig {
    ConnectionConfig::default().with_decoder_method(DecoderMethod::Hexadecimal)
}

/// A representative project: an IMU group plus a flagged dataset
pub fn sample_project() -> ProjectFile {
    let mut project = ProjectFile::new("Test Telemetry");
    project.groups.push(
        Group::new("IMU")
            .with_widget_id("accelerometer")
            .with_dataset(Dataset::new("X", 0).with_units("m/s²"))
            .with_dataset(Dataset::new("Y", 1).with_units("m/s²"))
            .with_dataset(Dataset::new("Z", 2).with_units("m/s²")),
    );
    project.groups.push(
        Group::new("Power").with_dataset(
            Dataset::new("Voltage", 3)
                .with_units("V")
                .with_options(DatasetOptions::PLOT | DatasetOptions::GAUGE)
                .with_range(0.0, 12.0),
        ),
    );
    project
}

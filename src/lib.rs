//! # StreamVis-RS: Stream-Based Telemetry Visualizer Core
//!
//! The data-processing core of a telemetry dashboard: it ingests a
//! continuous byte stream from an external transport (serial port, network
//! socket, or Bluetooth LE peripheral), extracts discrete frames from it,
//! decodes each frame's payload, and maps parsed data groups onto the
//! fixed catalog of dashboard widget types.
//!
//! ## Architecture
//!
//! - **Extraction**: [`extractor::FrameExtractor`] finds frame boundaries
//!   in arbitrarily-chunked input, independent of how the transport splits
//!   the stream
//! - **Decoding**: [`decoder::decode`] turns frame bytes into text under
//!   the configured [`types::DecoderMethod`]
//! - **Pipeline**: [`pipeline::StreamPipeline`] runs both on a worker
//!   thread, fed and drained through crossbeam channels
//! - **Resolution**: [`dashboard`] deterministically assigns widgets to
//!   parsed [`model::Group`]s and [`model::Dataset`]s
//! - **Series**: [`series::LineSeries`] / [`series::MultiLineSeries`] hold
//!   the plot data the rendering layer draws
//!
//! Transports and rendering widgets are external collaborators; this crate
//! defines the data that crosses those seams, not the I/O or the pixels.
//!
//! ## Example
//!
//! ```ignore
//! use streamvis_rs::config::ConnectionConfig;
//! use streamvis_rs::pipeline::{PipelineMessage, StreamPipeline};
//!
//! fn main() -> streamvis_rs::Result<()> {
//!     let config = ConnectionConfig::default();
//!     let (handle, worker) = StreamPipeline::spawn(config)?;
//!
//!     // The transport feeds chunks as they arrive ...
//!     handle.feed(b"temp,23.5\nhum,40.2\n".to_vec())?;
//!
//!     // ... and the rendering side drains decoded frames.
//!     for msg in handle.drain() {
//!         if let PipelineMessage::FrameDecoded { text, .. } = msg {
//!             println!("{text}");
//!         }
//!     }
//!
//!     handle.shutdown();
//!     worker.join().unwrap();
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod decoder;
pub mod error;
pub mod extractor;
pub mod model;
pub mod pipeline;
pub mod series;
pub mod session;
pub mod sys;
pub mod types;

// Re-export commonly used types
pub use config::{ConnectionConfig, ProjectFile};
pub use dashboard::{DashboardWidget, DatasetWidget, GroupWidget};
pub use error::{Result, StreamVisError};
pub use extractor::{ExtractorStats, FrameExtractor};
pub use model::{Dataset, Group};
pub use pipeline::{PipelineHandle, PipelineMessage, StreamPipeline};
pub use series::{LineSeries, MultiLineSeries, PlotDataX, PlotDataY};
pub use types::{
    AxisVisibility, BusType, DatasetOptions, DecoderMethod, Frame, FrameDetection, OperationMode,
};

//! Stream-processing pipeline
//!
//! This module owns the producer/consumer plumbing between a transport and
//! the rendering layer. The transport feeds raw byte chunks in; the worker
//! thread extracts frames, decodes them in arrival order, and emits one
//! message per outcome. It communicates through crossbeam channels.
//!
//! # Architecture
//!
//! - [`PipelineCommand`] - control messages sent to the worker
//!   (reconfigure, clear, shutdown)
//! - [`PipelineMessage`] - results sent back (decoded frames, per-frame
//!   decode failures, overflow and stats reports)
//! - [`PipelineHandle`] - caller-side handle for feeding chunks, sending
//!   commands, and draining messages
//! - [`StreamPipeline`] - entry point that validates the configuration and
//!   spawns the worker thread
//!
//! The worker owns the [`FrameExtractor`](crate::extractor::FrameExtractor)
//! exclusively, which enforces the single-writer discipline the extractor
//! requires. Decoding is pure, so a corrupt frame is reported and skipped;
//! it never halts the loop.
//!
//! # Example
//!
//! ```ignore
//! use streamvis_rs::config::ConnectionConfig;
//! use streamvis_rs::pipeline::{PipelineMessage, StreamPipeline};
//!
//! let config = ConnectionConfig::default();
//! let (handle, worker) = StreamPipeline::spawn(config)?;
//!
//! // Transport side
//! handle.feed(b"temp,23.5\nhum,40.2\n".to_vec())?;
//!
//! // Rendering side
//! for msg in handle.drain() {
//!     if let PipelineMessage::FrameDecoded { sequence, text, .. } = msg {
//!         println!("frame {sequence}: {text}");
//!     }
//! }
//!
//! handle.shutdown();
//! worker.join().unwrap();
//! ```

pub mod worker;

pub use worker::PipelineWorker;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::thread::JoinHandle;

use crate::config::ConnectionConfig;
use crate::error::{Result, StreamVisError};
use crate::extractor::FrameExtractor;
use crate::types::BusType;

/// Capacity of the raw-chunk channel; feeding blocks when the worker lags
const CHUNK_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the result channel; messages beyond it are counted as dropped
const MESSAGE_CHANNEL_CAPACITY: usize = 4096;

/// Control message sent to the pipeline worker
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Replace the stream configuration; extraction state is reset
    Reconfigure(ConnectionConfig),
    /// Discard buffered extraction state without emitting a partial frame
    ClearBuffer,
    /// Stop the worker loop
    Shutdown,
}

/// Result message sent from the pipeline worker
#[derive(Debug, Clone)]
pub enum PipelineMessage {
    /// A frame was extracted and decoded
    FrameDecoded {
        /// Extractor-assigned sequence number, monotonic per session
        sequence: u64,
        /// Transport the frame originated from
        bus: BusType,
        /// Decoded payload text
        text: String,
    },
    /// A frame was extracted but its payload failed to decode; it is
    /// skipped and streaming continues
    DecodeFailed {
        /// Sequence number of the skipped frame
        sequence: u64,
        /// Human-readable decode error
        error: String,
    },
    /// The accumulation buffer overflowed and a partial frame was discarded
    BufferOverflow {
        /// Bytes discarded by this overflow event
        discarded_bytes: u64,
    },
    /// A mid-stream reconfiguration was rejected; the old configuration
    /// stays active
    ConfigRejected {
        /// Why the configuration failed validation
        error: String,
    },
    /// Periodic activity snapshot
    Stats(PipelineStats),
}

/// Snapshot of pipeline activity since the session began
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// Total bytes received from the transport
    pub bytes_ingested: u64,
    /// Frames decoded successfully
    pub frames_decoded: u64,
    /// Frames skipped due to decode failures
    pub decode_failures: u64,
    /// Buffer overflow events
    pub overflows: u64,
    /// Result messages dropped due to a full channel
    pub dropped_messages: u64,
    /// Bytes currently buffered awaiting a delimiter
    pub pending_bytes: usize,
}

/// Caller-side handle to a running pipeline
///
/// The transport side calls [`feed`](Self::feed); the rendering side calls
/// [`drain`](Self::drain). Both ends may live on different threads.
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    command_tx: Sender<PipelineCommand>,
    chunk_tx: Sender<Vec<u8>>,
    message_rx: Receiver<PipelineMessage>,
}

impl PipelineHandle {
    /// Feed a raw chunk from the transport; blocks if the worker is behind
    pub fn feed(&self, chunk: Vec<u8>) -> Result<()> {
        self.chunk_tx
            .send(chunk)
            .map_err(|_| StreamVisError::Channel("pipeline worker is gone".to_string()))
    }

    /// Try to feed a raw chunk without blocking
    ///
    /// Returns the chunk back if the channel is full, so the transport can
    /// apply its own backpressure policy.
    pub fn try_feed(&self, chunk: Vec<u8>) -> std::result::Result<(), Vec<u8>> {
        self.chunk_tx.try_send(chunk).map_err(|e| match e {
            TrySendError::Full(chunk) | TrySendError::Disconnected(chunk) => chunk,
        })
    }

    /// Replace the stream configuration
    pub fn reconfigure(&self, config: ConnectionConfig) -> Result<()> {
        self.send_command(PipelineCommand::Reconfigure(config))
    }

    /// Discard buffered extraction state
    pub fn clear_buffer(&self) -> Result<()> {
        self.send_command(PipelineCommand::ClearBuffer)
    }

    /// Ask the worker to stop; already-queued chunks are processed first
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(PipelineCommand::Shutdown);
    }

    /// Drain all currently available messages without blocking
    pub fn drain(&self) -> Vec<PipelineMessage> {
        self.message_rx.try_iter().collect()
    }

    /// Block until the next message arrives, or the worker is gone
    pub fn recv(&self) -> Result<PipelineMessage> {
        self.message_rx
            .recv()
            .map_err(|_| StreamVisError::Channel("pipeline worker is gone".to_string()))
    }

    fn send_command(&self, command: PipelineCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| StreamVisError::Channel("pipeline worker is gone".to_string()))
    }
}

/// Entry point for spawning the stream-processing worker thread
pub struct StreamPipeline;

impl StreamPipeline {
    /// Validate the configuration and spawn the worker thread
    ///
    /// Configuration errors surface here, before any streaming begins.
    pub fn spawn(config: ConnectionConfig) -> Result<(PipelineHandle, JoinHandle<()>)> {
        let extractor = FrameExtractor::new(&config)?;

        let (command_tx, command_rx) = bounded(16);
        let (chunk_tx, chunk_rx) = bounded(CHUNK_CHANNEL_CAPACITY);
        let (message_tx, message_rx) = bounded(MESSAGE_CHANNEL_CAPACITY);

        let mut worker = PipelineWorker::new(config, extractor, command_rx, chunk_rx, message_tx);
        let join = std::thread::Builder::new()
            .name("streamvis-pipeline".to_string())
            .spawn(move || worker.run())
            .map_err(|e| StreamVisError::Channel(format!("failed to spawn worker: {e}")))?;

        Ok((
            PipelineHandle {
                command_tx,
                chunk_tx,
                message_rx,
            },
            join,
        ))
    }
}

//! Pipeline worker loop
//!
//! The worker runs on its own thread and is the single writer driving the
//! frame extractor. Each received chunk is pushed through extraction, the
//! completed frames are decoded in arrival order, and one message is
//! emitted per outcome. Sequence numbers assigned by the extractor ride
//! along so a consumer can verify ordering.
//!
//! The loop never blocks indefinitely on results: if the message channel
//! fills up, messages are dropped and counted rather than stalling the
//! transport side. Overflow and decode failures always produce at least a
//! counter increment plus a log event.

use crossbeam_channel::{select, Receiver, Sender, TrySendError};
use std::time::{Duration, Instant};

use crate::config::ConnectionConfig;
use crate::decoder;
use crate::extractor::FrameExtractor;
use crate::pipeline::{PipelineCommand, PipelineMessage, PipelineStats};
use crate::types::Frame;

/// How often the worker publishes a stats snapshot
const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// The worker that runs the extraction/decoding loop
pub struct PipelineWorker {
    config: ConnectionConfig,
    extractor: FrameExtractor,
    command_rx: Receiver<PipelineCommand>,
    chunk_rx: Receiver<Vec<u8>>,
    message_tx: Sender<PipelineMessage>,
    stats: PipelineStats,
    reported_overflows: u64,
    last_stats_publish: Instant,
}

impl PipelineWorker {
    /// Create a worker; the extractor must match the configuration
    pub fn new(
        config: ConnectionConfig,
        extractor: FrameExtractor,
        command_rx: Receiver<PipelineCommand>,
        chunk_rx: Receiver<Vec<u8>>,
        message_tx: Sender<PipelineMessage>,
    ) -> Self {
        Self {
            config,
            extractor,
            command_rx,
            chunk_rx,
            message_tx,
            stats: PipelineStats::default(),
            reported_overflows: 0,
            last_stats_publish: Instant::now(),
        }
    }

    /// Run the worker loop until shutdown or channel disconnect
    pub fn run(&mut self) {
        tracing::info!(
            detection = %self.config.frame_detection,
            decoder = %self.config.decoder_method,
            "pipeline worker started"
        );

        loop {
            select! {
                recv(self.command_rx) -> command => {
                    match command {
                        Ok(PipelineCommand::Shutdown) | Err(_) => {
                            self.drain_pending_chunks();
                            break;
                        }
                        Ok(command) => self.handle_command(command),
                    }
                }
                recv(self.chunk_rx) -> chunk => {
                    match chunk {
                        Ok(chunk) => self.handle_chunk(&chunk),
                        // Transport is gone; keep serving commands until
                        // the handle side also drops.
                        Err(_) => {
                            match self.command_rx.recv() {
                                Ok(PipelineCommand::Shutdown) | Err(_) => break,
                                Ok(command) => self.handle_command(command),
                            }
                        }
                    }
                }
            }

            if self.last_stats_publish.elapsed() >= STATS_INTERVAL {
                self.publish_stats();
            }
        }

        self.publish_stats();
        tracing::info!("pipeline worker stopped");
    }

    /// Process chunks already queued at shutdown so no fed data is lost
    fn drain_pending_chunks(&mut self) {
        let pending: Vec<Vec<u8>> = self.chunk_rx.try_iter().collect();
        for chunk in pending {
            self.handle_chunk(&chunk);
        }
    }

    fn handle_command(&mut self, command: PipelineCommand) {
        match command {
            PipelineCommand::Reconfigure(config) => match FrameExtractor::new(&config) {
                Ok(extractor) => {
                    tracing::info!(
                        detection = %config.frame_detection,
                        decoder = %config.decoder_method,
                        "pipeline reconfigured"
                    );
                    self.extractor = extractor;
                    self.config = config;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rejected invalid reconfiguration");
                    self.send(PipelineMessage::ConfigRejected {
                        error: e.to_string(),
                    });
                }
            },
            PipelineCommand::ClearBuffer => self.extractor.reset(),
            // Shutdown is handled in the select loop
            PipelineCommand::Shutdown => {}
        }
    }

    fn handle_chunk(&mut self, chunk: &[u8]) {
        let frames = self.extractor.push(chunk);
        self.stats.bytes_ingested += chunk.len() as u64;

        for frame in frames {
            self.decode_and_publish(frame);
        }

        // Surface overflow events recorded by the extractor during this push
        let extractor_stats = self.extractor.stats();
        if extractor_stats.overflows > self.reported_overflows {
            self.stats.overflows = extractor_stats.overflows;
            self.reported_overflows = extractor_stats.overflows;
            self.send(PipelineMessage::BufferOverflow {
                discarded_bytes: extractor_stats.discarded_bytes,
            });
        }
    }

    fn decode_and_publish(&mut self, frame: Frame) {
        match decoder::decode(&frame.bytes, self.config.decoder_method) {
            Ok(text) => {
                self.stats.frames_decoded += 1;
                self.send(PipelineMessage::FrameDecoded {
                    sequence: frame.sequence,
                    bus: frame.bus,
                    text,
                });
            }
            Err(e) => {
                self.stats.decode_failures += 1;
                tracing::debug!(sequence = frame.sequence, error = %e, "frame skipped");
                self.send(PipelineMessage::DecodeFailed {
                    sequence: frame.sequence,
                    error: e.to_string(),
                });
            }
        }
    }

    fn publish_stats(&mut self) {
        self.stats.pending_bytes = self.extractor.pending_bytes();
        self.last_stats_publish = Instant::now();
        self.send(PipelineMessage::Stats(self.stats));
    }

    /// Send without blocking; a full channel drops the message and counts it
    fn send(&mut self, message: PipelineMessage) {
        match self.message_tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.stats.dropped_messages += 1;
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

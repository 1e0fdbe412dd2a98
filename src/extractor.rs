//! Streaming frame extraction
//!
//! [`FrameExtractor`] is the one stateful, sequential component of the
//! pipeline: it consumes arbitrarily-chunked byte input and produces the
//! discrete frames delimited within it. Partial frames (and partial
//! delimiters) are buffered across calls, so the emitted frame sequence
//! never depends on how the transport happened to chunk the stream.
//!
//! The extractor must be driven by a single logical writer; it is owned by
//! whichever task currently services the connection (see
//! [`crate::pipeline`]) and is not shared. Cancellation is external:
//! dropping or [`reset`](FrameExtractor::reset)ting the extractor discards
//! buffered state without emitting a partial frame.
//!
//! # Buffer bound
//!
//! Accumulation is bounded by the configured `max_frame_size`. When a
//! delimiter never arrives, the buffered partial frame is discarded once
//! the bound is crossed, scanning resumes from a clean state, and the event
//! is counted in [`ExtractorStats`]. No frame larger than the bound is
//! ever emitted. For end-delimiter streams the
//! bytes between an overflow and the next delimiter surface as a truncated
//! frame; consumers that observe the overflow event may drop it.

use memchr::memmem;

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::types::{BusType, Frame, FrameDetection};

/// Counters describing an extractor's activity
///
/// All counters are cumulative for the life of the extractor and survive
/// [`FrameExtractor::reset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractorStats {
    /// Total bytes pushed into the extractor
    pub bytes_ingested: u64,
    /// Frames emitted
    pub frames_emitted: u64,
    /// Overflow events (partial frame discarded)
    pub overflows: u64,
    /// Bytes discarded by overflow events
    pub discarded_bytes: u64,
    /// Out-of-frame bytes skipped (before a start delimiter)
    pub skipped_bytes: u64,
}

/// Streaming state machine turning chunked bytes into discrete frames
///
/// Construction validates the configuration; a bad delimiter setup fails
/// here, before any streaming begins, never per-frame.
#[derive(Debug)]
pub struct FrameExtractor {
    detection: FrameDetection,
    start: Vec<u8>,
    finish: Vec<u8>,
    max_frame_size: usize,
    bus: BusType,
    buffer: Vec<u8>,
    next_sequence: u64,
    stats: ExtractorStats,
}

impl FrameExtractor {
    /// Create an extractor for the given connection configuration
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detection: config.frame_detection,
            start: config.start_bytes().to_vec(),
            finish: config.finish_bytes().to_vec(),
            max_frame_size: config.max_frame_size,
            bus: config.bus_type,
            buffer: Vec::with_capacity(1024),
            next_sequence: 0,
            stats: ExtractorStats::default(),
        })
    }

    /// Ingest a chunk and return any frames completed by it
    ///
    /// Bytes that do not yet belong to a complete frame are retained for
    /// the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.stats.bytes_ingested += chunk.len() as u64;

        match self.detection {
            FrameDetection::NoDelimiters => self.push_undelimited(chunk),
            FrameDetection::EndDelimiterOnly => {
                self.buffer.extend_from_slice(chunk);
                let frames = self.extract_end_delimited();
                self.enforce_buffer_bound();
                frames
            }
            FrameDetection::StartAndEndDelimiter => {
                self.buffer.extend_from_slice(chunk);
                let frames = self.extract_start_end_delimited();
                self.enforce_buffer_bound();
                frames
            }
        }
    }

    /// Discard all buffered state without emitting a partial frame
    ///
    /// Used on transport teardown or reconfiguration. Sequence numbers and
    /// statistics are preserved; a new session gets a new extractor.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Activity counters
    pub fn stats(&self) -> ExtractorStats {
        self.stats
    }

    /// Bytes currently buffered awaiting a delimiter
    pub fn pending_bytes(&self) -> usize {
        self.buffer.len()
    }

    fn push_undelimited(&mut self, chunk: &[u8]) -> Vec<Frame> {
        if chunk.is_empty() {
            return Vec::new();
        }
        if chunk.len() > self.max_frame_size {
            self.record_overflow(chunk.len());
            return Vec::new();
        }
        vec![self.emit(chunk.to_vec())]
    }

    fn extract_end_delimited(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut consumed = 0;

        while let Some(rel) = memmem::find(&self.buffer[consumed..], &self.finish) {
            let end = consumed + rel;
            if end > consumed {
                let payload = self.buffer[consumed..end].to_vec();
                if let Some(frame) = self.emit_bounded(payload) {
                    frames.push(frame);
                }
            }
            consumed = end + self.finish.len();
        }

        if consumed > 0 {
            self.buffer.drain(..consumed);
        }
        frames
    }

    fn extract_start_end_delimited(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut cursor = 0;

        loop {
            let Some(rel) = memmem::find(&self.buffer[cursor..], &self.start) else {
                // No start delimiter in the window: everything except a
                // possible partial-start suffix is out-of-frame noise.
                let window = self.buffer.len() - cursor;
                let keep = partial_suffix_len(&self.buffer[cursor..], &self.start);
                self.stats.skipped_bytes += (window - keep) as u64;
                cursor = self.buffer.len() - keep;
                break;
            };

            let start_pos = cursor + rel;
            self.stats.skipped_bytes += (start_pos - cursor) as u64;
            let content_begin = start_pos + self.start.len();

            let Some(rel_end) = memmem::find(&self.buffer[content_begin..], &self.finish) else {
                // Start seen, end not yet: retain from the start delimiter.
                cursor = start_pos;
                break;
            };
            let end_pos = content_begin + rel_end;

            // Last-start-wins: an orphaned start delimiter inside the
            // candidate resets accumulation to the later occurrence.
            let content = &self.buffer[content_begin..end_pos];
            let payload_begin = match memmem::rfind(content, &self.start) {
                Some(inner) => {
                    self.stats.skipped_bytes += (inner + self.start.len()) as u64;
                    content_begin + inner + self.start.len()
                }
                None => content_begin,
            };

            if end_pos > payload_begin {
                let payload = self.buffer[payload_begin..end_pos].to_vec();
                if let Some(frame) = self.emit_bounded(payload) {
                    frames.push(frame);
                }
            }
            cursor = end_pos + self.finish.len();
        }

        if cursor > 0 {
            self.buffer.drain(..cursor);
        }
        frames
    }

    fn emit(&mut self, payload: Vec<u8>) -> Frame {
        let frame = Frame::new(payload, self.bus, self.next_sequence);
        self.next_sequence += 1;
        self.stats.frames_emitted += 1;
        frame
    }

    /// Emit unless the payload breaches the frame bound
    fn emit_bounded(&mut self, payload: Vec<u8>) -> Option<Frame> {
        if payload.len() > self.max_frame_size {
            self.record_overflow(payload.len());
            return None;
        }
        Some(self.emit(payload))
    }

    /// Discard the retained buffer if an unterminated frame outgrew the bound
    ///
    /// A small slack for the delimiters themselves keeps the check
    /// independent of where chunk boundaries fall within a delimiter.
    fn enforce_buffer_bound(&mut self) {
        let bound = self.max_frame_size + self.start.len() + self.finish.len();
        if self.buffer.len() > bound {
            let dropped = self.buffer.len();
            self.buffer.clear();
            self.record_overflow(dropped);
        }
    }

    fn record_overflow(&mut self, dropped: usize) {
        self.stats.overflows += 1;
        self.stats.discarded_bytes += dropped as u64;
        tracing::warn!(
            dropped_bytes = dropped,
            limit = self.max_frame_size,
            "frame buffer overflow, discarding partial frame"
        );
    }
}

/// Length of the longest proper prefix of `needle` that `haystack` ends with
fn partial_suffix_len(haystack: &[u8], needle: &[u8]) -> usize {
    let longest = needle.len().saturating_sub(1).min(haystack.len());
    for k in (1..=longest).rev() {
        if haystack[haystack.len() - k..] == needle[..k] {
            return k;
        }
    }
    0
}

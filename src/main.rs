//! StreamVis console runner - Main Entry Point
//!
//! Feeds standard input through the stream-processing pipeline and prints
//! one line per decoded frame. Useful for exercising a project's frame
//! configuration without a dashboard attached:
//!
//! ```text
//! cat capture.bin | streamvis-rs telemetry.svproj
//! ```

use std::io::Read;

use streamvis_rs::config::{ConnectionConfig, ProjectFile};
use streamvis_rs::pipeline::{PipelineMessage, StreamPipeline};
use streamvis_rs::sys;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> streamvis_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,streamvis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    sys::warn_if_elevated();

    // Use the project's connection settings when one is given, otherwise
    // quick-plot defaults (newline-framed plain text)
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading project");
            ProjectFile::load(&path)?.connection
        }
        None => ConnectionConfig::default(),
    };

    let (handle, worker) = StreamPipeline::spawn(config)?;

    // Transport side: read stdin chunks on a separate thread
    let feeder = {
        let handle = handle.clone();
        std::thread::spawn(move || {
            let mut stdin = std::io::stdin().lock();
            let mut buf = [0u8; 4096];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if handle.feed(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
            handle.shutdown();
        })
    };

    // Rendering side: print decoded frames as they arrive
    while let Ok(message) = handle.recv() {
        match message {
            PipelineMessage::FrameDecoded { sequence, text, .. } => {
                println!("{sequence}\t{text}");
            }
            PipelineMessage::DecodeFailed { sequence, error } => {
                tracing::warn!(sequence, %error, "frame skipped");
            }
            PipelineMessage::BufferOverflow { discarded_bytes } => {
                tracing::warn!(discarded_bytes, "buffer overflow");
            }
            PipelineMessage::ConfigRejected { error } => {
                tracing::error!(%error, "configuration rejected");
            }
            PipelineMessage::Stats(stats) => {
                tracing::debug!(
                    frames = stats.frames_decoded,
                    failures = stats.decode_failures,
                    "pipeline stats"
                );
            }
        }
    }

    feeder.join().expect("stdin feeder thread panicked");
    worker.join().expect("pipeline worker thread panicked");
    Ok(())
}

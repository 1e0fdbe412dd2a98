//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use streamvis_rs::extractor::FrameExtractor;
use streamvis_rs::types::Frame;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Split `data` at the given cut points (clamped, sorted, deduplicated)
pub fn split_at_cuts(data: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut points: Vec<usize> = cuts.iter().map(|&c| c.min(data.len())).collect();
    points.push(0);
    points.push(data.len());
    points.sort_unstable();
    points.dedup();

    points
        .windows(2)
        .map(|w| data[w[0]..w[1]].to_vec())
        .collect()
}

/// Push every chunk through the extractor and collect all emitted frames
pub fn collect_frames(extractor: &mut FrameExtractor, chunks: &[Vec<u8>]) -> Vec<Frame> {
    chunks
        .iter()
        .flat_map(|chunk| extractor.push(chunk))
        .collect()
}

/// Extract just the payload bytes from a frame list
pub fn frame_payloads(frames: &[Frame]) -> Vec<Vec<u8>> {
    frames.iter().map(|f| f.bytes.clone()).collect()
}

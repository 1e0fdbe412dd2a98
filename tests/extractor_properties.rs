//! Property tests for the extraction and decoding core
//!
//! The central correctness property lives here: frame boundaries must
//! never depend on how the transport chunked the byte stream.

mod common;

use proptest::prelude::*;

use common::{collect_frames, frame_payloads, split_at_cuts};
use streamvis_rs::config::ConnectionConfig;
use streamvis_rs::dashboard;
use streamvis_rs::decoder;
use streamvis_rs::extractor::FrameExtractor;
use streamvis_rs::model::Dataset;
use streamvis_rs::types::{DatasetOptions, DecoderMethod, FrameDetection};

fn end_delimited(finish: &str) -> FrameExtractor {
    FrameExtractor::new(&ConnectionConfig::default().with_finish_sequence(finish)).unwrap()
}

fn start_end_delimited(start: &str, finish: &str) -> FrameExtractor {
    FrameExtractor::new(
        &ConnectionConfig::default()
            .with_frame_detection(FrameDetection::StartAndEndDelimiter)
            .with_start_sequence(start)
            .with_finish_sequence(finish),
    )
    .unwrap()
}

proptest! {
    /// Chunk-boundary independence, end-delimiter mode, single-byte delimiter
    #[test]
    fn chunking_is_irrelevant_end_delimiter(
        data in prop::collection::vec(any::<u8>(), 0..512),
        cuts in prop::collection::vec(0usize..512, 0..8),
    ) {
        let whole = collect_frames(&mut end_delimited("\n"), &[data.clone()]);
        let chunked = collect_frames(&mut end_delimited("\n"), &split_at_cuts(&data, &cuts));
        prop_assert_eq!(frame_payloads(&whole), frame_payloads(&chunked));
    }

    /// Chunk-boundary independence with a multi-byte delimiter that the
    /// cut points can split
    #[test]
    fn chunking_is_irrelevant_multibyte_delimiter(
        pieces in prop::collection::vec(
            prop::sample::select(vec![
                b"data".to_vec(), b"\r".to_vec(), b"\n".to_vec(),
                b"\r\n".to_vec(), b"x\r\nx".to_vec(),
            ]),
            0..24,
        ),
        cuts in prop::collection::vec(0usize..128, 0..8),
    ) {
        let data: Vec<u8> = pieces.concat();
        let whole = collect_frames(&mut end_delimited("\r\n"), &[data.clone()]);
        let chunked = collect_frames(&mut end_delimited("\r\n"), &split_at_cuts(&data, &cuts));
        prop_assert_eq!(frame_payloads(&whole), frame_payloads(&chunked));
    }

    /// Chunk-boundary independence, start+end mode, delimiter-rich input
    #[test]
    fn chunking_is_irrelevant_start_end(
        data in prop::collection::vec(
            prop::sample::select(vec![b'a', b'b', b'<', b'>', b',']),
            0..256,
        ),
        cuts in prop::collection::vec(0usize..256, 0..8),
    ) {
        let whole = collect_frames(&mut start_end_delimited("<", ">"), &[data.clone()]);
        let chunked =
            collect_frames(&mut start_end_delimited("<", ">"), &split_at_cuts(&data, &cuts));
        prop_assert_eq!(frame_payloads(&whole), frame_payloads(&chunked));
    }

    /// Round-trip law: decode(encode(x)) is the identity for printable text
    #[test]
    fn encode_decode_round_trip(text in "[ -~]{0,128}") {
        for &method in &[DecoderMethod::Hexadecimal, DecoderMethod::Base64] {
            let encoded = decoder::encode(text.as_bytes(), method);
            let decoded = decoder::decode(&encoded, method).unwrap();
            prop_assert_eq!(&decoded, &text);
        }
    }

    /// Widget list order is fixed by enumeration order, not flag bit order
    #[test]
    fn dataset_widget_order_is_deterministic(bits in 0u8..=0b0011_1111) {
        let dataset = Dataset::new("ch", 0).with_options(DatasetOptions::from_bits(bits));
        let widgets = dashboard::get_dashboard_widgets(&dataset);

        let expected_len = bits.count_ones() as usize;
        prop_assert_eq!(widgets.len(), expected_len);

        // Recomputing from the same dataset always yields the same order
        prop_assert_eq!(widgets.clone(), dashboard::get_dashboard_widgets(&dataset));

        // Every listed widget classifies as dataset-level
        for widget in widgets {
            prop_assert!(dashboard::is_dataset_widget(widget));
        }
    }

    /// Palette lookup wraps modulo the palette size
    #[test]
    fn dataset_color_wraps(index in 0usize..10_000) {
        let size = dashboard::dataset_palette_size();
        prop_assert_eq!(
            dashboard::dataset_color(index),
            dashboard::dataset_color(index + size)
        );
    }
}

#[test]
fn extractor_state_survives_pathological_chunking() {
    // Byte-at-a-time delivery of a start+end stream with noise
    let mut extractor = start_end_delimited("<<", ">>");
    let stream = b"noise<<frame-one>>more<<fra<<frame-two>>";
    let mut frames = Vec::new();
    for &b in stream.iter() {
        frames.extend(extractor.push(&[b]));
    }
    let payloads = frame_payloads(&frames);
    assert_eq!(payloads, vec![b"frame-one".to_vec(), b"frame-two".to_vec()]);
}

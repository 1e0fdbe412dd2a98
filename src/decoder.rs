//! Frame payload decoding
//!
//! Pure byte-to-text transforms, dispatched on [`DecoderMethod`]. Decoding
//! has no side effects and no state, so independent frames may be decoded
//! concurrently from any number of threads.
//!
//! Plain text never fails: invalid UTF-8 sequences are mapped to the
//! replacement character. Hexadecimal and Base64 validate their input and
//! fail with [`StreamVisError::Decode`] on malformed payloads; the caller
//! skips the offending frame and continues with the next one.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::{Result, StreamVisError};
use crate::types::DecoderMethod;

/// Decode one frame payload into text under the given method
///
/// Hexadecimal and Base64 payloads may contain ASCII whitespace (serial
/// consoles commonly space- or newline-separate encoded output); it is
/// stripped before validation. Validation is strict otherwise: an odd
/// number of hex digits, a non-hex character, or malformed Base64
/// padding/alphabet all fail the frame.
pub fn decode(bytes: &[u8], method: DecoderMethod) -> Result<String> {
    match method {
        DecoderMethod::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DecoderMethod::Hexadecimal => {
            let compact = strip_ascii_whitespace(bytes);
            let decoded = hex::decode(&compact)
                .map_err(|e| StreamVisError::Decode(format!("invalid hexadecimal payload: {e}")))?;
            Ok(String::from_utf8_lossy(&decoded).into_owned())
        }
        DecoderMethod::Base64 => {
            let compact = strip_ascii_whitespace(bytes);
            let decoded = BASE64_STANDARD
                .decode(&compact)
                .map_err(|e| StreamVisError::Decode(format!("invalid Base64 payload: {e}")))?;
            Ok(String::from_utf8_lossy(&decoded).into_owned())
        }
    }
}

/// Encode raw bytes under the given method
///
/// Inverse of [`decode`] for valid inputs; used by the transmit path and by
/// the round-trip tests.
pub fn encode(bytes: &[u8], method: DecoderMethod) -> Vec<u8> {
    match method {
        DecoderMethod::PlainText => bytes.to_vec(),
        DecoderMethod::Hexadecimal => hex::encode(bytes).into_bytes(),
        DecoderMethod::Base64 => BASE64_STANDARD.encode(bytes).into_bytes(),
    }
}

fn strip_ascii_whitespace(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect()
}

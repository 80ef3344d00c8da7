//! Raw DEFLATE (RFC 1951) compression of the dataset body via flate2.

use std::io::{Read, Write};

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};

use crate::error::Error;
use crate::limits::MAX_COMPRESSION_LEVEL;

/// Compresses `input` into a single raw DEFLATE stream.
///
/// Levels above 9 are clamped. An empty result is treated as a failure.
pub fn compress(input: &[u8], level: u32) -> Result<Vec<u8>, Error> {
    let level = Compression::new(level.min(MAX_COMPRESSION_LEVEL));
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(input.len() / 2 + 64), level);
    encoder
        .write_all(input)
        .map_err(|e| Error::write(format!("compression failed: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::write(format!("compression failed: {e}")))?;

    if compressed.is_empty() {
        return Err(Error::write("compressor produced no output"));
    }
    Ok(compressed)
}

/// Decompresses a raw DEFLATE stream that must expand to exactly `exact_len` bytes.
///
/// Malformed streams and streams that expand to fewer or more bytes than
/// expected are reported as [`Error::CorruptFile`].
pub fn decompress(input: &[u8], exact_len: usize) -> Result<Vec<u8>, Error> {
    let decoder = DeflateDecoder::new(input);
    // Read one byte past the expected size to detect oversized output.
    let mut limited = decoder.take((exact_len as u64).saturating_add(1));

    // DEFLATE expands by at most ~1032:1.
    let hint = exact_len.min(input.len().saturating_mul(1032));
    let mut output = Vec::with_capacity(hint);
    limited
        .read_to_end(&mut output)
        .map_err(|e| Error::corrupt(format!("decompression failed: {e}")))?;

    if output.len() != exact_len {
        return Err(Error::corrupt(format!(
            "body decompressed to {} bytes (expected {exact_len})",
            output.len()
        )));
    }
    Ok(output)
}

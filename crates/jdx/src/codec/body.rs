//! Compression framing for the JDX dataset body.
//!
//! The uncompressed body is `item_count` consecutive records, each holding
//! `image_size` bytes of pixel data followed by a little-endian u16 label
//! index. The whole body is compressed as a single raw DEFLATE stream.

use std::io::Read;

use tracing::debug;

use crate::codec::deflate::{compress, decompress};
use crate::codec::endian::{decode_int, encode_int};
use crate::error::Error;
use crate::limits::LABEL_INDEX_WIDTH;
use crate::model::{Header, Item};

/// Upper bound on the buffer reserved before any body bytes arrive.
const READ_CAPACITY_HINT: usize = 64 * 1024;

// =============================================================================
// ENCODING
// =============================================================================

/// Concatenates `items` into records and compresses them.
///
/// Returns the compressed body; its length is the header's `compressed_size`.
pub fn encode_body(header: &Header, items: &[Item], level: u32) -> Result<Vec<u8>, Error> {
    let image_size = header.image_size();
    let total = items
        .len()
        .checked_mul(header.item_size())
        .ok_or_else(|| Error::write("uncompressed body size overflows"))?;

    let mut body = Vec::with_capacity(total);
    let mut label_bytes = [0u8; LABEL_INDEX_WIDTH];
    for (index, item) in items.iter().enumerate() {
        if item.data.len() != image_size {
            return Err(Error::write(format!(
                "item {index} holds {} bytes of image data (expected {image_size})",
                item.data.len()
            )));
        }
        body.extend_from_slice(&item.data);
        encode_int(item.label, &mut label_bytes);
        body.extend_from_slice(&label_bytes);
    }

    let compressed = compress(&body, level)?;
    debug!(
        items = items.len(),
        uncompressed = body.len(),
        compressed = compressed.len(),
        "Encoded body"
    );
    Ok(compressed)
}

// =============================================================================
// DECODING
// =============================================================================

/// Reads and decompresses the body described by `header`, splitting it into items.
///
/// Declared sizes above `max_body_size` are rejected as corrupt. Memory is
/// only committed as body bytes are actually read, so a header declaring a
/// body the stream does not contain fails with [`Error::ReadFile`]. Every
/// item's label index is checked against the header's dictionary.
pub fn decode_body<R: Read + ?Sized>(
    header: &Header,
    reader: &mut R,
    max_body_size: u64,
) -> Result<Vec<Item>, Error> {
    if header.compressed_size > max_body_size {
        return Err(Error::corrupt(format!(
            "compressed body size {} exceeds limit {max_body_size}",
            header.compressed_size
        )));
    }

    let item_size = header.item_size();
    let uncompressed_size = header
        .item_count
        .checked_mul(item_size as u64)
        .filter(|&size| size <= max_body_size)
        .and_then(|size| usize::try_from(size).ok())
        .ok_or_else(|| {
            Error::corrupt(format!(
                "{} items of {item_size} bytes exceed the body size limit {max_body_size}",
                header.item_count
            ))
        })?;
    let compressed_size = usize::try_from(header.compressed_size)
        .map_err(|_| Error::corrupt("compressed body size does not fit in memory"))?;

    // Grow with the bytes actually present, never with the declared size.
    let mut compressed = Vec::with_capacity(compressed_size.min(READ_CAPACITY_HINT));
    reader
        .take(header.compressed_size)
        .read_to_end(&mut compressed)
        .map_err(|_| Error::ReadFile {
            context: "compressed body",
        })?;
    if compressed.len() != compressed_size {
        return Err(Error::ReadFile {
            context: "compressed body",
        });
    }

    let body = decompress(&compressed, uncompressed_size)?;
    drop(compressed);

    let image_size = header.image_size();
    let label_count = header.labels.len();
    let mut items = Vec::with_capacity(body.len() / item_size);
    // item_size >= LABEL_INDEX_WIDTH, so chunks_exact never sees zero.
    for (index, record) in body.chunks_exact(item_size).enumerate() {
        let (data, label_bytes) = record.split_at(image_size);
        let label: u16 = decode_int(label_bytes);
        if label as usize >= label_count {
            return Err(Error::corrupt(format!(
                "item {index} has label {label} but the dictionary has {label_count} entries"
            )));
        }
        items.push(Item::new(data.to_vec(), label));
    }

    debug!(
        items = items.len(),
        compressed = compressed_size,
        uncompressed = uncompressed_size,
        "Decoded body"
    );
    Ok(items)
}

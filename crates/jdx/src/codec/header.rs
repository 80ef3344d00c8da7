//! Header encoding/decoding for the JDX binary format.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! "JDX" | major u8 | minor u8 | patch u8 | build_type u8
//!       | width u16 | height u16 | bit_depth u8 | label_count u16
//!       | label_count x (label bytes, NUL)
//!       | item_count u64 | compressed_size u64
//! ```

use std::io::{Read, Write};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::codec::endian::{read_int, write_int};
use crate::error::{Error, ValidationError};
use crate::limits::{MAGIC, MAX_LABEL_LEN};
use crate::model::{BuildType, Header, Version};
use crate::validate::{validate_bit_depth, validate_header};

// =============================================================================
// DECODING
// =============================================================================

/// Reads a header from a stream positioned at the start of a JDX file.
///
/// On success the stream is left at the first byte of the compressed body.
/// Nothing partial is returned on failure.
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<Header, Error> {
    let mut magic = [0u8; 3];
    reader
        .read_exact(&mut magic)
        .map_err(|_| Error::ReadFile { context: "magic" })?;
    if &magic != MAGIC {
        return Err(Error::corrupt(format!(
            "invalid magic bytes: expected {MAGIC:?}, found {magic:?}"
        )));
    }

    let major = read_int::<u8, _>(reader, "version")?;
    let minor = read_int::<u8, _>(reader, "version")?;
    let patch = read_int::<u8, _>(reader, "version")?;
    let build_type = read_int::<u8, _>(reader, "version")?;

    let image_width = read_int::<u16, _>(reader, "image_width")?;
    let image_height = read_int::<u16, _>(reader, "image_height")?;
    let bit_depth = read_int::<u8, _>(reader, "bit_depth")?;
    let label_count = read_int::<u16, _>(reader, "label_count")?;

    let labels = read_labels(reader, label_count as usize)?;

    let item_count = read_int::<u64, _>(reader, "item_count")?;
    let compressed_size = read_int::<u64, _>(reader, "compressed_size")?;

    validate_bit_depth(bit_depth)?;
    let build_type = BuildType::from_u8(build_type)
        .ok_or(ValidationError::InvalidBuildType { build_type })?;

    let header = Header {
        version: Version::new(major, minor, patch, build_type),
        image_width,
        image_height,
        bit_depth,
        labels,
        item_count,
        compressed_size,
    };

    debug!(
        version = %header.version,
        width = header.image_width,
        height = header.image_height,
        bit_depth = header.bit_depth,
        labels = header.labels.len(),
        items = header.item_count,
        "Read header"
    );

    Ok(header)
}

/// Reads `count` NUL-terminated labels, rejecting duplicates.
fn read_labels<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<Vec<String>, Error> {
    let mut labels = Vec::with_capacity(count);
    let mut seen = FxHashSet::with_capacity_and_hasher(count, Default::default());

    for index in 0..count {
        let label = read_label(reader, index)?;
        if !seen.insert(label.clone()) {
            return Err(ValidationError::DuplicateLabel { label }.into());
        }
        labels.push(label);
    }

    Ok(labels)
}

/// Reads one label, scanning at most `MAX_LABEL_LEN` bytes for its terminator.
fn read_label<R: Read + ?Sized>(reader: &mut R, index: usize) -> Result<String, Error> {
    let mut bytes = Vec::new();

    loop {
        if bytes.len() == MAX_LABEL_LEN {
            return Err(Error::corrupt(format!(
                "label {index} is not terminated within {MAX_LABEL_LEN} bytes"
            )));
        }
        let byte = read_int::<u8, _>(reader, "label")?;
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }

    if bytes.is_empty() {
        return Err(ValidationError::EmptyLabel { index }.into());
    }
    String::from_utf8(bytes)
        .map_err(|_| Error::corrupt(format!("label {index} is not valid UTF-8")))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writes a header and flushes the stream.
///
/// The header is validated first; an invalid header fails with
/// [`Error::WriteFile`] before any byte is written.
pub fn write_header<W: Write + ?Sized>(header: &Header, writer: &mut W) -> Result<(), Error> {
    validate_header(header).map_err(|e| Error::write(e.to_string()))?;

    writer
        .write_all(MAGIC)
        .map_err(|e| Error::write(format!("magic: {e}")))?;

    let version = &header.version;
    write_int(writer, version.major, "version")?;
    write_int(writer, version.minor, "version")?;
    write_int(writer, version.patch, "version")?;
    write_int(writer, version.build_type.as_u8(), "version")?;

    write_int(writer, header.image_width, "image_width")?;
    write_int(writer, header.image_height, "image_height")?;
    write_int(writer, header.bit_depth, "bit_depth")?;
    // Fits: validate_header bounds the label count.
    write_int(writer, header.labels.len() as u16, "label_count")?;

    for label in &header.labels {
        writer
            .write_all(label.as_bytes())
            .and_then(|()| writer.write_all(&[0]))
            .map_err(|e| Error::write(format!("label: {e}")))?;
    }

    write_int(writer, header.item_count, "item_count")?;
    write_int(writer, header.compressed_size, "compressed_size")?;

    writer
        .flush()
        .map_err(|e| Error::write(format!("flush: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn make_test_header() -> Header {
        Header {
            version: Version::new(0, 4, 0, BuildType::Dev),
            image_width: 52,
            image_height: 52,
            bit_depth: 24,
            labels: vec!["cat".to_string(), "dog".to_string()],
            item_count: 8,
            compressed_size: 1234,
        }
    }

    fn encode(header: &Header) -> Vec<u8> {
        let mut out = Vec::new();
        write_header(header, &mut out).unwrap();
        out
    }

    #[test]
    fn test_header_roundtrip() {
        let header = make_test_header();
        let bytes = encode(&header);

        let mut input = bytes.as_slice();
        let decoded = read_header(&mut input).unwrap();

        assert_eq!(decoded, header);
        assert!(input.is_empty());
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&make_test_header());

        assert_eq!(&bytes[0..3], b"JDX");
        assert_eq!(&bytes[3..7], &[0, 4, 0, 0]);
        assert_eq!(&bytes[7..9], &52u16.to_le_bytes());
        assert_eq!(&bytes[9..11], &52u16.to_le_bytes());
        assert_eq!(bytes[11], 24);
        assert_eq!(&bytes[12..14], &2u16.to_le_bytes());
        assert_eq!(&bytes[14..22], b"cat\0dog\0");
        assert_eq!(&bytes[22..30], &8u64.to_le_bytes());
        assert_eq!(&bytes[30..38], &1234u64.to_le_bytes());
        assert_eq!(bytes.len(), 38);
    }

    #[test]
    fn test_invalid_magic() {
        let bytes = encode(&make_test_header());

        for i in 0..3 {
            let mut corrupted = bytes.clone();
            corrupted[i] ^= 0xff;
            let err = read_header(&mut corrupted.as_slice()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CorruptFile, "byte {i}");
        }
    }

    #[test]
    fn test_invalid_bit_depth() {
        let mut bytes = encode(&make_test_header());
        bytes[11] = 16;
        let err = read_header(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_invalid_build_type() {
        let mut bytes = encode(&make_test_header());
        bytes[6] = 5;
        let err = read_header(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_unterminated_label() {
        let mut header = make_test_header();
        header.labels.clear();
        let mut bytes = encode(&header);
        // Patch in one label of 200 non-NUL bytes.
        bytes[12..14].copy_from_slice(&1u16.to_le_bytes());
        let tail = bytes.split_off(14);
        bytes.extend(std::iter::repeat_n(b'a', 200));
        bytes.extend(tail);

        let err = read_header(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_longest_label_accepted() {
        let mut header = make_test_header();
        header.labels = vec!["x".repeat(MAX_LABEL_LEN - 1)];
        let bytes = encode(&header);

        let decoded = read_header(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded.labels, header.labels);
    }

    #[test]
    fn test_duplicate_label_rejected_on_read() {
        let bytes = encode(&make_test_header());
        let mut corrupted = bytes.clone();
        // "cat\0dog\0" -> "cat\0cat\0"
        corrupted[18..21].copy_from_slice(b"cat");
        let err = read_header(&mut corrupted.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_empty_label_rejected_on_read() {
        let bytes = encode(&make_test_header());
        let mut corrupted = bytes.clone();
        corrupted[14] = 0;
        let err = read_header(&mut corrupted.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_non_utf8_label_rejected_on_read() {
        let mut bytes = encode(&make_test_header());
        bytes[14] = 0xff;
        let err = read_header(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = encode(&make_test_header());

        for len in [0, 2, 5, 13, 16, 25, 37] {
            let err = read_header(&mut &bytes[..len]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ReadFile, "truncated at {len}");
        }
    }

    #[test]
    fn test_write_rejects_invalid_header() {
        let mut header = make_test_header();
        header.labels.push(String::new());

        let mut out = Vec::new();
        let err = write_header(&header, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteFile);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_failure() {
        let mut buf = [0u8; 10];
        let mut out: &mut [u8] = &mut buf;
        let err = write_header(&make_test_header(), &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteFile);
    }
}

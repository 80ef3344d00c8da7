//! Whole-dataset reading and writing.
//!
//! A JDX file is a header followed immediately by the compressed body. The
//! stream and path variants here tie the header codec and the body framing
//! together.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::codec::body::{decode_body, encode_body};
use crate::codec::header::{read_header, write_header};
use crate::error::Error;
use crate::limits::{DEFAULT_MAX_BODY_SIZE, MAX_COMPRESSION_LEVEL};
use crate::model::{Dataset, Header};
use crate::validate::validate_dataset;

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for reading datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Largest compressed or uncompressed body accepted, in bytes.
    ///
    /// Headers declaring more are rejected as corrupt before the body is
    /// allocated.
    pub max_body_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the body size limit.
    pub fn max_body_size(mut self, max_body_size: u64) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}

/// Options for writing datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// DEFLATE level, 0 (store) through 9 (smallest output).
    pub compression_level: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression_level: MAX_COMPRESSION_LEVEL,
        }
    }
}

impl WriteOptions {
    /// Creates default write options (maximum compression).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options favoring speed over size.
    pub fn fast() -> Self {
        Self {
            compression_level: 1,
        }
    }

    /// Sets the compression level; values above 9 are clamped.
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(MAX_COMPRESSION_LEVEL);
        self
    }
}

// =============================================================================
// STREAMS
// =============================================================================

/// Reads a complete dataset from a stream.
pub fn read_dataset<R: Read + ?Sized>(reader: &mut R) -> Result<Dataset, Error> {
    read_dataset_with_options(reader, ReadOptions::default())
}

/// Reads a complete dataset from a stream with the given options.
pub fn read_dataset_with_options<R: Read + ?Sized>(
    reader: &mut R,
    options: ReadOptions,
) -> Result<Dataset, Error> {
    let header = read_header(reader)?;
    let items = decode_body(&header, reader, options.max_body_size)?;
    Ok(Dataset { header, items })
}

/// Writes a dataset to a stream at maximum compression.
///
/// On success `dataset.header.compressed_size` holds the length of the
/// compressed body that was written.
pub fn write_dataset<W: Write + ?Sized>(
    dataset: &mut Dataset,
    writer: &mut W,
) -> Result<(), Error> {
    write_dataset_with_options(dataset, writer, WriteOptions::default())
}

/// Writes a dataset to a stream with the given options.
///
/// The dataset is validated before anything is written; an invalid dataset
/// fails with [`Error::WriteFile`] and leaves the stream untouched.
pub fn write_dataset_with_options<W: Write + ?Sized>(
    dataset: &mut Dataset,
    writer: &mut W,
    options: WriteOptions,
) -> Result<(), Error> {
    validate_dataset(dataset).map_err(|e| Error::write(e.to_string()))?;

    let body = encode_body(&dataset.header, &dataset.items, options.compression_level)?;
    dataset.header.compressed_size = body.len() as u64;

    write_header(&dataset.header, writer)?;
    writer
        .write_all(&body)
        .map_err(|e| Error::write(format!("compressed body: {e}")))?;
    writer
        .flush()
        .map_err(|e| Error::write(format!("flush: {e}")))?;

    debug!(
        items = dataset.header.item_count,
        compressed = dataset.header.compressed_size,
        level = options.compression_level,
        "Wrote dataset"
    );
    Ok(())
}

// =============================================================================
// PATHS
// =============================================================================

fn open(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::OpenFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Reads only the header of the file at `path`.
pub fn read_header_from_path(path: impl AsRef<Path>) -> Result<Header, Error> {
    let mut reader = open(path.as_ref())?;
    read_header(&mut reader)
}

/// Reads the dataset stored at `path`.
pub fn read_dataset_from_path(path: impl AsRef<Path>) -> Result<Dataset, Error> {
    read_dataset_from_path_with_options(path, ReadOptions::default())
}

/// Reads the dataset stored at `path` with the given options.
pub fn read_dataset_from_path_with_options(
    path: impl AsRef<Path>,
    options: ReadOptions,
) -> Result<Dataset, Error> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let dataset = read_dataset_with_options(&mut reader, options)?;
    info!(
        path = %path.display(),
        items = dataset.len(),
        labels = dataset.header.labels.len(),
        "Read dataset"
    );
    Ok(dataset)
}

/// Writes a dataset to `path`, creating or truncating the file.
pub fn write_dataset_to_path(dataset: &mut Dataset, path: impl AsRef<Path>) -> Result<(), Error> {
    write_dataset_to_path_with_options(dataset, path, WriteOptions::default())
}

/// Writes a dataset to `path` with the given options.
///
/// An invalid dataset fails with [`Error::WriteFile`] before the file is
/// created, so an existing file at `path` is left intact. Failing to flush
/// the file to disk once everything is written is reported as
/// [`Error::CloseFile`]. The write is not atomic; callers needing that
/// should write to a temporary path and rename.
pub fn write_dataset_to_path_with_options(
    dataset: &mut Dataset,
    path: impl AsRef<Path>,
    options: WriteOptions,
) -> Result<(), Error> {
    let path = path.as_ref();
    // Creating the file truncates it, so reject invalid datasets first.
    validate_dataset(dataset).map_err(|e| Error::write(e.to_string()))?;
    let file = File::create(path).map_err(|e| Error::OpenFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut writer = BufWriter::new(file);
    write_dataset_with_options(dataset, &mut writer, options)?;

    let close_error = |reason: String| Error::CloseFile {
        path: path.to_path_buf(),
        reason,
    };
    let file = writer
        .into_inner()
        .map_err(|e| close_error(e.error().to_string()))?;
    file.sync_all().map_err(|e| close_error(e.to_string()))?;

    info!(
        path = %path.display(),
        items = dataset.header.item_count,
        bytes = dataset.header.compressed_size,
        "Wrote dataset"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{BuildType, DatasetBuilder, Item, Version};

    fn make_test_dataset() -> Dataset {
        DatasetBuilder::new(4, 3, 24)
            .version(Version::new(0, 4, 0, BuildType::Dev))
            .item((0..36).collect(), "cat")
            .item(vec![200; 36], "dog")
            .item((36..72).collect(), "cat")
            .build()
            .unwrap()
    }

    #[test]
    fn test_dataset_roundtrip() {
        let mut dataset = make_test_dataset();
        let mut out = Vec::new();
        write_dataset(&mut dataset, &mut out).unwrap();

        let decoded = read_dataset(&mut out.as_slice()).unwrap();
        assert_eq!(decoded, dataset);
    }

    #[test]
    fn test_write_sets_compressed_size() {
        let mut dataset = make_test_dataset();
        let mut out = Vec::new();
        write_dataset(&mut dataset, &mut out).unwrap();

        let header_len = 3 + 4 + 2 + 2 + 1 + 2 + "cat\0dog\0".len() + 8 + 8;
        assert_eq!(dataset.header.compressed_size as usize, out.len() - header_len);
    }

    #[test]
    fn test_write_rejects_invalid_dataset() {
        let mut dataset = make_test_dataset();
        dataset.items.push(Item::new(vec![0; 36], 9));
        dataset.header.item_count += 1;

        let mut out = Vec::new();
        let err = write_dataset(&mut dataset, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteFile);
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncated_dataset() {
        let mut dataset = make_test_dataset();
        let mut out = Vec::new();
        write_dataset(&mut dataset, &mut out).unwrap();

        for cut in [1, 5, out.len() / 2] {
            let truncated = &out[..out.len() - cut];
            let err = read_dataset(&mut &truncated[..]).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::ReadFile | ErrorKind::CorruptFile),
                "cut {cut}: {err}"
            );
        }
    }

    #[test]
    fn test_body_limit() {
        let mut dataset = make_test_dataset();
        let mut out = Vec::new();
        write_dataset(&mut dataset, &mut out).unwrap();

        let options = ReadOptions::new().max_body_size(16);
        let err = read_dataset_with_options(&mut out.as_slice(), options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
    }

    #[test]
    fn test_huge_declared_body_is_read_error() {
        let mut header = Header::new(1, 1, 8);
        header.labels = vec!["cat".to_string()];
        header.item_count = DEFAULT_MAX_BODY_SIZE / header.item_size() as u64;
        header.compressed_size = DEFAULT_MAX_BODY_SIZE;

        let mut bytes = Vec::new();
        write_header(&header, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 34);

        let err = read_dataset(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadFile);
    }

    #[test]
    fn test_fast_and_best_both_roundtrip() {
        for options in [WriteOptions::fast(), WriteOptions::new().compression_level(0)] {
            let mut dataset = make_test_dataset();
            let mut out = Vec::new();
            write_dataset_with_options(&mut dataset, &mut out, options).unwrap();
            assert_eq!(read_dataset(&mut out.as_slice()).unwrap().items, dataset.items);
        }
    }

    #[test]
    fn test_missing_path() {
        let err = read_dataset_from_path("/nonexistent/dir/data.jdx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenFile);

        let err = read_header_from_path("/nonexistent/dir/data.jdx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpenFile);
    }
}

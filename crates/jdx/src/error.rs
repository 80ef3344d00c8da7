//! Error types for JDX reading, writing and dataset operations.

use std::path::PathBuf;

use thiserror::Error;

/// Flat classification of every failure the crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operating system refused to open a file.
    OpenFile,
    /// Flushing or closing a file handle failed.
    CloseFile,
    /// A read came up short or the stream reported an I/O error.
    ReadFile,
    /// A write or flush failed, or the dataset could not be encoded.
    WriteFile,
    /// The input is structurally invalid.
    CorruptFile,
    /// Append was given datasets of different image widths.
    UnequalWidths,
    /// Append was given datasets of different image heights.
    UnequalHeights,
    /// Append was given datasets of different bit depths.
    UnequalBitDepths,
}

/// Error returned by every fallible JDX operation.
///
/// The variant is the error's kind; the fields only add context for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cannot open {}: {reason}", .path.display())]
    OpenFile { path: PathBuf, reason: String },

    #[error("cannot close {}: {reason}", .path.display())]
    CloseFile { path: PathBuf, reason: String },

    #[error("read failed or came up short while reading {context}")]
    ReadFile { context: &'static str },

    #[error("write failed: {reason}")]
    WriteFile { reason: String },

    #[error("corrupt file: {reason}")]
    CorruptFile { reason: String },

    #[error("image widths differ (destination {dest}, source {src})")]
    UnequalWidths { dest: u16, src: u16 },

    #[error("image heights differ (destination {dest}, source {src})")]
    UnequalHeights { dest: u16, src: u16 },

    #[error("bit depths differ (destination {dest}, source {src})")]
    UnequalBitDepths { dest: u8, src: u8 },
}

impl Error {
    /// Returns the flat kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OpenFile { .. } => ErrorKind::OpenFile,
            Error::CloseFile { .. } => ErrorKind::CloseFile,
            Error::ReadFile { .. } => ErrorKind::ReadFile,
            Error::WriteFile { .. } => ErrorKind::WriteFile,
            Error::CorruptFile { .. } => ErrorKind::CorruptFile,
            Error::UnequalWidths { .. } => ErrorKind::UnequalWidths,
            Error::UnequalHeights { .. } => ErrorKind::UnequalHeights,
            Error::UnequalBitDepths { .. } => ErrorKind::UnequalBitDepths,
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptFile { reason: reason.into() }
    }

    pub(crate) fn write(reason: impl Into<String>) -> Self {
        Error::WriteFile { reason: reason.into() }
    }
}

/// A structural invariant violated by a header or dataset.
///
/// Readers report these as [`Error::CorruptFile`], writers as [`Error::WriteFile`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bit depth {bit_depth} (expected 8, 24 or 32)")]
    InvalidBitDepth { bit_depth: u8 },

    #[error("invalid build type {build_type} (expected 0..=4)")]
    InvalidBuildType { build_type: u8 },

    #[error("label {index} is empty")]
    EmptyLabel { index: usize },

    #[error("label {index} is {len} bytes long (maximum {max})")]
    LabelTooLong { index: usize, len: usize, max: usize },

    #[error("label {index} contains a NUL byte")]
    LabelContainsNul { index: usize },

    #[error("label {label:?} appears more than once")]
    DuplicateLabel { label: String },

    #[error("{count} labels exceed the maximum of {max}")]
    TooManyLabels { count: usize, max: usize },

    #[error("header declares {declared} items but dataset holds {actual}")]
    ItemCountMismatch { declared: u64, actual: usize },

    #[error("item {index} holds {actual} bytes of image data (expected {expected})")]
    ItemSizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("item {index} has label {label} but the dictionary has {size} entries")]
    LabelOutOfBounds { index: usize, label: u16, size: usize },
}

impl From<ValidationError> for Error {
    /// Maps to [`Error::CorruptFile`]; write paths use [`Error::WriteFile`] instead.
    fn from(err: ValidationError) -> Self {
        Error::corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = Error::ReadFile { context: "magic" };
        assert_eq!(err.kind(), ErrorKind::ReadFile);

        let err = Error::UnequalBitDepths { dest: 8, src: 24 };
        assert_eq!(err.kind(), ErrorKind::UnequalBitDepths);
    }

    #[test]
    fn test_validation_error_becomes_corrupt() {
        let err: Error = ValidationError::InvalidBitDepth { bit_depth: 7 }.into();
        assert_eq!(err.kind(), ErrorKind::CorruptFile);
        assert!(err.to_string().contains("invalid bit depth 7"));
    }
}

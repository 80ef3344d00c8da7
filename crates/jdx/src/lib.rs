//! JDX: a compact binary container format for labeled image datasets.
//!
//! This crate reads, writes and combines JDX files: a fixed header (image
//! geometry, bit depth, a label dictionary, item count) followed by a single
//! DEFLATE-compressed block holding every image and its label index.
//!
//! # Quick Start
//!
//! ```rust
//! use jdx::{read_dataset, write_dataset, DatasetBuilder};
//!
//! // Two 2x2 grayscale images
//! let mut dataset = DatasetBuilder::new(2, 2, 8)
//!     .item(vec![0, 64, 128, 255], "cat")
//!     .item(vec![255, 128, 64, 0], "dog")
//!     .build()
//!     .unwrap();
//!
//! let mut bytes = Vec::new();
//! write_dataset(&mut dataset, &mut bytes).unwrap();
//!
//! let decoded = read_dataset(&mut bytes.as_slice()).unwrap();
//! assert_eq!(decoded.image(1).unwrap().label, "dog");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Version, Header, Item, Dataset)
//! - [`codec`]: Binary encoding/decoding with compression
//! - [`validate`]: Structural validation
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decode limits
//!
//! # Wire Format
//!
//! ```text
//! "JDX" | version (4 x u8) | width u16 | height u16 | bit_depth u8
//!       | label_count u16 | labels (NUL-terminated)
//!       | item_count u64 | compressed_size u64 | DEFLATE body
//! ```
//!
//! All integers are little-endian, including the label index stored after
//! each image inside the body.
//!
//! # Security
//!
//! Readers treat input as untrusted: label scans are capped, declared body
//! sizes are bounded by [`ReadOptions::max_body_size`], buffers grow only with
//! the bytes actually read, and every label index is checked against the
//! dictionary.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    read_dataset, read_dataset_from_path, read_dataset_from_path_with_options,
    read_dataset_with_options, read_header, read_header_from_path, write_dataset,
    write_dataset_to_path, write_dataset_to_path_with_options, write_dataset_with_options,
    write_header, ReadOptions, WriteOptions,
};
pub use error::{Error, ErrorKind, ValidationError};
pub use model::{
    compare_versions, BuildType, Dataset, DatasetBuilder, Header, Image, Item, Version,
    FORMAT_VERSION,
};
pub use validate::{validate_dataset, validate_header};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Binary encoding/decoding for JDX.
//!
//! Layers, leaf first: fixed-width integers ([`endian`]), the header
//! ([`header`]), DEFLATE ([`deflate`]), body framing ([`body`]) and whole
//! datasets ([`dataset`]).

pub mod body;
pub mod dataset;
pub mod deflate;
pub mod endian;
pub mod header;

pub use body::{decode_body, encode_body};
pub use dataset::{
    read_dataset, read_dataset_from_path, read_dataset_from_path_with_options,
    read_dataset_with_options, read_header_from_path, write_dataset, write_dataset_to_path,
    write_dataset_to_path_with_options, write_dataset_with_options, ReadOptions, WriteOptions,
};
pub use deflate::{compress, decompress};
pub use endian::{read_int, write_int, WireInt};
pub use header::{read_header, write_header};

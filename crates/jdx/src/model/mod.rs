//! Data model types for JDX.
//!
//! This module contains the in-memory representation of a JDX file:
//! - Versions (ordered format versions)
//! - Headers (geometry and label dictionary)
//! - Items (labeled image records)
//! - Datasets (header plus items, with copy and append)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod dataset;
pub mod header;
pub mod item;
pub mod version;

pub use builder::DatasetBuilder;
pub use dataset::Dataset;
pub use header::Header;
pub use item::{Image, Item};
pub use version::{compare_versions, BuildType, Version, FORMAT_VERSION};

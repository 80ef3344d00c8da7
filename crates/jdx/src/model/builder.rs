//! Builder API for ergonomic Dataset construction.
//!
//! # Example
//!
//! ```rust
//! use jdx::model::builder::DatasetBuilder;
//!
//! let dataset = DatasetBuilder::new(2, 2, 8)
//!     .item(vec![0, 1, 2, 3], "cat")
//!     .item(vec![4, 5, 6, 7], "dog")
//!     .item(vec![8, 9, 10, 11], "cat")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dataset.header.labels, vec!["cat", "dog"]);
//! assert_eq!(dataset.items[2].label, 0);
//! ```

use rustc_hash::FxHashMap;

use crate::error::ValidationError;
use crate::limits::MAX_LABEL_COUNT;
use crate::model::{Dataset, Header, Item, Version};
use crate::validate::validate_dataset;

/// Builder for constructing a Dataset from images and label names.
///
/// Label names are interned in first-seen order.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    header: Header,
    positions: FxHashMap<String, usize>,
    items: Vec<(Vec<u8>, usize)>,
}

impl DatasetBuilder {
    /// Creates a builder for images of the given geometry.
    pub fn new(image_width: u16, image_height: u16, bit_depth: u8) -> Self {
        Self {
            header: Header::new(image_width, image_height, bit_depth),
            positions: FxHashMap::default(),
            items: Vec::new(),
        }
    }

    /// Sets the version recorded in the header.
    pub fn version(mut self, version: Version) -> Self {
        self.header.version = version;
        self
    }

    /// Registers a label without adding an item.
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.intern(name.into());
        self
    }

    /// Adds an image with the given label name.
    pub fn item(mut self, data: Vec<u8>, label: impl Into<String>) -> Self {
        let index = self.intern(label.into());
        self.items.push((data, index));
        self
    }

    /// Adds several images sharing one label name.
    pub fn items(
        mut self,
        images: impl IntoIterator<Item = Vec<u8>>,
        label: impl Into<String>,
    ) -> Self {
        let index = self.intern(label.into());
        self.items.extend(images.into_iter().map(|data| (data, index)));
        self
    }

    fn intern(&mut self, name: String) -> usize {
        if let Some(&index) = self.positions.get(&name) {
            return index;
        }
        let index = self.header.labels.len();
        self.header.labels.push(name.clone());
        self.positions.insert(name, index);
        index
    }

    /// Builds and validates the dataset.
    pub fn build(self) -> Result<Dataset, ValidationError> {
        if self.header.labels.len() > MAX_LABEL_COUNT {
            return Err(ValidationError::TooManyLabels {
                count: self.header.labels.len(),
                max: MAX_LABEL_COUNT,
            });
        }

        let mut dataset = Dataset::new(self.header);
        dataset.items.reserve_exact(self.items.len());
        for (data, label) in self.items {
            // Fits: label count was checked above.
            dataset.items.push(Item::new(data, label as u16));
        }
        dataset.header.item_count = dataset.items.len() as u64;

        validate_dataset(&dataset)?;
        Ok(dataset)
    }
}

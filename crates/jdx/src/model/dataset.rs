//! In-memory datasets and the operations that combine them.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Error;
use crate::limits::MAX_LABEL_COUNT;
use crate::model::{Header, Image, Item};

/// A header together with all of its items.
///
/// `items.len()` equals `header.item_count` for every dataset produced by this
/// crate. Cloning performs a deep copy: the clone owns its own label strings
/// and image buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub header: Header,
    pub items: Vec<Item>,
}

impl Dataset {
    /// Creates a dataset with no items.
    pub fn new(mut header: Header) -> Self {
        header.item_count = 0;
        Self {
            header,
            items: Vec::new(),
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the dataset holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an item, keeping `header.item_count` in step.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
        self.header.item_count = self.items.len() as u64;
    }

    /// Returns a view of the item at `index` with its label name resolved.
    ///
    /// Returns `None` if the index is out of range or the item's label does
    /// not resolve in the dictionary.
    pub fn image(&self, index: usize) -> Option<Image<'_>> {
        let item = self.items.get(index)?;
        let label = self.header.label(item.label)?;
        Some(Image {
            data: &item.data,
            width: self.header.image_width,
            height: self.header.image_height,
            bit_depth: self.header.bit_depth,
            label,
            label_index: item.label,
        })
    }

    /// Appends copies of every item in `src` to this dataset.
    ///
    /// Labels already in this dataset keep their indices; labels only present in
    /// `src` are added at the end of the dictionary in `src` order, and copied
    /// items are remapped accordingly.
    ///
    /// The operation is atomic: on error `self` is left unchanged. `src` is never
    /// modified.
    pub fn append(&mut self, src: &Dataset) -> Result<(), Error> {
        let dest_header = &self.header;
        let src_header = &src.header;

        if src_header.image_width != dest_header.image_width {
            return Err(Error::UnequalWidths {
                dest: dest_header.image_width,
                src: src_header.image_width,
            });
        }
        if src_header.image_height != dest_header.image_height {
            return Err(Error::UnequalHeights {
                dest: dest_header.image_height,
                src: src_header.image_height,
            });
        }
        if src_header.bit_depth != dest_header.bit_depth {
            return Err(Error::UnequalBitDepths {
                dest: dest_header.bit_depth,
                src: src_header.bit_depth,
            });
        }

        // Stage the merged dictionary; nothing in `self` changes until commit.
        let mut labels = dest_header.labels.clone();
        let mut positions: FxHashMap<&str, u16> =
            FxHashMap::with_capacity_and_hasher(labels.len(), Default::default());
        for (index, label) in dest_header.labels.iter().enumerate() {
            let Ok(index) = u16::try_from(index) else { break };
            positions.entry(label.as_str()).or_insert(index);
        }

        let mut label_map = Vec::with_capacity(src_header.labels.len());
        for label in &src_header.labels {
            let mapped = match positions.get(label.as_str()) {
                Some(&existing) => existing,
                None => {
                    if labels.len() >= MAX_LABEL_COUNT {
                        return Err(Error::corrupt(format!(
                            "merged label dictionary exceeds {MAX_LABEL_COUNT} entries"
                        )));
                    }
                    let next = labels.len() as u16;
                    labels.push(label.clone());
                    positions.insert(label.as_str(), next);
                    next
                }
            };
            label_map.push(mapped);
        }
        labels.shrink_to_fit();

        let mut staged = Vec::with_capacity(src.items.len());
        for (index, item) in src.items.iter().enumerate() {
            let Some(&label) = label_map.get(item.label as usize) else {
                return Err(Error::corrupt(format!(
                    "source item {index} has label {} but the source dictionary has {} entries",
                    item.label,
                    label_map.len()
                )));
            };
            staged.push(Item::new(item.data.clone(), label));
        }

        let labels_added = labels.len() - self.header.labels.len();
        let items_added = staged.len();

        self.header.labels = labels;
        self.items.append(&mut staged);
        self.header.item_count = self.items.len() as u64;
        self.header.compressed_size = 0;

        debug!(
            labels_added,
            items_added,
            item_count = self.header.item_count,
            "Appended dataset"
        );

        Ok(())
    }
}

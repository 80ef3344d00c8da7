//! Dataset header: image geometry, version and the label dictionary.

use crate::limits::LABEL_INDEX_WIDTH;
use crate::model::Version;

/// The preamble of a JDX file.
///
/// `labels` is the label dictionary: an item's label index is a position
/// in this list. Entries are unique and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format version the file was written with.
    pub version: Version,
    /// Width of every image in pixels.
    pub image_width: u16,
    /// Height of every image in pixels.
    pub image_height: u16,
    /// Bits per pixel: 8 (gray), 24 (RGB) or 32 (RGBA).
    pub bit_depth: u8,
    /// Label dictionary.
    pub labels: Vec<String>,
    /// Number of items in the dataset.
    pub item_count: u64,
    /// Length of the compressed body, as of the last write.
    pub compressed_size: u64,
}

impl Header {
    /// Creates an empty header for images of the given geometry.
    pub fn new(image_width: u16, image_height: u16, bit_depth: u8) -> Self {
        Self {
            version: Version::default(),
            image_width,
            image_height,
            bit_depth,
            labels: Vec::new(),
            item_count: 0,
            compressed_size: 0,
        }
    }

    /// Size in bytes of a single image's pixel data.
    pub fn image_size(&self) -> usize {
        self.image_width as usize * self.image_height as usize * self.bit_depth as usize / 8
    }

    /// Size in bytes of a single record in the uncompressed body.
    pub fn item_size(&self) -> usize {
        self.image_size() + LABEL_INDEX_WIDTH
    }

    /// Number of color channels implied by the bit depth.
    pub fn channels(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Looks up a label name by index.
    pub fn label(&self, index: u16) -> Option<&str> {
        self.labels.get(index as usize).map(String::as_str)
    }

    /// Returns the index of a label name, if present.
    pub fn label_index(&self, name: &str) -> Option<u16> {
        self.labels
            .iter()
            .position(|label| label == name)
            .and_then(|pos| u16::try_from(pos).ok())
    }
}

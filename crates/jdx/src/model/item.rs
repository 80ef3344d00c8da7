//! Dataset items and borrowed image views.

/// One labeled image record.
///
/// `data` holds exactly `Header::image_size()` bytes in row-major order with
/// interleaved channels. `label` indexes the owning dataset's label dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub data: Vec<u8>,
    pub label: u16,
}

impl Item {
    /// Creates an item.
    pub fn new(data: Vec<u8>, label: u16) -> Self {
        Self { data, label }
    }
}

/// A borrowed view of one item with its geometry and resolved label name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image<'a> {
    pub data: &'a [u8],
    pub width: u16,
    pub height: u16,
    pub bit_depth: u8,
    pub label: &'a str,
    pub label_index: u16,
}

impl Image<'_> {
    /// Number of color channels per pixel.
    pub fn channels(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Returns the channel bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u16, y: u16) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_access() {
        // 2x2 RGB image
        let data: Vec<u8> = (0..12).collect();
        let image = Image {
            data: &data,
            width: 2,
            height: 2,
            bit_depth: 24,
            label: "cat",
            label_index: 0,
        };

        assert_eq!(image.pixel(0, 0), Some(&[0u8, 1, 2][..]));
        assert_eq!(image.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(image.pixel(2, 0), None);
    }
}

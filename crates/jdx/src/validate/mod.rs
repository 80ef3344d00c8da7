//! Structural validation for JDX headers and datasets.
//!
//! Readers check these invariants while decoding; writers check them before
//! emitting any bytes so that an invalid dataset never reaches a stream.

use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::limits::{MAX_LABEL_COUNT, MAX_LABEL_LEN, VALID_BIT_DEPTHS};
use crate::model::{Dataset, Header};

/// Checks that a bit depth is one of 8, 24 or 32.
pub fn validate_bit_depth(bit_depth: u8) -> Result<(), ValidationError> {
    if VALID_BIT_DEPTHS.contains(&bit_depth) {
        Ok(())
    } else {
        Err(ValidationError::InvalidBitDepth { bit_depth })
    }
}

/// Checks a single label: non-empty, no NUL, and short enough to fit the
/// wire cap together with its terminator.
pub fn validate_label(index: usize, label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel { index });
    }
    if label.len() >= MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong {
            index,
            len: label.len(),
            max: MAX_LABEL_LEN - 1,
        });
    }
    if label.as_bytes().contains(&0) {
        return Err(ValidationError::LabelContainsNul { index });
    }
    Ok(())
}

/// Validates a header's bit depth and label dictionary.
pub fn validate_header(header: &Header) -> Result<(), ValidationError> {
    validate_bit_depth(header.bit_depth)?;

    if header.labels.len() > MAX_LABEL_COUNT {
        return Err(ValidationError::TooManyLabels {
            count: header.labels.len(),
            max: MAX_LABEL_COUNT,
        });
    }

    let mut seen = FxHashSet::with_capacity_and_hasher(header.labels.len(), Default::default());
    for (index, label) in header.labels.iter().enumerate() {
        validate_label(index, label)?;
        if !seen.insert(label.as_str()) {
            return Err(ValidationError::DuplicateLabel {
                label: label.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a whole dataset: header, item count, item sizes and label indices.
pub fn validate_dataset(dataset: &Dataset) -> Result<(), ValidationError> {
    let header = &dataset.header;
    validate_header(header)?;

    if header.item_count != dataset.items.len() as u64 {
        return Err(ValidationError::ItemCountMismatch {
            declared: header.item_count,
            actual: dataset.items.len(),
        });
    }

    let image_size = header.image_size();
    let label_count = header.labels.len();
    for (index, item) in dataset.items.iter().enumerate() {
        if item.data.len() != image_size {
            return Err(ValidationError::ItemSizeMismatch {
                index,
                expected: image_size,
                actual: item.data.len(),
            });
        }
        if item.label as usize >= label_count {
            return Err(ValidationError::LabelOutOfBounds {
                index,
                label: item.label,
                size: label_count,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    fn labeled_header(labels: &[&str]) -> Header {
        let mut header = Header::new(2, 2, 8);
        header.labels = labels.iter().map(|l| l.to_string()).collect();
        header
    }

    #[test]
    fn test_valid_header() {
        assert!(validate_header(&labeled_header(&["cat", "dog"])).is_ok());
    }

    #[test]
    fn test_invalid_bit_depth() {
        let mut header = labeled_header(&["cat"]);
        header.bit_depth = 16;
        assert_eq!(
            validate_header(&header),
            Err(ValidationError::InvalidBitDepth { bit_depth: 16 })
        );
    }

    #[test]
    fn test_label_rules() {
        assert_eq!(validate_label(3, ""), Err(ValidationError::EmptyLabel { index: 3 }));
        assert_eq!(
            validate_label(0, "a\0b"),
            Err(ValidationError::LabelContainsNul { index: 0 })
        );

        let longest = "x".repeat(MAX_LABEL_LEN - 1);
        assert!(validate_label(0, &longest).is_ok());

        let too_long = "x".repeat(MAX_LABEL_LEN);
        assert!(matches!(
            validate_label(0, &too_long),
            Err(ValidationError::LabelTooLong { len: 128, .. })
        ));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let header = labeled_header(&["cat", "dog", "cat"]);
        assert_eq!(
            validate_header(&header),
            Err(ValidationError::DuplicateLabel {
                label: "cat".to_string()
            })
        );
    }

    #[test]
    fn test_dataset_item_checks() {
        let mut dataset = Dataset::new(labeled_header(&["cat"]));
        dataset.items.push(Item::new(vec![0; 4], 0));
        dataset.header.item_count = 1;
        assert!(validate_dataset(&dataset).is_ok());

        dataset.items[0].label = 1;
        assert!(matches!(
            validate_dataset(&dataset),
            Err(ValidationError::LabelOutOfBounds { label: 1, size: 1, .. })
        ));

        dataset.items[0].label = 0;
        dataset.items[0].data.pop();
        assert!(matches!(
            validate_dataset(&dataset),
            Err(ValidationError::ItemSizeMismatch { expected: 4, actual: 3, .. })
        ));

        dataset.items[0].data.push(0);
        dataset.header.item_count = 2;
        assert!(matches!(
            validate_dataset(&dataset),
            Err(ValidationError::ItemCountMismatch { declared: 2, actual: 1 })
        ));
    }
}

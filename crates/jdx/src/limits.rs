//! Wire constants and decode limits for the JDX format.

/// Magic bytes opening every JDX file.
pub const MAGIC: &[u8; 3] = b"JDX";

/// Maximum label length in bytes, including the NUL terminator.
pub const MAX_LABEL_LEN: usize = 128;

/// Maximum number of entries in a label dictionary.
pub const MAX_LABEL_COUNT: usize = u16::MAX as usize;

/// Width in bytes of the label index trailing each record in the body.
pub const LABEL_INDEX_WIDTH: usize = 2;

/// Bit depths a header may declare: gray, RGB and RGBA.
pub const VALID_BIT_DEPTHS: [u8; 3] = [8, 24, 32];

/// Default cap on both the compressed and uncompressed body size (16 GiB).
pub const DEFAULT_MAX_BODY_SIZE: u64 = 16 * 1024 * 1024 * 1024;

/// Highest DEFLATE compression level.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

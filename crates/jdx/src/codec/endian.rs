//! Fixed-width integer encoding for the JDX wire format.
//!
//! Every multi-byte integer in a JDX file is little-endian. The host byte
//! order is probed once, lazily, and each read or write translates between
//! native and wire order exactly once.

use std::io::{Read, Write};

use lazy_static::lazy_static;

use crate::error::Error;

lazy_static! {
    static ref HOST_IS_LITTLE_ENDIAN: bool = u16::from_ne_bytes([1, 0]) == 1;
}

/// Returns true if the host stores integers least significant byte first.
#[inline]
pub fn host_is_little_endian() -> bool {
    *HOST_IS_LITTLE_ENDIAN
}

/// Integer types with a fixed wire width.
pub trait WireInt: Copy {
    /// Encoded width in bytes (at most 8).
    const WIDTH: usize;

    /// Writes the host-order bytes of `self` into `out` (`WIDTH` bytes).
    fn to_native(self, out: &mut [u8]);

    /// Reads a value from `WIDTH` host-order bytes.
    fn from_native(bytes: &[u8]) -> Self;
}

macro_rules! impl_wire_int {
    ($($ty:ty),*) => {
        $(
            impl WireInt for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn to_native(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn from_native(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_wire_int!(u8, u16, u32, u64);

/// Encodes `value` into `out[..T::WIDTH]` in wire order.
#[inline]
pub(crate) fn encode_int<T: WireInt>(value: T, out: &mut [u8]) {
    let out = &mut out[..T::WIDTH];
    value.to_native(out);
    if !host_is_little_endian() {
        out.reverse();
    }
}

/// Decodes a value from `bytes[..T::WIDTH]` in wire order.
#[inline]
pub(crate) fn decode_int<T: WireInt>(bytes: &[u8]) -> T {
    let bytes = &bytes[..T::WIDTH];
    if host_is_little_endian() {
        return T::from_native(bytes);
    }
    let mut scratch = [0u8; 8];
    let swapped = &mut scratch[..T::WIDTH];
    swapped.copy_from_slice(bytes);
    swapped.reverse();
    T::from_native(swapped)
}

/// Reads one wire-order integer from a stream.
///
/// A short read or I/O failure is reported as [`Error::ReadFile`].
pub fn read_int<T: WireInt, R: Read + ?Sized>(
    reader: &mut R,
    context: &'static str,
) -> Result<T, Error> {
    let mut buf = [0u8; 8];
    let bytes = &mut buf[..T::WIDTH];
    reader
        .read_exact(bytes)
        .map_err(|_| Error::ReadFile { context })?;
    Ok(decode_int(bytes))
}

/// Writes one wire-order integer to a stream.
///
/// A short write or I/O failure is reported as [`Error::WriteFile`].
pub fn write_int<T: WireInt, W: Write + ?Sized>(
    writer: &mut W,
    value: T,
    context: &'static str,
) -> Result<(), Error> {
    let mut buf = [0u8; 8];
    let bytes = &mut buf[..T::WIDTH];
    encode_int(value, bytes);
    writer
        .write_all(bytes)
        .map_err(|e| Error::write(format!("{context}: {e}")))
}

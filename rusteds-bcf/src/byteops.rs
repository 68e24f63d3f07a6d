//! Little-endian scalar decoding.
//!
//! The stream is little-endian throughout, independent of the host. The
//! callers guarantee slices of at least the required width.

/// Decodes a little-endian u16 from the head of `bytes`.
#[inline]
#[must_use]
pub fn le_u16(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Decodes a little-endian u32 from the head of `bytes`.
#[inline]
#[must_use]
pub fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decodes an eight-byte little-endian field as its low 40 bits.
///
/// Values above 2^40 - 1 never occur in this format; the top three bytes
/// are zero on disk and are not read.
#[inline]
#[must_use]
pub fn le_u64(bytes: &[u8]) -> u64 {
    u64::from(le_u32(bytes)) | u64::from(bytes[4]) << 32
}

//! Bit helpers shared by generated code and the [`Payload`](crate::Payload) impls.
//!
//! Offsets and sizes are in bytes. Everything is little endian: byte 0 is the least significant byte
//! of the `u128`.

/// Returns a mask covering the lowest `bytes` bytes.
#[must_use]
pub const fn mask(bytes: usize) -> u128 {
    if bytes >= 16 {
        u128::MAX
    } else {
        (1u128 << (bytes * 8)) - 1
    }
}

/// Writes the lowest `size` bytes of `value` into `bits` starting at byte `offset`.
///
/// Bytes that would land past the 16th byte are dropped.
#[must_use]
pub const fn insert(bits: u128, value: u128, offset: usize, size: usize) -> u128 {
    if offset >= 16 {
        return bits;
    }
    let field = mask(size) << (offset * 8);
    (bits & !field) | ((value & mask(size)) << (offset * 8))
}

/// Reads `size` bytes from `bits` starting at byte `offset`.
#[must_use]
pub const fn extract(bits: u128, offset: usize, size: usize) -> u128 {
    if offset >= 16 {
        0
    } else {
        (bits >> (offset * 8)) & mask(size)
    }
}

/// Interprets the lowest `size` bytes of `bits` as a two's complement number.
///
/// Sizes of 8 bytes or more are read as a plain `i64`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn sign_extend(bits: u128, size: usize) -> i64 {
    if size == 0 {
        return 0;
    }
    if size >= 8 {
        return bits as u64 as i64;
    }
    let shift = (64 - size * 8) as u32;
    ((bits as u64) << shift) as i64 >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(1), 0xFF);
        assert_eq!(mask(3), 0xFF_FFFF);
        assert_eq!(mask(16), u128::MAX);
    }

    #[test]
    fn insert_then_extract() {
        let bits = insert(0, 0xABCD, 2, 2);
        assert_eq!(bits, 0xABCD_0000);
        assert_eq!(extract(bits, 2, 2), 0xABCD);
        assert_eq!(extract(bits, 3, 1), 0xAB);
        // overwrite clears the old bytes first.
        assert_eq!(insert(bits, 0x01, 3, 1), 0x01CD_0000);
    }

    #[test]
    fn sign_extension() {
        assert_eq!(sign_extend(0xFF, 1), -1);
        assert_eq!(sign_extend(0x7F, 1), 127);
        assert_eq!(sign_extend(0x8000, 2), -32768);
        assert_eq!(sign_extend(0xFFFF_FFFF, 4), -1);
        assert_eq!(sign_extend(0xFFFF_FFFF, 8), 0xFFFF_FFFF);
        assert_eq!(sign_extend(0xFF, 0), 0);
    }
}

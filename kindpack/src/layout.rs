/// Byte widths of a packed identifier.
///
/// The payload always starts at byte 0 of the raw word. The discriminant occupies the top
/// `discriminant_width_bytes` bytes, `discriminant_byte_offset` is always
/// `total_width_bytes - discriminant_width_bytes`. Identifiers without a discriminant field report a
/// discriminant width equal to the total width and an offset of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawLayout {
    /// One of 2, 4, 8, 12 or 16.
    pub total_width_bytes: usize,
    /// Largest kind payload, rounded up to a width bucket.
    pub payload_width_bytes: usize,
    /// One of 1, 2 or 4 when a discriminant field exists.
    pub discriminant_width_bytes: usize,
    pub discriminant_byte_offset: usize,
    /// `false` when the kind set is empty or degenerate.
    pub has_discriminant: bool,
}

impl RawLayout {
    /// Mask over the payload bytes of the raw word.
    #[must_use]
    pub const fn payload_mask(&self) -> u128 {
        crate::bits::mask(self.payload_width_bytes)
    }

    /// Amount of bits the discriminant is shifted by within the raw word.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn discriminant_shift(&self) -> u32 {
        if self.has_discriminant {
            (self.discriminant_byte_offset * 8) as u32
        } else {
            0
        }
    }
}

//! Width planning: how many bytes the identifier takes and how they split between payload and
//! discriminant.
use super::SolvingError;

/// Rounds a byte count up to the next width bucket out of {1, 2, 4, 8, 12, 16}.
///
/// Zero stays zero. Anything over 16 collapses to 8, callers must reject such sizes before relying on
/// the result.
pub fn normalize(bytes: usize) -> usize {
    match bytes {
        0 => 0,
        1 => 1,
        2 => 2,
        3..=4 => 4,
        5..=8 => 8,
        9..=12 => 12,
        13..=16 => 16,
        _ => 8,
    }
}

/// Smallest discriminant width able to count to `value`.
pub fn discriminant_width_for(value: u64) -> usize {
    if value <= u64::from(u8::MAX) {
        1
    } else if value <= u64::from(u16::MAX) {
        2
    } else {
        4
    }
}

/// Amount of discriminant values a width can address.
pub fn addressable(discriminant_width: usize) -> u64 {
    1u64 << (discriminant_width * 8).min(63)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPlan {
    pub total_width: usize,
    /// Largest payload rounded to a width bucket. Equal to `total_width` without a discriminant.
    pub payload_width: usize,
    /// Equal to `total_width` without a discriminant.
    pub discriminant_width: usize,
    pub has_discriminant: bool,
    /// Leading kinds that received a discriminant. Anything past this was truncated.
    pub kept: usize,
}

impl WidthPlan {
    /// Plans the widths for kinds with the given payload sizes, in assignment order.
    ///
    /// `max_order` is the largest declared order, `preferred_width` the `width` attribute.
    pub fn solve(
        payload_sizes: &[usize],
        max_order: u64,
        preferred_width: Option<usize>,
        allow_empty: bool,
    ) -> Result<Self, SolvingError> {
        let count = payload_sizes.len();
        if count == 0 && !allow_empty {
            return Err(SolvingError::NoKinds);
        }
        let largest = payload_sizes.iter().copied().max().unwrap_or(0);
        let preferred = preferred_width.unwrap_or(0);
        if largest > 16 {
            return Err(SolvingError::PayloadTooLarge { largest });
        }
        let payload_width = normalize(largest);

        if count <= 1 && allow_empty {
            let total_width = normalize(payload_width).max(preferred).max(2);
            return Ok(Self {
                total_width,
                payload_width: total_width,
                discriminant_width: total_width,
                has_discriminant: false,
                kept: count,
            });
        }
        if payload_width >= 8 && count > 1 {
            return Err(SolvingError::PayloadTooLarge { largest });
        }

        let count_u64 = u64::try_from(count).unwrap_or(u64::MAX);
        let candidate = discriminant_width_for(count_u64.max(max_order));
        let total_width = normalize(payload_width + candidate).max(preferred).max(2);
        let capacity = total_width
            .checked_sub(payload_width)
            .filter(|c| *c > 0)
            .ok_or(SolvingError::NoDiscriminantRoom {
                total: total_width,
                payload: payload_width,
            })?;
        let discriminant_width = if candidate <= capacity {
            candidate
        } else {
            [4, 2, 1]
                .into_iter()
                .find(|w| *w <= capacity)
                .unwrap_or(1)
        };
        let limit = addressable(discriminant_width);
        let kept = if count_u64 > limit {
            usize::try_from(limit).unwrap_or(count)
        } else {
            count
        };
        Ok(Self {
            total_width,
            payload_width,
            discriminant_width,
            has_discriminant: true,
            kept,
        })
    }

    pub fn discriminant_offset(&self) -> usize {
        if self.has_discriminant {
            self.total_width - self.discriminant_width
        } else {
            0
        }
    }
}

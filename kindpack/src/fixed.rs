use core::{fmt, ops::Deref};

use crate::CapacityError;

/// A string stored inline in `N` bytes, for building identifier text without a heap.
///
/// Text is only ever appended a whole `&str` at a time, so a failed append leaves the buffer as it was.
#[derive(Clone, Copy)]
pub struct FixedString<const N: usize> {
    bytes: [u8; N],
    len: usize,
    /// length of the last append that did not fit.
    rejected: usize,
}

impl<const N: usize> FixedString<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            rejected: 0,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Appends `s`.
    ///
    /// # Errors
    /// If `s` does not fit in the remaining capacity. Nothing is written in that case.
    pub fn push_str(&mut self, s: &str) -> Result<(), CapacityError> {
        let end = self.len + s.len();
        if end > N {
            self.rejected = s.len();
            return Err(self.overflow_error());
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.rejected = 0;
    }

    pub(crate) fn overflow_error(&self) -> CapacityError {
        CapacityError {
            required: self.len + self.rejected,
            available: N,
        }
    }
}

impl<const N: usize> Default for FixedString<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedString<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

impl<const N: usize> Deref for FixedString<N> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<const N: usize> fmt::Display for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> PartialEq for FixedString<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for FixedString<N> {}

impl<const N: usize> PartialEq<str> for FixedString<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for FixedString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn appends_whole_strings_only() {
        let mut s = FixedString::<6>::new();
        s.push_str("Item").unwrap();
        s.push_str("-").unwrap();
        let err = s.push_str("42").unwrap_err();
        assert_eq!(err, CapacityError { required: 7, available: 6 });
        assert_eq!(s, "Item-");
        assert!(write!(s, "7").is_ok());
        assert_eq!(s.as_str(), "Item-7");
        assert!(write!(s, "7").is_err());
    }
}

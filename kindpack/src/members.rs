use crate::CapacityError;

/// A growable collection that packed identifiers can add enum members to.
///
/// `reserve_members` is always called with the full amount before the first `push_member`, so a sink
/// that can not take everything is never partially filled.
pub trait MemberSink<T> {
    /// # Errors
    /// If `additional` more members can not be stored.
    fn reserve_members(&mut self, additional: usize) -> Result<(), CapacityError>;
    fn push_member(&mut self, member: T);
}

#[cfg(feature = "std")]
impl<T> MemberSink<T> for Vec<T> {
    fn reserve_members(&mut self, additional: usize) -> Result<(), CapacityError> {
        self.try_reserve(additional).map_err(|_| CapacityError {
            required: self.len().saturating_add(additional),
            available: self.capacity(),
        })
    }

    fn push_member(&mut self, member: T) {
        self.push(member);
    }
}

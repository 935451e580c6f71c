use crate::notice::Notice;

/// Sink for user-facing notices.
///
/// A notice whose id is already visible replaces it instead of stacking.
/// Delivery never fails from the caller's point of view.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notice: Notice);
}

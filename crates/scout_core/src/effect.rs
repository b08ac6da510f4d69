use crate::RankedResult;

/// Notifications the driver must perform against the attached listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    NotifyStarted,
    NotifyFinished(RankedResult),
    /// Drop the listener; nothing further will be delivered to it.
    DetachListener,
}

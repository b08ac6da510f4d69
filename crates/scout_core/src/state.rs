use crate::RankedResult;

/// Delivery lifecycle of one scrape.
///
/// `listener` records whether a listener is currently attached. The result is
/// held in `Completed` only while nobody has received it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryState {
    Pending { listener: bool },
    Running { listener: bool },
    Completed(RankedResult),
    Delivered,
}

impl Default for DeliveryState {
    fn default() -> Self {
        DeliveryState::Pending { listener: false }
    }
}

impl DeliveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, DeliveryState::Completed(_) | DeliveryState::Delivered)
    }

    /// The stored result, if it finished without anyone to receive it.
    pub fn pending_result(&self) -> Option<&RankedResult> {
        match self {
            DeliveryState::Completed(result) => Some(result),
            _ => None,
        }
    }
}

use crate::RankedResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A caller attached (or replaced) its listener.
    ListenerAttached,
    /// The pipeline began working.
    ScrapeStarted,
    /// The pipeline produced its terminal result.
    ScrapeFinished(RankedResult),
}

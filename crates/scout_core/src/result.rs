use std::fmt;

/// Scrape-level outcome. Only page fetch problems are surfaced here; probe
/// failures degrade to "fewer images" instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    #[default]
    None,
    /// Transport failure while fetching the page.
    Io,
    /// The page body was empty.
    EmptyResponse,
}

impl ErrorCode {
    /// Integer form used by the flat transport record.
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::None => 0,
            ErrorCode::Io => 1,
            ErrorCode::EmptyResponse => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::None),
            1 => Some(ErrorCode::Io),
            2 => Some(ErrorCode::EmptyResponse),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::None => write!(f, "none"),
            ErrorCode::Io => write!(f, "io error"),
            ErrorCode::EmptyResponse => write!(f, "empty response"),
        }
    }
}

/// Which end of the slot array a write fills from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// Fill from index 0 upward.
    #[default]
    High,
    /// Fill from index N-1 downward.
    Low,
}

/// Fixed-capacity ranked output of one scrape.
///
/// Slots are never overwritten once set. High-priority writes take the first
/// empty slot from the front, low-priority writes the first empty slot from
/// the back, so the two sources can share the array without colliding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    pub(crate) source_url: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slots: Vec<Option<String>>,
    pub(crate) error: ErrorCode,
}

impl RankedResult {
    pub fn new(source_url: impl Into<String>, title: Option<String>, capacity: usize) -> Self {
        Self {
            source_url: Some(source_url.into()),
            title,
            slots: vec![None; capacity],
            error: ErrorCode::None,
        }
    }

    /// A terminal error result. It has no slots and accepts no writes.
    pub fn failed(error: ErrorCode) -> Self {
        Self {
            source_url: None,
            title: None,
            slots: Vec::new(),
            error,
        }
    }

    pub fn error(&self) -> ErrorCode {
        self.error
    }

    pub fn is_error(&self) -> bool {
        self.error != ErrorCode::None
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn set_source_url(&mut self, url: impl Into<String>) {
        if !self.is_error() {
            self.source_url = Some(url.into());
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if !self.is_error() {
            self.title = Some(title.into());
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All slots in rank order, gaps included.
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Filled slots in rank order.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn has_capacity(&self) -> bool {
        !self.is_error() && self.slots.iter().any(Option::is_none)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.image_urls().any(|existing| existing == url)
    }

    /// Writes `url` into the first empty slot from the end chosen by
    /// `priority`. Returns `false` and leaves the array untouched when no
    /// slot is free or the result carries an error.
    pub fn add_image_url(&mut self, url: impl Into<String>, priority: Priority) -> bool {
        if self.is_error() {
            return false;
        }
        let free = match priority {
            Priority::High => self.slots.iter_mut().find(|slot| slot.is_none()),
            Priority::Low => self.slots.iter_mut().rev().find(|slot| slot.is_none()),
        };
        match free {
            Some(slot) => {
                *slot = Some(url.into());
                true
            }
            None => false,
        }
    }

    /// True when title and source URL are non-empty and at least one slot
    /// holds a non-empty URL.
    pub fn is_complete(&self) -> bool {
        let non_empty = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        non_empty(&self.title) && non_empty(&self.source_url) && self.slots.iter().any(non_empty)
    }
}

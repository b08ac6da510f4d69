use serde::{Deserialize, Serialize};

use crate::{ErrorCode, RankedResult};

/// Flat, serializable form of a [`RankedResult`] for handing across a
/// process boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub image_urls: Vec<Option<String>>,
    pub error_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    UnknownErrorCode(i32),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::UnknownErrorCode(code) => write!(f, "unknown error code {code}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<&RankedResult> for ResultRecord {
    fn from(result: &RankedResult) -> Self {
        Self {
            source_url: result.source_url.clone(),
            title: result.title.clone(),
            image_urls: result.slots.clone(),
            error_code: result.error.code(),
        }
    }
}

impl TryFrom<ResultRecord> for RankedResult {
    type Error = RecordError;

    fn try_from(record: ResultRecord) -> Result<Self, Self::Error> {
        let error = ErrorCode::from_code(record.error_code)
            .ok_or(RecordError::UnknownErrorCode(record.error_code))?;
        if error != ErrorCode::None {
            return Ok(RankedResult::failed(error));
        }
        Ok(RankedResult {
            source_url: record.source_url,
            title: record.title,
            slots: record.image_urls,
            error,
        })
    }
}

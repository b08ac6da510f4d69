//! Scout engine: page fetch, candidate discovery, concurrent probing and the
//! scrape pipeline that ties them together.
mod candidates;
mod decode;
mod engine;
mod fetch;
mod metadata;
mod probe;
mod probing;
mod scrape;
mod types;

pub use candidates::ImageUrlFinder;
pub use decode::{decode_page, DecodedPage};
pub use engine::{ScrapeHandle, ScrapeListener};
pub use fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use metadata::{extract_metadata, PageMetadata};
pub use probe::{ProbeSettings, Prober, ReqwestProber};
pub use probing::{ProbingEngine, SizeOrderedResults};
pub use scrape::{ImageScraper, ScrapeConfig, ScrapeRequest, DEFAULT_USER_AGENT};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ProbeResult};

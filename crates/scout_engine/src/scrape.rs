use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use scout_core::{ErrorCode, Priority, RankedResult};

use crate::candidates::ImageUrlFinder;
use crate::decode::decode_page;
use crate::fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
use crate::metadata::extract_metadata;
use crate::probe::{ProbeSettings, Prober, ReqwestProber};
use crate::probing::ProbingEngine;
use crate::FetchError;

pub const DEFAULT_USER_AGENT: &str = concat!("scout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub fetch: FetchSettings,
    pub probe: ProbeSettings,
    /// Used when a request does not name its own user agent.
    pub user_agent: String,
    /// Slot policy for images declared by metadata tags. `High` lets them
    /// outrank probe-confirmed images; `Low` back-fills them behind.
    pub declared_image_priority: Priority,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            probe: ProbeSettings::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            declared_image_priority: Priority::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub page_url: String,
    pub requested_images: usize,
    pub user_agent: Option<String>,
    /// Caller-known title; `og:title` overrides it.
    pub title: Option<String>,
}

impl ScrapeRequest {
    pub fn new(page_url: impl Into<String>, requested_images: usize) -> Self {
        Self {
            page_url: page_url.into(),
            requested_images,
            user_agent: None,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Runs the fetch, extract, probe, accumulate pipeline for one page.
#[derive(Clone)]
pub struct ImageScraper {
    fetcher: Arc<dyn PageFetcher>,
    engine: ProbingEngine,
    config: ScrapeConfig,
}

impl ImageScraper {
    /// Scraper backed by reqwest for both the page and the probes.
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestPageFetcher::new(config.fetch.clone()));
        let prober = Arc::new(ReqwestProber::new(config.probe.clone())?);
        Ok(Self::with_parts(config, fetcher, prober))
    }

    pub fn with_parts(
        config: ScrapeConfig,
        fetcher: Arc<dyn PageFetcher>,
        prober: Arc<dyn Prober>,
    ) -> Self {
        let engine = ProbingEngine::new(prober, config.probe.clone());
        Self {
            fetcher,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Produces the terminal result for `request`. Never fails: page fetch
    /// problems come back as an error code, probe problems as fewer images.
    pub async fn scrape(&self, request: &ScrapeRequest) -> RankedResult {
        let user_agent = request
            .user_agent
            .as_deref()
            .unwrap_or(&self.config.user_agent);
        engine_info!(
            "scrape started url={} requested={}",
            request.page_url,
            request.requested_images
        );

        let page = match self.fetcher.fetch(&request.page_url, user_agent).await {
            Ok(page) => page,
            Err(err) => {
                engine_warn!("page fetch failed url={} error={}", request.page_url, err);
                return RankedResult::failed(err.error_code());
            }
        };
        if page.bytes.is_empty() {
            return RankedResult::failed(ErrorCode::EmptyResponse);
        }

        let decoded = decode_page(&page.bytes, page.metadata.content_type.as_deref());
        if decoded.lossy {
            engine_debug!(
                "page decoded lossily as {} url={}",
                decoded.encoding_label,
                request.page_url
            );
        }
        let markup = decoded.markup;

        let mut output = RankedResult::new(
            request.page_url.clone(),
            request.title.clone(),
            request.requested_images,
        );

        let metadata = extract_metadata(&markup);
        let finder = ImageUrlFinder::for_page(&request.page_url, metadata.base_href.as_deref());

        if let Some(url) = metadata.url.as_deref() {
            output.set_source_url(url);
        }
        if let Some(title) = metadata.title.clone() {
            output.set_title(title);
        } else if output.title().map_or(true, str::is_empty) {
            if let Some(title) = metadata.document_title.clone() {
                output.set_title(title);
            }
        }

        for declared in &metadata.declared_images {
            let absolute = finder.make_absolute(declared);
            if output.contains(&absolute) {
                continue;
            }
            if !output.add_image_url(absolute, self.config.declared_image_priority) {
                break;
            }
        }

        let candidates = finder.find(&markup);
        engine_debug!(
            "found {} candidates, {} declared images",
            candidates.len(),
            metadata.declared_images.len()
        );

        if output.has_capacity() && !candidates.is_empty() {
            let probed = self.engine.probe(candidates, user_agent).await;
            for result in probed.into_iter().filter(|r| r.is_accepted()) {
                if output.contains(&result.url) {
                    continue;
                }
                if !output.add_image_url(result.url, Priority::High) {
                    break;
                }
            }
        }

        engine_info!(
            "scrape finished url={} images={}/{} complete={}",
            request.page_url,
            output.filled(),
            output.capacity(),
            output.is_complete()
        );
        output
    }
}

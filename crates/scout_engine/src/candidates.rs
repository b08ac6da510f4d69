//! Candidate image URL discovery from raw markup.
//!
//! The extension is the only part of an image URL with a known shape, so the
//! markup is reversed and the pattern anchors on the reversed extension,
//! then consumes URL characters leftward. Each match is reversed back before
//! resolution. Matching is case-sensitive: `.JPG` is not a candidate.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use scout_core::{base_path, root_path};

/// Reversed `jpg`/`jpeg`, a dot, a run of URL characters, and a final
/// character that may legally start a URL.
const REVERSED_JPEG_PATTERN: &str =
    r"(?:gpj|gepj)\.[a-zA-Z0-9\-._~:/?\[\]@!$&()*+,;=%]+[a-zA-Z0-9_/?]";

static REVERSED_JPEG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REVERSED_JPEG_PATTERN).expect("valid jpeg pattern"));

/// Finds JPEG URLs in markup and resolves them against a page's root and
/// base paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlFinder {
    root_url: String,
    base_url: String,
}

impl ImageUrlFinder {
    /// `root_url` is the page origin with a trailing slash; `base_url` is the
    /// directory relative references resolve against.
    pub fn new(root_url: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            base_url: base_url.into(),
        }
    }

    /// Derives root and base from the page URL. A `<base href>` from the
    /// document overrides the derived base; a relative one is resolved
    /// against the page URL first.
    pub fn for_page(page_url: &str, base_href: Option<&str>) -> Self {
        let base_url = base_href
            .map(|href| resolve_base_href(page_url, href))
            .unwrap_or_else(|| base_path(page_url));
        Self::new(root_path(page_url), base_url)
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every distinct absolute JPEG URL referenced in `markup`.
    pub fn find(&self, markup: &str) -> HashSet<String> {
        if markup.is_empty() {
            return HashSet::new();
        }
        let reversed: String = markup.chars().rev().collect();
        REVERSED_JPEG
            .find_iter(&reversed)
            .map(|found| {
                let raw: String = found.as_str().chars().rev().collect();
                self.make_absolute(&raw)
            })
            .collect()
    }

    /// Resolves a raw reference: scheme kept, `//` gets `http:`, `/` gets the
    /// root, anything else the base.
    pub fn make_absolute(&self, reference: &str) -> String {
        if has_scheme(reference) {
            reference.to_string()
        } else if reference.starts_with("//") {
            format!("http:{reference}")
        } else if let Some(rest) = reference.strip_prefix('/') {
            format!("{}{}", self.root_url, rest)
        } else {
            format!("{}{}", self.base_url, reference)
        }
    }
}

fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn resolve_base_href(page_url: &str, href: &str) -> String {
    let href = href.trim();
    let resolved = Url::parse(href)
        .or_else(|_| Url::parse(page_url).and_then(|page| page.join(href)))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string());
    base_path(&resolved)
}

use url::Url;

/// Origin of `page_url` with a trailing slash, e.g. `http://a.com/`.
///
/// Unparseable input falls back to everything before the first path slash.
pub fn root_path(page_url: &str) -> String {
    if let Ok(url) = Url::parse(page_url) {
        if let Ok(root) = url.join("/") {
            return root.into();
        }
    }
    let after_scheme = page_url.find("://").map_or(0, |idx| idx + 3);
    match page_url[after_scheme..].find('/') {
        Some(idx) => page_url[..after_scheme + idx + 1].to_string(),
        None => format!("{page_url}/"),
    }
}

/// Directory containing `page_url`, with a trailing slash.
///
/// Query and fragment are dropped. Unparseable input falls back to
/// everything up to the last slash.
pub fn base_path(page_url: &str) -> String {
    if let Ok(url) = Url::parse(page_url) {
        if let Ok(base) = url.join("./") {
            return base.into();
        }
    }
    match page_url.rfind('/') {
        Some(idx) => page_url[..=idx].to_string(),
        None => page_url.to_string(),
    }
}

use scraper::{ElementRef, Html, Selector};

/// Declarative page metadata found in the document head.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    /// `og:url`, else `<link rel="canonical">`.
    pub url: Option<String>,
    /// `og:title`.
    pub title: Option<String>,
    /// Text of the `<title>` element.
    pub document_title: Option<String>,
    /// Declared preview images in document order, as written in the markup.
    pub declared_images: Vec<String>,
    /// First `<base href>`.
    pub base_href: Option<String>,
}

const IMAGE_PROPERTIES: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
];

/// Scans markup once for OpenGraph/Twitter meta tags, canonical and
/// `image_src` links, `<base>` and `<title>`. Tags that are malformed or
/// unknown are skipped.
pub fn extract_metadata(markup: &str) -> PageMetadata {
    let mut metadata = PageMetadata::default();
    if markup.is_empty() {
        return metadata;
    }
    let Ok(selector) = Selector::parse("meta, link, base, title") else {
        return metadata;
    };

    let doc = Html::parse_document(markup);
    let mut canonical = None;
    for element in doc.select(&selector) {
        match element.value().name() {
            "meta" => visit_meta(element, &mut metadata),
            "link" => {
                let Some(href) = non_empty_attr(element, "href") else {
                    continue;
                };
                if has_rel(element, "image_src") {
                    push_declared(&mut metadata, href);
                }
                if has_rel(element, "canonical") && canonical.is_none() {
                    canonical = Some(href.to_string());
                }
            }
            "base" => {
                if metadata.base_href.is_none() {
                    metadata.base_href = non_empty_attr(element, "href").map(str::to_string);
                }
            }
            "title" => {
                if metadata.document_title.is_none() {
                    let text = element.text().collect::<String>().trim().to_string();
                    if !text.is_empty() {
                        metadata.document_title = Some(text);
                    }
                }
            }
            _ => {}
        }
    }

    if metadata.url.is_none() {
        metadata.url = canonical;
    }
    metadata
}

fn visit_meta(element: ElementRef, metadata: &mut PageMetadata) {
    let Some(property) = non_empty_attr(element, "property").or_else(|| non_empty_attr(element, "name"))
    else {
        return;
    };
    let Some(content) = non_empty_attr(element, "content") else {
        return;
    };

    // Later declarations win.
    match property {
        "og:url" => metadata.url = Some(content.to_string()),
        "og:title" => metadata.title = Some(content.to_string()),
        p if IMAGE_PROPERTIES.contains(&p) => push_declared(metadata, content),
        _ => {}
    }
}

fn push_declared(metadata: &mut PageMetadata, url: &str) {
    if !metadata.declared_images.iter().any(|existing| existing == url) {
        metadata.declared_images.push(url.to_string());
    }
}

fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn has_rel(element: ElementRef, rel: &str) -> bool {
    element
        .value()
        .attr("rel")
        .is_some_and(|value| value.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case(rel)))
}

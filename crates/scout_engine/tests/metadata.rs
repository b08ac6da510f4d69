use pretty_assertions::assert_eq;
use scout_engine::{extract_metadata, PageMetadata};

#[test]
fn open_graph_tags_are_collected_in_order() {
    let html = r#"<html><head>
        <title>Fallback title</title>
        <meta property="og:title" content="Story title">
        <meta property="og:url" content="http://a.com/story">
        <meta property="og:image" content="http://a.com/first.jpg">
        <meta content="/second.jpg" property="og:image">
        <meta name="twitter:image" content="http://cdn.a.com/third.jpg">
        <link rel="image_src" href="fourth.jpg">
    </head><body></body></html>"#;

    let metadata = extract_metadata(html);
    assert_eq!(
        metadata,
        PageMetadata {
            url: Some("http://a.com/story".into()),
            title: Some("Story title".into()),
            document_title: Some("Fallback title".into()),
            declared_images: vec![
                "http://a.com/first.jpg".into(),
                "/second.jpg".into(),
                "http://cdn.a.com/third.jpg".into(),
                "fourth.jpg".into(),
            ],
            base_href: None,
        }
    );
}

#[test]
fn repeated_declared_images_are_kept_once() {
    let html = r#"<head>
        <meta property="og:image" content="http://a.com/pic.jpg">
        <meta property="og:image:url" content="http://a.com/pic.jpg">
    </head>"#;
    assert_eq!(
        extract_metadata(html).declared_images,
        vec!["http://a.com/pic.jpg".to_string()]
    );
}

#[test]
fn canonical_link_fills_in_missing_og_url() {
    let html = r#"<head><link rel="canonical" href="http://a.com/canonical"></head>"#;
    assert_eq!(extract_metadata(html).url.as_deref(), Some("http://a.com/canonical"));

    let both = r#"<head>
        <link rel="canonical" href="http://a.com/canonical">
        <meta property="og:url" content="http://a.com/og">
    </head>"#;
    assert_eq!(extract_metadata(both).url.as_deref(), Some("http://a.com/og"));
}

#[test]
fn base_href_is_reported() {
    let html = r#"<head><base href="http://static.a.com/"><base href="/ignored/"></head>"#;
    assert_eq!(
        extract_metadata(html).base_href.as_deref(),
        Some("http://static.a.com/")
    );
}

#[test]
fn malformed_and_unknown_tags_are_ignored() {
    let html = r#"<head>
        <meta property="og:image">
        <meta property="og:image" content="   ">
        <meta content="http://a.com/orphan.jpg">
        <meta property="og:description" content="words">
        <meta property="og:title" content="">
        <link rel="image_src">
    </head>"#;
    assert_eq!(extract_metadata(html), PageMetadata::default());
}

#[test]
fn empty_markup_yields_default() {
    assert_eq!(extract_metadata(""), PageMetadata::default());
}

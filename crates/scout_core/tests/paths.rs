use scout_core::{base_path, root_path};

#[test]
fn root_path_keeps_scheme_host_and_port() {
    assert_eq!(root_path("http://a.com/x/page.html"), "http://a.com/");
    assert_eq!(root_path("https://a.com:8443/x/y?q=1"), "https://a.com:8443/");
    assert_eq!(root_path("http://a.com"), "http://a.com/");
}

#[test]
fn base_path_is_the_containing_directory() {
    assert_eq!(base_path("http://a.com/x/page.html"), "http://a.com/x/");
    assert_eq!(base_path("http://a.com/x/"), "http://a.com/x/");
    assert_eq!(base_path("http://a.com/x/page.html?next=/y/z"), "http://a.com/x/");
    assert_eq!(base_path("http://a.com"), "http://a.com/");
}

#[test]
fn unparseable_urls_fall_back_to_slash_positions() {
    assert_eq!(root_path("a.com/x/page.html"), "a.com/");
    assert_eq!(base_path("a.com/x/page.html"), "a.com/x/");
    assert_eq!(base_path("page.html"), "page.html");
}

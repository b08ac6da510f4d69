use scout_engine::decode_page;

#[test]
fn charset_parameter_selects_encoding() {
    let decoded = decode_page(b"caf\xe9", Some("text/html; Charset=\"ISO-8859-1\""));
    assert_eq!(decoded.markup, "café");
    assert!(!decoded.lossy);
}

#[test]
fn bom_wins_over_header() {
    let decoded = decode_page(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.markup, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn malformed_bytes_are_replaced_not_rejected() {
    let decoded = decode_page(b"<img src=\"/a\xff.jpg\">", Some("text/html; charset=utf-8"));
    assert!(decoded.lossy);
    assert!(decoded.markup.contains('\u{FFFD}'));
}

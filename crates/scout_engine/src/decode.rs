use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub markup: String,
    pub encoding_label: String,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

/// Decode page bytes as text: BOM, then Content-Type charset, then chardetng.
///
/// Never fails. A few unmappable bytes must not cost us the whole page, so
/// malformed sequences are replaced and flagged instead.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_param)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedPage {
        markup: text.into_owned(),
        encoding_label: used.name().to_string(),
        lossy: had_errors,
    }
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

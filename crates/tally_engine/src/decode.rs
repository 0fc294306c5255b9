use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tally_logging::tally_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
    /// Some input bytes were invalid and came out as U+FFFD.
    pub had_replacements: bool,
}

/// Decode fetched bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// A leading BOM is dropped from the returned text. Malformed sequences are
/// replaced with U+FFFD rather than failing the document.
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> DecodedText {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_param) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (name, value) = part.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedText {
    let (text, actual, had_errors) = enc.decode(bytes);
    if had_errors {
        tally_warn!(
            "Input is not valid {}; malformed bytes were replaced",
            actual.name()
        );
    }
    DecodedText {
        text: text.into_owned(),
        encoding_label: actual.name().to_string(),
        had_replacements: had_errors,
    }
}

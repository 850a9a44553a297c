use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Bytes scanned for a `<meta charset>` declaration.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("body is not valid {encoding}")]
pub struct DecodeError {
    pub encoding: String,
}

/// Decode a page body to UTF-8.
///
/// Precedence: byte order mark, `Content-Type` charset, `<meta charset>` in the
/// head of the document, then statistical detection.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    let declared = content_type
        .and_then(header_charset)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = declared {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

/// Looks for `charset=` inside a `<meta` tag in the first bytes of the page.
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let value = value.trim_start_matches(['"', '\'', ' ']);
        let end = value
            .find(|c: char| matches!(c, '"' | '\'' | ';' | ' ' | '/' | '>'))
            .unwrap_or(value.len());
        let label = &value[..end];
        (!label.is_empty()).then(|| label.to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_is_found_case_insensitively() {
        assert_eq!(
            header_charset("text/html; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(header_charset("text/html"), None);
    }

    #[test]
    fn meta_charset_is_prescanned() {
        let page = br#"<html><head><meta charset="windows-1252"><title>x</title>"#;
        assert_eq!(meta_charset(page), Some("windows-1252".to_string()));

        let http_equiv =
            br#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-1">"#;
        assert_eq!(meta_charset(http_equiv), Some("iso-8859-1".to_string()));

        assert_eq!(meta_charset(b"<html><body>nothing</body></html>"), None);
    }
}

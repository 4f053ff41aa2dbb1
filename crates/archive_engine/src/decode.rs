use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode a fetched page into UTF-8: BOM -> Content-Type charset -> chardetng
/// guess. Substack serves UTF-8 in practice, so the later steps are fallbacks.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(header_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        } else {
            None
        }
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
        });
    }
    Ok(DecodedPage {
        text: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

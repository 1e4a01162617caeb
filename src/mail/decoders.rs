use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use log::debug;

use crate::domain::email::{Email, Header};
use crate::mail::provider::{DecodeMode, METADATA_HEADERS, MessagePart, RawMessage};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Turn a raw provider record into an [`Email`]. Never fails: absent pieces
/// become empty fields.
pub fn decode_message(raw: &RawMessage, mode: DecodeMode) -> Email {
    let payload = raw.payload.as_ref();

    let headers = payload
        .and_then(|p| p.headers.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|h| mode == DecodeMode::Full || METADATA_HEADERS.contains(&h.name.as_str()))
        .map(|h| Header::new(h.name.clone(), decode_mime_words(&h.value)))
        .collect();

    let body_text = match mode {
        DecodeMode::Metadata => None,
        DecodeMode::Full => Some(payload.map(extract_body).unwrap_or_default()),
    };

    Email {
        id: raw.id.clone(),
        snippet: raw.snippet.clone().unwrap_or_default(),
        headers,
        internal_date: raw.internal_date.clone(),
        body_text,
    }
}

/// First part's body, else the top-level body, else empty.
fn extract_body(payload: &MessagePart) -> String {
    let first_part = payload
        .parts
        .as_ref()
        .and_then(|parts| parts.first())
        .and_then(|p| p.body.as_ref())
        .and_then(|b| b.data.as_deref());
    let top_level = payload.body.as_ref().and_then(|b| b.data.as_deref());

    match first_part.or(top_level) {
        Some(data) => decode_body_data(data),
        None => String::new(),
    }
}

/// Decode a base64 body payload (URL-safe or standard alphabet, padding
/// optional) into UTF-8 text. Malformed input yields an empty string.
pub fn decode_body_data(data: &str) -> String {
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = URL_SAFE_LENIENT
        .decode(&compact)
        .or_else(|_| STANDARD_LENIENT.decode(&compact));
    match bytes {
        Ok(b) => String::from_utf8_lossy(&b).into_owned(),
        Err(e) => {
            debug!("body payload is not valid base64 ({e}); using empty body");
            String::new()
        }
    }
}

/// Decode RFC 2047 encoded-words (`=?UTF-8?B?...?=`) in a header value.
/// Values without encoded-words are returned untouched.
pub fn decode_mime_words(raw: &str) -> String {
    if !raw.contains("=?") {
        return raw.to_string();
    }
    // mailparse expects a full "Key: value" header line
    let mut line = b"X: ".to_vec();
    line.extend_from_slice(raw.as_bytes());
    line.extend_from_slice(b"\r\n");

    match mailparse::parse_header(&line) {
        Ok((h, _idx)) => h.get_value(),
        Err(_) => raw.to_string(),
    }
}

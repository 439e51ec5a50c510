//! Inline contact photos.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use rehber_rfc::rfc::vcard::core::names;
use rehber_rfc::rfc::vcard::{VCard, VCardProperty, VCardValue};

/// A photo carried inside the vCard rather than linked by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedPhoto {
    /// `image/jpeg`, `image/png`, ... when it could be determined.
    pub mime_type: Option<String>,
    /// The image bytes, base64 encoded (standard alphabet, padded).
    pub data_base64: String,
}

/// ## Summary
/// Returns the first inline photo of a card.
///
/// Handles `ENCODING=b`/`BASE64` values and `data:` URIs. The MIME type is
/// sniffed from the image's magic bytes, falling back to the `MEDIATYPE` or
/// `TYPE` parameter (or the data URI header).
#[must_use]
pub fn embedded_photo(card: &VCard) -> Option<EmbeddedPhoto> {
    card.get_properties(names::PHOTO)
        .into_iter()
        .find_map(photo_from_property)
}

fn photo_from_property(prop: &VCardProperty) -> Option<EmbeddedPhoto> {
    match &prop.value {
        VCardValue::Binary(bytes) => Some(EmbeddedPhoto {
            mime_type: sniff_mime(bytes)
                .map(String::from)
                .or_else(|| declared_mime(prop)),
            data_base64: STANDARD.encode(bytes),
        }),
        VCardValue::Uri(uri) => photo_from_data_uri(uri),
        _ => None,
    }
}

/// Parses `data:[<mediatype>][;base64],<data>`; only base64 payloads count.
fn photo_from_data_uri(uri: &str) -> Option<EmbeddedPhoto> {
    let rest = uri.trim().strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;

    let bytes = STANDARD.decode(data.trim()).ok()?;
    let declared = (!media_type.is_empty()).then(|| media_type.to_ascii_lowercase());

    Some(EmbeddedPhoto {
        mime_type: sniff_mime(&bytes).map(String::from).or(declared),
        data_base64: STANDARD.encode(&bytes),
    })
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else {
        None
    }
}

fn declared_mime(prop: &VCardProperty) -> Option<String> {
    if let Some(media_type) = prop.get_param_value("MEDIATYPE") {
        return Some(media_type.to_ascii_lowercase());
    }

    prop.type_values().into_iter().find_map(|kind| {
        let kind = kind.to_ascii_lowercase();
        match kind.as_str() {
            "jpeg" | "jpg" => Some("image/jpeg".to_string()),
            "png" | "gif" | "bmp" | "tiff" | "webp" => Some(format!("image/{kind}")),
            _ if kind.starts_with("image/") => Some(kind),
            _ => None,
        }
    })
}

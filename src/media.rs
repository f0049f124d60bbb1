//! Media types used for content negotiation.
//!
//! Types are plain [`mime::Mime`] values; this module only adds the handful
//! of helpers the builder needs to turn them into header values.

pub use mime::Mime as MediaType;

pub use mime::{
    APPLICATION_JSON, APPLICATION_OCTET_STREAM, APPLICATION_WWW_FORM_URLENCODED, TEXT_HTML,
    TEXT_HTML_UTF_8, TEXT_PLAIN, TEXT_PLAIN_UTF_8, TEXT_XML,
};

/// `application/xml`, which `mime` has no constant for.
pub fn application_xml() -> MediaType {
    "application/xml".parse().unwrap_or(mime::TEXT_XML)
}

/// Render an `Accept` header value. `None` means "accept anything".
pub fn accept_header(types: &[MediaType]) -> Option<String> {
    if types.is_empty() {
        return None;
    }
    Some(
        types
            .iter()
            .map(|media_type| media_type.as_ref())
            .collect::<Vec<&str>>()
            .join(", "),
    )
}

/// Whether the body of this media type is JSON (`application/json` or `+json`).
pub fn is_json(media_type: &MediaType) -> bool {
    (media_type.type_() == mime::APPLICATION && media_type.subtype() == mime::JSON)
        || media_type.suffix().is_some_and(|suffix| suffix == mime::JSON)
}

/// Whether the body is XML: `application/xml`, `text/xml` or a `+xml` type.
pub fn is_xml(media_type: &MediaType) -> bool {
    media_type.subtype() == mime::XML
        || media_type.suffix().is_some_and(|suffix| suffix == mime::XML)
}

/// Whether this is `application/x-www-form-urlencoded`.
pub fn is_form(media_type: &MediaType) -> bool {
    media_type.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
}

/// The `charset` parameter, if the media type declares one.
pub fn charset(media_type: &MediaType) -> Option<&str> {
    media_type.get_param(mime::CHARSET).map(|c| c.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_header_joins_in_order() {
        assert_eq!(accept_header(&[]), None);
        assert_eq!(
            accept_header(&[APPLICATION_JSON, TEXT_PLAIN]),
            Some("application/json, text/plain".to_string())
        );
    }

    #[test]
    fn json_detection_covers_suffixes() {
        assert!(is_json(&APPLICATION_JSON));
        let problem: MediaType = "application/problem+json".parse().expect("mime");
        assert!(is_json(&problem));
        assert!(!is_json(&TEXT_PLAIN));
    }

    #[test]
    fn xml_detection_covers_suffixes() {
        assert!(is_xml(&application_xml()));
        assert!(is_xml(&TEXT_XML));
        let atom: MediaType = "application/atom+xml".parse().expect("mime");
        assert!(is_xml(&atom));
        assert!(!is_xml(&APPLICATION_JSON));
    }

    #[test]
    fn charset_is_read_from_params() {
        let media_type: MediaType = "text/plain; charset=ISO-8859-1".parse().expect("mime");
        assert!(charset(&media_type).is_some_and(|c| c.eq_ignore_ascii_case("iso-8859-1")));
        assert_eq!(charset(&TEXT_PLAIN), None);
    }

    #[test]
    fn application_xml_parses() {
        assert_eq!(application_xml().essence_str(), "application/xml");
    }
}

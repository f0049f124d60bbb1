//! Outgoing request payloads

use bytes::Bytes;
use serde::Serialize;

use crate::error::{RestError, Result};
use crate::media::{self, MediaType};

/// The body of a PUT or POST request.
///
/// The builder never looks inside an entity; it only forwards the bytes and,
/// when no request type was negotiated, the media type hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    body: Bytes,
    media_type: Option<MediaType>,
}

impl Entity {
    /// Raw bytes with no media type hint.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            media_type: None,
        }
    }

    pub fn bytes(body: impl Into<Bytes>, media_type: MediaType) -> Self {
        Self {
            body: body.into(),
            media_type: Some(media_type),
        }
    }

    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let body =
            serde_json::to_vec(value).map_err(|e| RestError::Serialization(e.to_string()))?;
        Ok(Self::bytes(body, media::APPLICATION_JSON))
    }

    pub fn form<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let body = serde_urlencoded::to_string(value)
            .map_err(|e| RestError::Serialization(e.to_string()))?;
        Ok(Self::bytes(body, media::APPLICATION_WWW_FORM_URLENCODED))
    }

    /// Serialize `value` as an XML document whose root element is named
    /// after the type.
    pub fn xml<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let body =
            quick_xml::se::to_string(value).map_err(|e| RestError::Serialization(e.to_string()))?;
        Ok(Self::bytes(body, media::application_xml()))
    }

    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::bytes(body, media::TEXT_PLAIN_UTF_8)
    }

    pub fn html(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::bytes(body, media::TEXT_HTML_UTF_8)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.media_type.as_ref()
    }
}

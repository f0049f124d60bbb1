//! HTTP response handling and body decoding

use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::{value::StringDeserializer, DeserializeOwned, IntoDeserializer};
use std::borrow::Cow;

use crate::error::{RestError, Result, TransportError};
use crate::media::{self, MediaType};

/// A completed HTTP response with its body fully read.
///
/// Any status is a valid response; a 404 or 500 is returned here just like a
/// 200 and it is up to the caller to look at [`Response::status`].
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Read a reqwest response to the end.
    pub async fn from_reqwest(
        response: reqwest::Response,
    ) -> std::result::Result<Self, TransportError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self::new(status, headers, body))
    }

    /// Set the `Content-Type` header.
    pub fn with_content_type(mut self, media_type: &MediaType) -> Self {
        if let Ok(value) = HeaderValue::from_str(media_type.as_ref()) {
            self.headers.insert(CONTENT_TYPE, value);
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The declared media type, if present and parseable.
    pub fn content_type(&self) -> Option<MediaType> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// The body decoded with the declared charset, UTF-8 when none is given.
    /// Malformed sequences are replaced rather than rejected.
    pub fn text(&self) -> Cow<'_, str> {
        let encoding = self
            .content_type()
            .as_ref()
            .and_then(media::charset)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.body);
        text
    }

    /// Parse the body as JSON whatever the declared type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        BodyDecoder::Json.decode(self)
    }

    /// Decode the body into `T` with the decoder chosen by `Content-Type`.
    pub fn read_entity<T: DeserializeOwned>(&self) -> Result<T> {
        BodyDecoder::for_media_type(self.content_type().as_ref()).decode(self)
    }
}

/// How a response body becomes a typed value.
///
/// One decoder per media type family; [`BodyDecoder::for_media_type`] picks
/// one from the response's `Content-Type` at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyDecoder {
    /// `application/json` and `+json` types
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `application/xml`, `text/xml` and `+xml` types; the root element
    /// maps onto `T` and its children onto fields
    Xml,
    /// Everything else: the decoded text handed to `T` as a string
    Text,
}

impl BodyDecoder {
    /// A missing `Content-Type` is treated as JSON.
    pub fn for_media_type(media_type: Option<&MediaType>) -> Self {
        match media_type {
            None => BodyDecoder::Json,
            Some(m) if media::is_json(m) => BodyDecoder::Json,
            Some(m) if media::is_form(m) => BodyDecoder::Form,
            Some(m) if media::is_xml(m) => BodyDecoder::Xml,
            Some(_) => BodyDecoder::Text,
        }
    }

    pub fn decode<T: DeserializeOwned>(self, response: &Response) -> Result<T> {
        let decoded = match self {
            BodyDecoder::Json => {
                serde_json::from_slice(response.bytes()).map_err(|e| e.to_string())
            }
            BodyDecoder::Form => {
                serde_urlencoded::from_bytes(response.bytes()).map_err(|e| e.to_string())
            }
            BodyDecoder::Xml => {
                quick_xml::de::from_str(&response.text()).map_err(|e| e.to_string())
            }
            BodyDecoder::Text => {
                let text: StringDeserializer<serde::de::value::Error> =
                    response.text().into_owned().into_deserializer();
                T::deserialize(text).map_err(|e| e.to_string())
            }
        };

        decoded.map_err(|message| RestError::Deserialization {
            media_type: response
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "unspecified".to_string()),
            message,
        })
    }
}

#[cfg(test)]
mod tests;

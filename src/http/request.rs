//! The resolved request a transport executes

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::config::HttpMethod;
use crate::cookie::{self, Cookie};
use crate::entity::Entity;
use crate::error::{RestError, Result};
use crate::media::{self, MediaType};

/// One HTTP exchange, fully resolved from a builder's state.
///
/// This is what a [`Transport`](super::Transport) receives: the URL, method,
/// the builder's headers and cookies, both negotiation lists and the entity
/// for PUT/POST.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<Cookie>,
    pub accept_types: Vec<MediaType>,
    pub request_types: Vec<MediaType>,
    pub entity: Option<Entity>,
}

impl Exchange {
    /// The `Content-Type` to send: the first negotiated request type, else the
    /// entity's own hint. Always `None` for GET and DELETE.
    pub fn content_type(&self) -> Option<&MediaType> {
        if !self.method.has_entity() {
            return None;
        }
        self.request_types
            .first()
            .or_else(|| self.entity.as_ref().and_then(Entity::media_type))
    }

    /// Every header of this exchange in wire order.
    ///
    /// `Accept` and `Content-Type` come first, then the builder's headers in
    /// insertion order, then one `Cookie` header with all cookies in append
    /// order (merged into a caller-set `Cookie` header if there is one).
    ///
    /// A negotiated `Accept` or `Content-Type` replaces a header of the same
    /// name set by hand; without negotiation the hand-set one is sent.
    pub fn wire_headers(&self) -> Vec<(String, String)> {
        let mut lines = Vec::with_capacity(self.headers.len() + 3);

        let accept = media::accept_header(&self.accept_types);
        let content_type = self.content_type().map(MediaType::to_string);
        let negotiated = |name: &str| {
            (accept.is_some() && name.eq_ignore_ascii_case("accept"))
                || (content_type.is_some() && name.eq_ignore_ascii_case("content-type"))
        };

        if let Some(accept) = &accept {
            lines.push(("Accept".to_string(), accept.clone()));
        }
        if let Some(content_type) = &content_type {
            lines.push(("Content-Type".to_string(), content_type.clone()));
        }

        let mut cookie_header = find_cookie_header(&self.headers).map(str::to_string);
        for (name, value) in &self.headers {
            if !name.eq_ignore_ascii_case("cookie") && !negotiated(name) {
                lines.push((name.clone(), value.clone()));
            }
        }

        if let Some(rendered) = cookie::cookies_to_header(&self.cookies) {
            cookie_header = Some(match cookie_header {
                Some(existing) => format!("{}; {}", existing, rendered),
                None => rendered,
            });
        }
        if let Some(value) = cookie_header {
            lines.push(("Cookie".to_string(), value));
        }

        lines
    }

    /// Check that every wire header is a legal HTTP header and every cookie
    /// name is a token, before anything is handed to a transport.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.cookies.iter().find(|c| !cookie::is_valid_name(&c.name)) {
            return Err(RestError::InvalidHeader(format!(
                "invalid cookie name '{}'",
                bad.name
            )));
        }
        for (name, value) in self.wire_headers() {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                RestError::InvalidHeader(format!("invalid header name '{}'", name))
            })?;
            HeaderValue::from_str(&value).map_err(|_| {
                RestError::InvalidHeader(format!("invalid value for header '{}'", name))
            })?;
        }
        Ok(())
    }
}

fn find_cookie_header(headers: &[(String, String)]) -> Option<&str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("cookie"))
        .map(|(_, value)| value.as_str())
}

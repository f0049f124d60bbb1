//! Immutable, fluent request builder
//!
//! A [`RequestBuilder`] accumulates a URL, headers, cookies and negotiation
//! settings. Every configuration call borrows the builder and returns a new
//! one, so a builder can be kept as a base and branched freely:
//!
//! ```no_run
//! use fluent_rest::{media, RequestBuilder};
//!
//! # async fn demo() -> fluent_rest::Result<()> {
//! let api = RequestBuilder::new("https://api.example.com/")?
//!     .accept([media::APPLICATION_JSON])
//!     .header("X-Client", "demo");
//!
//! let users = api.path(["users"]);
//! let orders = api.path(["orders"]).query("status", "open");
//!
//! let list: Vec<serde_json::Value> = users.get_as().await?;
//! let raw = orders.get().await?;
//! println!("{} users, orders -> {}", list.len(), raw.status());
//! # Ok(())
//! # }
//! ```
//!
//! Terminal calls (`get`, `put`, `post`, `delete` and their `_as` forms)
//! perform one exchange each and leave the builder untouched.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{HttpMethod, TransportConfig};
use crate::cookie::Cookie;
use crate::entity::Entity;
use crate::error::{RestError, Result};
use crate::http::auth::Auth;
use crate::http::{Exchange, ReqwestTransport, Response, Transport};
use crate::media::MediaType;

/// Persistent request state plus the transport that will execute it.
pub struct RequestBuilder<T: Transport = ReqwestTransport> {
    url: Url,
    headers: Vec<(String, String)>,
    cookies: Vec<Cookie>,
    request_types: Vec<MediaType>,
    accept_types: Vec<MediaType>,
    transport: Arc<T>,
}

impl RequestBuilder<ReqwestTransport> {
    /// A builder backed by a fresh `ReqwestTransport` with default settings.
    pub fn new(base_uri: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(TransportConfig::default())?;
        Self::with_transport(base_uri, Arc::new(transport))
    }
}

impl<T: Transport> RequestBuilder<T> {
    /// A builder that dispatches through a caller-supplied transport.
    ///
    /// The base URI must be an absolute `http` or `https` URL; anything else
    /// is rejected here rather than at dispatch time.
    pub fn with_transport(base_uri: &str, transport: Arc<T>) -> Result<Self> {
        let url = parse_base_uri(base_uri)?;
        Ok(Self {
            url,
            headers: Vec::new(),
            cookies: Vec::new(),
            request_types: Vec::new(),
            accept_types: Vec::new(),
            transport,
        })
    }

    /// Append path segments to the URL.
    ///
    /// `RequestBuilder::new("http://www.test.com/")?.path(["one", "two", "three"])`
    /// points at `http://www.test.com/one/two/three`. A segment containing
    /// `/` contributes several components; characters not allowed in a path
    /// are percent-encoded.
    ///
    /// `.` and `..` components are dropped, since a URL path cannot carry
    /// them as literal segments: `path(["a", "..", "b", "."])` appends `a/b`.
    pub fn path<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let components: Vec<String> = segments
            .into_iter()
            .flat_map(|segment| {
                segment
                    .as_ref()
                    .split('/')
                    .filter(|component| !component.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut url = self.url.clone();
        if !components.is_empty() {
            // with_transport only admits URLs that can be a base
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(&components);
            }
        }
        Self { url, ..self.clone() }
    }

    /// Append one query parameter. Repeated keys keep every value.
    pub fn query(&self, key: &str, value: &str) -> Self {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(key, value);
        Self { url, ..self.clone() }
    }

    /// Set a header, replacing any earlier value under the same name.
    ///
    /// Names and values are checked when a request is dispatched; an illegal
    /// one fails with [`RestError::InvalidHeader`] before anything is sent.
    pub fn header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        let mut headers = self.headers.clone();
        match headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => headers.push((name, value)),
        }
        Self {
            headers,
            ..self.clone()
        }
    }

    /// `Authorization: Basic ...`
    pub fn basic_auth(&self, username: &str, password: &str) -> Self {
        self.header("Authorization", Auth::basic_auth(username, password))
    }

    /// `Authorization: Bearer ...`
    pub fn bearer_auth(&self, token: &str) -> Self {
        self.header("Authorization", Auth::bearer_token(token))
    }

    /// Add a plain name/value cookie.
    pub fn cookie(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookie_with(Cookie::new(name, value))
    }

    /// Add a cookie, attributes included. Duplicates are kept.
    pub fn cookie_with(&self, cookie: Cookie) -> Self {
        let mut cookies = self.cookies.clone();
        cookies.push(cookie);
        Self {
            cookies,
            ..self.clone()
        }
    }

    /// Replace the media types used as `Content-Type` for PUT and POST.
    pub fn request<I>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = MediaType>,
    {
        Self {
            request_types: types.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Replace the media types sent as `Accept`.
    pub fn accept<I>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = MediaType>,
    {
        Self {
            accept_types: types.into_iter().collect(),
            ..self.clone()
        }
    }

    /// The URL built so far.
    pub fn current_path(&self) -> String {
        self.url.as_str().to_string()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn request_types(&self) -> &[MediaType] {
        &self.request_types
    }

    pub fn accept_types(&self) -> &[MediaType] {
        &self.accept_types
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Resolve the current state into the exchange a transport performs.
    pub fn exchange(&self, method: HttpMethod, entity: Option<Entity>) -> Exchange {
        Exchange {
            method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            cookies: self.cookies.clone(),
            accept_types: self.accept_types.clone(),
            request_types: self.request_types.clone(),
            entity,
        }
    }

    async fn dispatch(&self, method: HttpMethod, entity: Option<Entity>) -> Result<Response> {
        let exchange = self.exchange(method, entity);
        exchange.validate()?;
        Ok(self.transport.perform(exchange).await?)
    }

    /// Execute a GET request.
    pub async fn get(&self) -> Result<Response> {
        self.dispatch(HttpMethod::Get, None).await
    }

    /// Execute a GET request and decode the body, whatever the status.
    pub async fn get_as<R: DeserializeOwned>(&self) -> Result<R> {
        self.get().await?.read_entity()
    }

    /// Execute a PUT request.
    pub async fn put(&self, entity: Entity) -> Result<Response> {
        self.dispatch(HttpMethod::Put, Some(entity)).await
    }

    pub async fn put_as<R: DeserializeOwned>(&self, entity: Entity) -> Result<R> {
        self.put(entity).await?.read_entity()
    }

    /// Execute a POST request.
    pub async fn post(&self, entity: Entity) -> Result<Response> {
        self.dispatch(HttpMethod::Post, Some(entity)).await
    }

    pub async fn post_as<R: DeserializeOwned>(&self, entity: Entity) -> Result<R> {
        self.post(entity).await?.read_entity()
    }

    /// Execute a DELETE request.
    pub async fn delete(&self) -> Result<Response> {
        self.dispatch(HttpMethod::Delete, None).await
    }

    pub async fn delete_as<R: DeserializeOwned>(&self) -> Result<R> {
        self.delete().await?.read_entity()
    }
}

impl<T: Transport> Clone for RequestBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            headers: self.headers.clone(),
            cookies: self.cookies.clone(),
            request_types: self.request_types.clone(),
            accept_types: self.accept_types.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> fmt::Debug for RequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("request_types", &self.request_types)
            .field("accept_types", &self.accept_types)
            .finish_non_exhaustive()
    }
}

fn parse_base_uri(base_uri: &str) -> Result<Url> {
    let url = Url::parse(base_uri)
        .map_err(|e| RestError::InvalidUrl(format!("Invalid URL '{}': {}", base_uri, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RestError::InvalidUrl(format!(
            "Unsupported scheme '{}' in '{}'",
            url.scheme(),
            base_uri
        )));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(RestError::InvalidUrl(format!(
            "'{}' cannot carry path segments",
            base_uri
        )));
    }

    Ok(url)
}

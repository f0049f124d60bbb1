//! fluent-rest - an immutable, fluent REST request builder
//!
//! This crate provides [`RequestBuilder`], a persistent request description
//! that accumulates path segments, query parameters, headers, cookies and
//! content negotiation, then dispatches GET/PUT/POST/DELETE through a shared
//! [`Transport`](http::Transport) and optionally decodes the response body.

pub mod builder;
pub mod config;
pub mod cookie;
pub mod entity;
pub mod error;
pub mod http;
pub mod logging;
pub mod media;
pub mod ssl;

pub use builder::RequestBuilder;
pub use cookie::Cookie;
pub use entity::Entity;
pub use error::{RestError, Result, TransportError};
pub use http::{ReqwestTransport, Response, Transport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

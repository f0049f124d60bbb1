//! HTTP transport module
//!
//! A [`Transport`] performs exactly one exchange per call and owns every
//! connection concern (pooling, keep-alive, TLS, proxies, timeouts). The
//! default implementation, [`ReqwestTransport`], is a thin layer over a
//! shared `reqwest::Client`.

use std::future::Future;

use reqwest::{Client, ClientBuilder, Method};

use crate::config::TransportConfig;
use crate::error::{RestError, Result, TransportError};
use crate::ssl::SslUtils;

pub mod auth;
pub mod request;
pub mod response;

pub use request::Exchange;
pub use response::{BodyDecoder, Response};

/// The collaborator that actually talks to the network.
///
/// Implementations must be safe to call concurrently: every builder derived
/// from the same root shares one transport.
pub trait Transport: Send + Sync {
    fn perform(
        &self,
        exchange: Exchange,
    ) -> impl Future<Output = std::result::Result<Response, TransportError>> + Send;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given configuration
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(config.max_redirects as usize)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        // Configure proxy if specified
        if let Some(proxy_config) = &config.proxy {
            let proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| RestError::Proxy(format!("Invalid proxy: {}", e)))?;

            let proxy = if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy.basic_auth(username, password)
            } else {
                proxy
            };

            builder = builder.proxy(proxy);
        }

        let builder = SslUtils::configure(builder, &config.ssl)?;
        let client = builder
            .build()
            .map_err(|e| RestError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Transport for ReqwestTransport {
    async fn perform(&self, exchange: Exchange) -> std::result::Result<Response, TransportError> {
        let mut request = self
            .client
            .request(Method::from(exchange.method), exchange.url.clone());

        for (name, value) in exchange.wire_headers() {
            request = request.header(name, value);
        }

        if let Some(entity) = &exchange.entity {
            request = request.body(entity.body().clone());
        }

        log::debug!("> {} {}", exchange.method, exchange.url);
        let response = self.client.execute(request.build()?).await?;
        log::debug!("< {} {}", response.status(), exchange.url);

        Response::from_reqwest(response).await
    }
}

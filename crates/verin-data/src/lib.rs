//! HTTP client and storefront API bindings for Verin.
//!
//! [`FetchClient`] is a small builder-style wrapper over `reqwest` with a
//! base URL and default headers. [`StorefrontApi`] uses it to speak the
//! storefront's REST routes and implements
//! [`OrderGateway`](verin_commerce::checkout::OrderGateway) for checkout.
//!
//! # Example
//!
//! ```rust,no_run
//! use verin_commerce::listing::ProductQuery;
//! use verin_data::{HttpConfig, SiteConfig, StorefrontApi};
//!
//! # async fn run() -> Result<(), verin_data::FetchError> {
//! let api = StorefrontApi::new(SiteConfig::for_tenant("verin"), &HttpConfig::default())?;
//!
//! let page = api.products(&ProductQuery::new().featured().with_limit(4)).await?;
//! for product in &page.results {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod endpoints;
mod error;
mod request;
mod response;
mod site;

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

pub use api::StorefrontApi;
pub use endpoints::Endpoint;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use site::{HttpConfig, SiteConfig, DEFAULT_TENANT};

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client with default transport settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client with the given timeout and user agent.
    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a request.
    ///
    /// Relative URLs are appended to the base URL; absolute ones are used as is.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Append query parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as responses; see
    /// [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.resolve_url()?;
        let method = self.builder.method;
        debug!(method = method.as_str(), url = %url, "sending request");

        let mut request = self.http.request(method.into(), url);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = Response::read(request.send().await?).await?;
        debug!(
            status = response.status,
            content_type = response.header("content-type").unwrap_or("-"),
            "received response"
        );
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Endpoint, FetchClient, FetchError, HttpConfig, Method, Response, SiteConfig,
        StorefrontApi,
    };
}

//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A transport-independent description of an HTTP request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append query parameters, keeping their order.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// The method this request will use.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute URL with query parameters encoded.
    pub fn resolve_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_with_query() {
        let request = RequestBuilder::new(Method::Get, "https://shop.test/api/product/")
            .query([("category", "linen shirts"), ("page", "2")]);

        let url = request.resolve_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.test/api/product/?category=linen+shirts&page=2"
        );
    }

    #[test]
    fn test_resolve_url_without_query() {
        let url = RequestBuilder::new(Method::Get, "https://shop.test/api/faq/")
            .resolve_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://shop.test/api/faq/");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_resolve_url_invalid() {
        let err = RequestBuilder::new(Method::Get, "/api/faq/")
            .resolve_url()
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(msg) if msg.contains("/api/faq/")));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "https://shop.test/api/order/")
            .json(&serde_json::json!({"email": "a@b.co"}))
            .unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(br#"{"email":"a@b.co"}"#.as_slice()));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Post), reqwest::Method::POST);
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(Method::Post.as_str(), "POST");
    }
}

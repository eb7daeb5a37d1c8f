//! Site and transport settings.

use serde::{Deserialize, Serialize};
use verin_commerce::Currency;

/// Tenant used when none is configured.
pub const DEFAULT_TENANT: &str = "verin";

/// Which storefront to talk to and how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Display name.
    pub name: String,
    /// Tenant slug; both default base URLs derive from it.
    pub tenant: String,
    /// Overrides the tenant API host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Overrides the tenant media location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_base_url: Option<String>,
    /// Currency prices are shown in.
    pub currency: Currency,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Verin".to_string(),
            tenant: DEFAULT_TENANT.to_string(),
            api_base_url: None,
            media_base_url: None,
            currency: Currency::USD,
        }
    }
}

impl SiteConfig {
    /// Create settings for a tenant with default hosts.
    pub fn for_tenant(tenant: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            ..Self::default()
        }
    }

    /// Point the API at an explicit base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Point media lookups at an explicit base URL.
    pub fn with_media_base_url(mut self, url: impl Into<String>) -> Self {
        self.media_base_url = Some(url.into());
        self
    }

    /// Effective API base URL, without a trailing slash.
    pub fn api_base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.nepdora.baliyoventures.com", self.tenant),
        }
    }

    /// Effective media base URL, without a trailing slash.
    pub fn media_base_url(&self) -> String {
        match &self.media_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://nepdora.baliyoventures.com/media/workspaces/{}/public",
                self.tenant
            ),
        }
    }

    /// Resolve an image path from the API to a URL.
    ///
    /// Empty paths stay empty and absolute `http` URLs pass through.
    pub fn image_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http") {
            return path.to_string();
        }
        format!("{}/{}", self.media_base_url(), path.trim_start_matches('/'))
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("verin/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts_follow_tenant() {
        let site = SiteConfig::for_tenant("aurora");
        assert_eq!(site.api_base_url(), "https://aurora.nepdora.baliyoventures.com");
        assert_eq!(
            site.media_base_url(),
            "https://nepdora.baliyoventures.com/media/workspaces/aurora/public"
        );
    }

    #[test]
    fn test_explicit_hosts_drop_trailing_slash() {
        let site = SiteConfig::default()
            .with_api_base_url("http://localhost:8000/")
            .with_media_base_url("http://localhost:8000/media/");
        assert_eq!(site.api_base_url(), "http://localhost:8000");
        assert_eq!(site.media_base_url(), "http://localhost:8000/media");
    }

    #[test]
    fn test_image_url() {
        let site = SiteConfig::default().with_media_base_url("https://cdn.test/public");

        assert_eq!(site.image_url(""), "");
        assert_eq!(
            site.image_url("https://img.test/a.jpg"),
            "https://img.test/a.jpg"
        );
        assert_eq!(
            site.image_url("products/shirt.jpg"),
            "https://cdn.test/public/products/shirt.jpg"
        );
        assert_eq!(
            site.image_url("/products/shirt.jpg"),
            "https://cdn.test/public/products/shirt.jpg"
        );
    }

    #[test]
    fn test_partial_toml_like_input_uses_defaults() {
        let site: SiteConfig = serde_json::from_str(r#"{"tenant": "aurora"}"#).unwrap();
        assert_eq!(site.name, "Verin");
        assert_eq!(site.currency, Currency::USD);
        assert_eq!(site.api_base_url, None);

        let http: HttpConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(http.timeout_secs, 5);
        assert!(http.user_agent.starts_with("verin/"));
    }
}

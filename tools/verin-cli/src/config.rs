//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use verin_commerce::cart::CART_STORAGE_KEY;
use verin_data::{HttpConfig, SiteConfig};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["verin.toml", ".verin.toml", "verin.json"];

/// Environment variables that override file settings.
pub const ENV_API_URL: &str = "VERIN_API_URL";
pub const ENV_MEDIA_URL: &str = "VERIN_MEDIA_URL";
pub const ENV_TENANT: &str = "VERIN_TENANT";
pub const ENV_STORAGE_DIR: &str = "VERIN_STORAGE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront being browsed.
    #[serde(default)]
    pub site: SiteConfig,

    /// Transport settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Where the cart is kept between runs.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `VERIN_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`; blank values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.site.api_base_url = Some(url);
        }
        if let Some(url) = get(ENV_MEDIA_URL) {
            self.site.media_base_url = Some(url);
        }
        if let Some(tenant) = get(ENV_TENANT) {
            self.site.tenant = tenant;
        }
        if let Some(dir) = get(ENV_STORAGE_DIR) {
            self.storage.dir = Some(PathBuf::from(dir));
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for stored state (default: `~/.local/share/verin`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            cart_key: default_cart_key(),
        }
    }
}

impl StorageConfig {
    /// The storage directory, falling back to the user data directory.
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => data_dir().join("verin"),
        }
    }
}

fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Find a config file in `start` or one of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Generate a default verin.toml config file.
pub fn generate_default_config(tenant: &str) -> String {
    format!(
        r#"# Verin storefront configuration

[site]
name = "Verin"
tenant = "{tenant}"
currency = "USD"
# api_base_url = "https://{tenant}.nepdora.baliyoventures.com"
# media_base_url = "https://nepdora.baliyoventures.com/media/workspaces/{tenant}/public"

[http]
timeout_secs = 30

[storage]
# dir = "~/.local/share/verin"
cart_key = "{cart_key}"
"#,
        tenant = tenant,
        cart_key = CART_STORAGE_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use verin_commerce::Currency;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("aurora")).unwrap();
        assert_eq!(config.site.tenant, "aurora");
        assert_eq!(config.site.currency, Currency::USD);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.storage.cart_key, "verin_cart");
        assert_eq!(config.storage.dir, None);
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [site]
            tenant = "aurora"
            currency = "NPR"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.name, "Verin");
        assert_eq!(config.site.currency, Currency::NPR);
        assert_eq!(config.http, HttpConfig::default());
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("verin.toml");
        std::fs::write(&toml_path, "[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(CliConfig::load(&toml_path).unwrap().http.timeout_secs, 5);

        let json_path = dir.path().join("verin.json");
        std::fs::write(&json_path, r#"{"site": {"tenant": "aurora"}}"#).unwrap();
        assert_eq!(CliConfig::load(&json_path).unwrap().site.tenant, "aurora");
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verin.toml");
        std::fs::write(&path, "[site\n").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verin.toml");

        let mut config = CliConfig::default();
        config.site.tenant = "aurora".into();
        config.storage.dir = Some(dir.path().join("state"));
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config.apply_env_with(|name| match name {
            ENV_API_URL => Some("http://localhost:8000".into()),
            ENV_TENANT => Some("aurora".into()),
            ENV_STORAGE_DIR => Some("/tmp/verin-test".into()),
            ENV_MEDIA_URL => Some("   ".into()),
            _ => None,
        });

        assert_eq!(config.site.api_base_url(), "http://localhost:8000");
        assert_eq!(config.site.tenant, "aurora");
        assert_eq!(config.site.media_base_url, None);
        assert_eq!(
            config.storage.resolve_dir(),
            PathBuf::from("/tmp/verin-test")
        );
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_config_file(&nested), None);

        std::fs::write(root.path().join(".verin.toml"), "").unwrap();
        assert_eq!(
            find_config_file(&nested),
            Some(root.path().join(".verin.toml"))
        );

        std::fs::write(nested.join("verin.json"), "{}").unwrap();
        assert_eq!(find_config_file(&nested), Some(nested.join("verin.json")));
    }
}

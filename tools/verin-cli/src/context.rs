//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use verin_cache::FileStore;
use verin_commerce::cart::CartStore;
use verin_data::StorefrontApi;

use crate::config::{find_config_file, CliConfig};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file plus environment).
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from the given or discovered config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        config.apply_env();
        debug!(config = ?config_path, api = %config.site.api_base_url(), "loaded configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Client for the configured storefront.
    pub fn api(&self) -> Result<StorefrontApi> {
        StorefrontApi::new(self.config.site.clone(), &self.config.http)
            .context("Failed to create HTTP client")
    }

    /// Open the persisted cart. Call `close` on it when done.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.config.storage.resolve_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        Ok(CartStore::open_with(
            storage,
            self.config.storage.cart_key.clone(),
            self.config.site.currency,
        ))
    }
}

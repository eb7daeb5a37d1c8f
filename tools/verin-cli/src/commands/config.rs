//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let source = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": source,
            "config": config,
            "effective": {
                "api_base_url": config.site.api_base_url(),
                "media_base_url": config.site.media_base_url(),
                "storage_dir": config.storage.resolve_dir(),
            },
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("source", &source);

    ctx.output.text("");
    ctx.output.info("[site]");
    ctx.output.kv("name", &config.site.name);
    ctx.output.kv("tenant", &config.site.tenant);
    ctx.output.kv("currency", config.site.currency.code());
    ctx.output.kv("api_base_url", &config.site.api_base_url());
    ctx.output.kv("media_base_url", &config.site.media_base_url());

    ctx.output.text("");
    ctx.output.info("[http]");
    ctx.output.kv("timeout_secs", &config.http.timeout_secs.to_string());
    ctx.output.kv("user_agent", &config.http.user_agent);

    ctx.output.text("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &config.storage.resolve_dir().display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(&ctx.config.site.tenant))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

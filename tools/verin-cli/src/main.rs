//! Verin CLI - Browse the Verin storefront and place orders from a terminal.
//!
//! Commands:
//! - `verin cart` - Show and change the persisted cart
//! - `verin products` / `verin product` / `verin categories` - Browse the catalog
//! - `verin checkout` - Place an order for the cart
//! - `verin confirm` - Resolve an order confirmation link
//! - `verin news` / `verin faqs` / `verin testimonials` - Read site content
//! - `verin subscribe` / `verin contact` - Newsletter and contact forms
//! - `verin config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, CategoriesArgs, CheckoutArgs, ConfigArgs, ConfirmArgs, ContactArgs, NewsArgs,
    ProductArgs, ProductsArgs, SubscribeArgs,
};

/// Verin CLI - Shop the Verin storefront from the command line
#[derive(Parser)]
#[command(name = "verin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the cart
    Cart(CartArgs),

    /// List products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List product categories
    Categories(CategoriesArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Show the order from a confirmation link
    Confirm(ConfirmArgs),

    /// Read the news blog
    News(NewsArgs),

    /// Frequently asked questions
    Faqs,

    /// Customer testimonials
    Testimonials,

    /// Subscribe to the newsletter
    Subscribe(SubscribeArgs),

    /// Send a message to the store
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr so command output stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "verin=debug" } else { "verin=info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Categories(args) => commands::catalog::categories(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::checkout(args, &ctx).await,
        Commands::Confirm(args) => commands::checkout::confirm(args, &ctx).await,
        Commands::News(args) => commands::content::news(args, &ctx).await,
        Commands::Faqs => commands::content::faqs(&ctx).await,
        Commands::Testimonials => commands::content::testimonials(&ctx).await,
        Commands::Subscribe(args) => commands::forms::subscribe(args, &ctx).await,
        Commands::Contact(args) => commands::forms::contact(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

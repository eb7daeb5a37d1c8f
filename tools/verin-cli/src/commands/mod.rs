//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod content;
pub mod forms;

use clap::{Args, Subcommand};
use verin_commerce::{ProductId, VariantId};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add a product by slug.
    Add {
        /// Product slug.
        slug: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variant id, for products with options.
        #[arg(long)]
        variant: Option<VariantId>,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        product_id: ProductId,

        /// Variant id of the line.
        #[arg(long)]
        variant: Option<VariantId>,
    },
    /// Set a line's quantity; zero or less removes it.
    Update {
        /// Product id.
        product_id: ProductId,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Variant id of the line.
        #[arg(long)]
        variant: Option<VariantId>,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,

    /// Only popular products.
    #[arg(long)]
    pub popular: bool,

    /// Products per page.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Page number.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Search text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug.
    pub slug: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Maximum number of categories.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the checkout command.
///
/// Required fields left out are prompted for on a terminal.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Billing address.
    #[arg(long)]
    pub address: Option<String>,

    /// Shipping address, if different from the billing address.
    #[arg(long)]
    pub shipping_address: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// Note for the order.
    #[arg(long)]
    pub note: Option<String>,

    /// Place the order without confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the confirm command.
#[derive(Args)]
pub struct ConfirmArgs {
    /// Confirmation route, URL or query string.
    pub target: String,
}

/// Arguments for the news command.
#[derive(Args)]
pub struct NewsArgs {
    #[command(subcommand)]
    pub command: Option<NewsCommand>,

    /// Only the latest posts.
    #[arg(long)]
    pub recent: bool,

    /// Page number.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Posts per page.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Subcommand)]
pub enum NewsCommand {
    /// Read a post.
    Show {
        /// Post slug.
        slug: String,
    },
}

/// Arguments for the subscribe command.
#[derive(Args)]
pub struct SubscribeArgs {
    /// Email address to subscribe.
    pub email: String,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Message text.
    #[arg(short, long)]
    pub message: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default verin.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

//! Cart commands.

use std::io::IsTerminal;

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::{Confirm, Select};
use serde::Serialize;
use verin_cache::KvStore;
use verin_commerce::cart::{Cart, CartProduct, CartStore, LineKey, SelectedVariant};
use verin_commerce::catalog::{ensure_purchasable, Product, ProductVariant};
use verin_commerce::{Notice, VariantId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let result = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&cart, ctx),
        CartCommand::Add {
            slug,
            quantity,
            variant,
        } => add_item(&mut cart, &slug, quantity, variant, ctx).await,
        CartCommand::Remove {
            product_id,
            variant,
        } => {
            if cart.remove_from_cart(product_id, variant) {
                ctx.output.success("Removed from cart");
                show_cart(&cart, ctx)
            } else {
                Err(anyhow!("No cart line for product {}", product_id))
            }
        }
        CartCommand::Update {
            product_id,
            quantity,
            variant,
        } => {
            match cart.update_quantity(product_id, quantity, variant) {
                Ok(true) => show_cart(&cart, ctx),
                Ok(false) => Err(anyhow!("No cart line for product {}", product_id)),
                Err(e) => Err(e.into()),
            }
        }
        CartCommand::Clear { yes } => clear(&mut cart, yes, ctx),
    };

    cart.close();
    result
}

async fn add_item<S: KvStore>(
    cart: &mut CartStore<S>,
    slug: &str,
    quantity: u32,
    variant: Option<VariantId>,
    ctx: &Context,
) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner(&format!("Fetching {}...", slug));
    let product = api.product(slug).await;
    spinner.finish_and_clear();
    let product = product.with_context(|| format!("Failed to load product '{}'", slug))?;

    ensure_purchasable(&product)?;

    let currency = cart.cart().currency;
    let selected = match pick_variant(&product, variant)? {
        Some(v) => Some(SelectedVariant::from_variant(v, currency)?),
        None => None,
    };
    let line = CartProduct::from_product(&product, currency)?;
    let key = LineKey::new(product.id, selected.as_ref().map(|v| v.id));

    cart.add_to_cart(line, quantity, selected)?;
    ctx.output.notice(&Notice::added_to_cart(&product.name));

    if cart.get(&key).is_some_and(|item| item.exceeds_known_stock()) {
        ctx.output.warn(&format!(
            "Only {} of {} in stock; the store may not fill the whole quantity",
            product.stock, product.name
        ));
    }

    show_cart(cart, ctx)
}

/// Resolve the variant to buy: the one asked for, a prompt, or none.
fn pick_variant(product: &Product, requested: Option<VariantId>) -> Result<Option<&ProductVariant>> {
    if let Some(id) = requested {
        return match product.variant(id) {
            Some(v) => Ok(Some(v)),
            None => bail!("{} has no variant {}", product.name, id),
        };
    }
    if !product.has_variants() {
        return Ok(None);
    }
    if !std::io::stdin().is_terminal() {
        let ids: Vec<String> = product.variants.iter().map(|v| v.id.to_string()).collect();
        bail!(
            "{} comes in several options; pick one with --variant ({})",
            product.name,
            ids.join(", ")
        );
    }

    let labels: Vec<String> = product
        .variants
        .iter()
        .map(|v| format!("{} ({})", v.label(), v.price))
        .collect();
    let index = Select::new()
        .with_prompt("Choose an option")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(product.variants.get(index))
}

fn clear<S: KvStore>(cart: &mut CartStore<S>, yes: bool, ctx: &Context) -> Result<()> {
    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }
    cart.clear_cart();
    ctx.output.success("Cart cleared");
    Ok(())
}

/// One cart line as printed or emitted as JSON.
#[derive(Debug, Serialize, PartialEq)]
pub struct LineSummary {
    pub key: String,
    pub product_id: u64,
    pub variant_id: Option<u64>,
    pub name: String,
    pub option: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// The cart as printed or emitted as JSON.
#[derive(Debug, Serialize, PartialEq)]
pub struct CartSummary {
    pub currency: String,
    pub item_count: u64,
    pub total: String,
    pub items: Vec<LineSummary>,
}

/// Summarize a cart for display.
pub fn summarize(cart: &Cart) -> Result<CartSummary> {
    let items = cart
        .items()
        .iter()
        .map(|item| -> Result<LineSummary> {
            Ok(LineSummary {
                key: item.key().to_string(),
                product_id: item.product.id.get(),
                variant_id: item.selected_variant.as_ref().map(|v| v.id.get()),
                name: item.product.name.clone(),
                option: item
                    .selected_variant
                    .as_ref()
                    .map(SelectedVariant::label)
                    .filter(|label| !label.is_empty()),
                quantity: item.quantity,
                unit_price: item.unit_price().display(),
                line_total: item.line_total()?.display(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CartSummary {
        currency: cart.currency.code().to_string(),
        item_count: cart.item_count(),
        total: cart.total_price()?.display(),
        items,
    })
}

pub fn show_cart<S: KvStore>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let summary = summarize(cart.cart())?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Cart");
    if summary.items.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output
        .table_row(&["PRODUCT", "NAME", "QTY", "PRICE", "TOTAL"], &[8, 32, 5, 12, 12]);
    for line in &summary.items {
        let name = match &line.option {
            Some(option) => format!("{} ({})", line.name, option),
            None => line.name.clone(),
        };
        let id = match line.variant_id {
            Some(variant) => format!("{}/{}", line.product_id, variant),
            None => line.product_id.to_string(),
        };
        ctx.output.table_row(
            &[
                &id,
                &truncate(&name, 32),
                &line.quantity.to_string(),
                &line.unit_price,
                &line.line_total,
            ],
            &[8, 32, 5, 12, 12],
        );
    }
    ctx.output.text("");
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Total", &summary.total);
    Ok(())
}

//! Product and category browsing.

use anyhow::{Context as _, Result};
use verin_commerce::catalog::Product;
use verin_commerce::listing::{PageQuery, ProductQuery};
use verin_commerce::Currency;

use super::{CategoriesArgs, ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{html_to_text, stock_badge, truncate};

const DEFAULT_PAGE_SIZE: u32 = 12;

/// Build the listing query for the products command.
pub fn product_query(args: &ProductsArgs) -> ProductQuery {
    let mut query = ProductQuery::new();
    if let Some(category) = &args.category {
        query = query.with_category(category.clone());
    }
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    if args.featured {
        query = query.featured();
    }
    if args.popular {
        query = query.popular();
    }
    match (args.page, args.limit) {
        (Some(page), limit) => query.with_pagination(page, limit.unwrap_or(DEFAULT_PAGE_SIZE)),
        (None, Some(limit)) => query.with_limit(limit),
        (None, None) => query,
    }
}

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let query = product_query(&args);
    ctx.output.debug(&format!("query: {:?}", query.to_pairs()));

    let spinner = ctx.output.spinner("Loading products...");
    let page = api.products(&query).await;
    spinner.finish_and_clear();
    let page = page.context("Failed to load products")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Products");
    if page.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let currency = ctx.config.site.currency;
    ctx.output
        .table_row(&["SLUG", "NAME", "PRICE", "STOCK"], &[24, 32, 12, 14]);
    for product in &page.results {
        ctx.output.table_row(
            &[
                &truncate(&product.slug, 24),
                &truncate(&product.name, 32),
                &price_label(product, currency),
                &stock_badge(product.stock),
            ],
            &[24, 32, 12, 14],
        );
    }

    ctx.output.text("");
    let page_size = query.page_size.unwrap_or(page.len().max(1) as u32);
    ctx.output.info(&format!(
        "Showing {} of {} product(s), page {} of {}",
        page.len(),
        page.count,
        query.page.unwrap_or(1),
        page.total_pages(page_size).max(1)
    ));
    if page.has_next() {
        ctx.output.info("More available with --page");
    }
    Ok(())
}

/// Run the product command.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner(&format!("Loading {}...", args.slug));
    let result = api.product(&args.slug).await;
    spinner.finish_and_clear();
    let product = result.with_context(|| format!("Failed to load product '{}'", args.slug))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    let site = &ctx.config.site;
    ctx.output.header(&product.name);
    ctx.output.kv("Id", &product.id.to_string());
    ctx.output.kv("Price", &price_label(&product, site.currency));
    if let Some(category) = &product.category {
        ctx.output.kv("Category", &category.name);
    }
    ctx.output.kv("Stock", &stock_badge(product.stock));
    if product.fast_shipping {
        ctx.output.kv("Shipping", "Fast shipping");
    }
    if let Some(warranty) = product.warranty.as_deref().filter(|w| !w.trim().is_empty()) {
        ctx.output.kv("Warranty", warranty);
    }
    if let Some(image) = product.thumbnail_image.as_deref() {
        ctx.output.kv("Image", &site.image_url(image));
    }

    if product.has_variants() {
        ctx.output.text("");
        ctx.output.info("Options:");
        for variant in &product.variants {
            let stock = variant
                .stock
                .map(|s| format!(", {}", stock_badge(s)))
                .unwrap_or_default();
            ctx.output.list_item(&format!(
                "{}: {} at {}{}",
                variant.id,
                variant.label(),
                variant.price,
                stock
            ));
        }
    }

    if let Some(description) = product.description.as_deref() {
        let text = html_to_text(description);
        if !text.is_empty() {
            ctx.output.text("");
            ctx.output.text(&text);
        }
    }

    ctx.output.text("");
    ctx.output.info(&format!("Add it with: verin cart add {}", product.slug));
    Ok(())
}

/// Run the categories command.
pub async fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let mut query = PageQuery::new();
    if let Some(limit) = args.limit {
        query = query.with_page_size(limit);
    }

    let spinner = ctx.output.spinner("Loading categories...");
    let page = api.categories(&query).await;
    spinner.finish_and_clear();
    let page = page.context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Categories");
    if page.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }
    for category in &page.results {
        ctx.output
            .list_item(&format!("{} ({})", category.name, category.slug));
    }
    Ok(())
}

/// Price with the struck-through market price and discount, when any.
pub fn price_label(product: &Product, currency: Currency) -> String {
    let price = match product.unit_price(currency) {
        Ok(price) => price.display(),
        Err(_) => product.price.to_string(),
    };
    match product.market_price(currency) {
        Ok(Some(market)) if product.discount_percent() > 0 => format!(
            "{} (was {}, -{}%)",
            price,
            market.display(),
            product.discount_percent()
        ),
        _ => price,
    }
}

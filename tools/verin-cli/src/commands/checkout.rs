//! Checkout and order confirmation.

use std::io::IsTerminal;

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};
use serde_json::json;
use verin_cache::KvStore;
use verin_commerce::cart::CartStore;
use verin_commerce::checkout::{CheckoutFlow, ConfirmationView, DraftField, OrderDraft};

use super::cart::show_cart;
use super::{CheckoutArgs, ConfirmArgs};
use crate::context::Context;

/// Build the draft from command line flags.
pub fn draft_from_args(args: &CheckoutArgs) -> OrderDraft {
    let mut draft = OrderDraft::new();
    let fields = [
        (DraftField::CustomerName, &args.name),
        (DraftField::CustomerEmail, &args.email),
        (DraftField::CustomerPhone, &args.phone),
        (DraftField::CustomerAddress, &args.address),
        (DraftField::ShippingAddress, &args.shipping_address),
        (DraftField::City, &args.city),
        (DraftField::Note, &args.note),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            draft.set(field, value.as_str());
        }
    }
    draft
}

/// Run the checkout command.
pub async fn checkout(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let result = place_order(&args, &mut cart, ctx).await;
    cart.close();
    result
}

async fn place_order<S: KvStore>(
    args: &CheckoutArgs,
    cart: &mut CartStore<S>,
    ctx: &Context,
) -> Result<()> {
    let mut flow = CheckoutFlow::with_draft(draft_from_args(args));
    let interactive = std::io::stdin().is_terminal() && !ctx.output.is_json();

    if !cart.is_empty() {
        if interactive {
            prompt_missing(&mut flow)?;
        }
        show_cart(cart, ctx)?;
        let draft = flow.draft();
        ctx.output.kv("Deliver to", draft.effective_shipping_address());
        ctx.output.kv("City", &draft.city);

        if interactive && !args.yes {
            let confirmed = Confirm::new()
                .with_prompt("Place this order?")
                .default(true)
                .interact()?;
            if !confirmed {
                ctx.output.warn("Checkout cancelled");
                return Ok(());
            }
        }
    }

    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Placing order...");
    let result = flow.submit(cart, &api).await;
    spinner.finish_and_clear();

    match result {
        Ok(confirmation) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "order_id": confirmation.order_id,
                    "route": confirmation.route,
                    "notice": flow.notice(),
                }));
                return Ok(());
            }
            if let Some(notice) = flow.notice() {
                ctx.output.notice(notice);
            }
            ctx.output.kv("Order", confirmation.order_id.as_str());
            ctx.output.kv("Confirmation", &confirmation.route);
            Ok(())
        }
        Err(err) => {
            ctx.output.debug(&format!("checkout failed: {}", err));
            let message = flow
                .notice()
                .map(|notice| notice.message.clone())
                .unwrap_or_else(|| err.to_string());
            bail!("{}", message)
        }
    }
}

/// Ask for each required field that is still blank.
fn prompt_missing(flow: &mut CheckoutFlow) -> Result<()> {
    for field in DraftField::ALL {
        if !field.is_required() || !flow.draft().get(field).trim().is_empty() {
            continue;
        }
        let value: String = Input::new()
            .with_prompt(field.display_name())
            .interact_text()?;
        flow.set_field(field, value)?;
    }
    Ok(())
}

/// Run the confirm command.
pub async fn confirm(args: ConfirmArgs, ctx: &Context) -> Result<()> {
    let view = ConfirmationView::resolve(&args.target);

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    match view.order_id() {
        Some(order_id) => {
            ctx.output.header("Order confirmed");
            ctx.output.success(&format!("Thank you! Your order #{} has been placed.", order_id));
        }
        None => ctx.output.info("No order to show; returning to the home page (/)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_from_args() {
        let args = CheckoutArgs {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: None,
            address: Some("1 Analytical Way".into()),
            shipping_address: Some("  ".into()),
            city: Some("London".into()),
            note: None,
            yes: true,
        };

        let draft = draft_from_args(&args);
        assert_eq!(draft.customer_name, "Ada Lovelace");
        assert_eq!(draft.shipping_address, None);
        assert_eq!(draft.effective_shipping_address(), "1 Analytical Way");
        assert_eq!(draft.missing_fields(), vec![DraftField::CustomerPhone]);
    }
}

//! Newsletter and contact forms.

use anyhow::{bail, Result};
use verin_commerce::content::{ContactForm, ContactSubmission, NewsletterSubscription};

use super::{ContactArgs, SubscribeArgs};
use crate::context::Context;

/// Run the subscribe command.
pub async fn subscribe(args: SubscribeArgs, ctx: &Context) -> Result<()> {
    let subscription = NewsletterSubscription::new(&args.email)?;
    let api = ctx.api()?;

    let spinner = ctx.output.spinner("Subscribing...");
    let result = api.subscribe(&subscription).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            let notice = NewsletterSubscription::success_notice();
            if ctx.output.is_json() {
                ctx.output.json(&notice);
            } else {
                ctx.output.notice(&notice);
            }
            Ok(())
        }
        Err(err) => {
            ctx.output.debug(&format!("subscribe failed: {}", err));
            let notice = NewsletterSubscription::failure_notice(err.server_message().as_deref());
            bail!("{}", notice.message)
        }
    }
}

/// Build the contact form from flags.
pub fn contact_form(args: &ContactArgs) -> ContactForm {
    ContactForm {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        message: args.message.clone(),
    }
}

/// Run the contact command.
pub async fn contact(args: ContactArgs, ctx: &Context) -> Result<()> {
    let submission = contact_form(&args).submission()?;
    let api = ctx.api()?;

    let spinner = ctx.output.spinner("Sending message...");
    let result = api.contact(&submission).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            let notice = ContactSubmission::success_notice();
            if ctx.output.is_json() {
                ctx.output.json(&notice);
            } else {
                ctx.output.notice(&notice);
            }
            Ok(())
        }
        Err(err) => {
            ctx.output.debug(&format!("contact failed: {}", err));
            bail!("{}", ContactSubmission::failure_notice().message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_from_args() {
        let args = ContactArgs {
            first_name: "Ada".into(),
            last_name: String::new(),
            email: "ada@example.com".into(),
            phone: String::new(),
            message: "Hello".into(),
        };

        let submission = contact_form(&args).submission().unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email.as_str(), "ada@example.com");
        assert_eq!(submission.phone_number, "");
    }
}

//! News, FAQs and testimonials.

use anyhow::{Context as _, Result};
use verin_commerce::content::BlogPost;
use verin_commerce::listing::PageQuery;

use super::{NewsArgs, NewsCommand};
use crate::context::Context;
use crate::output::{html_to_text, truncate};

/// Run the news command.
pub async fn news(args: NewsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;

    if let Some(NewsCommand::Show { slug }) = args.command {
        let spinner = ctx.output.spinner("Loading post...");
        let post = api.blog(&slug).await;
        spinner.finish_and_clear();
        let post = post.with_context(|| format!("Failed to load post '{}'", slug))?;
        return show_post(&post, ctx);
    }

    let spinner = ctx.output.spinner("Loading news...");
    let posts = if args.recent {
        api.recent_blogs().await
    } else {
        let mut query = PageQuery::new();
        if let Some(page) = args.page {
            query = query.with_page(page);
        }
        if let Some(limit) = args.limit {
            query = query.with_page_size(limit);
        }
        api.blogs(&query).await.map(|page| page.results)
    };
    spinner.finish_and_clear();
    let posts = posts.context("Failed to load news")?;

    if ctx.output.is_json() {
        ctx.output.json(&posts);
        return Ok(());
    }

    ctx.output
        .header(if args.recent { "Recent news" } else { "News" });
    if posts.is_empty() {
        ctx.output.info("No posts yet.");
        return Ok(());
    }
    for post in &posts {
        ctx.output.list_item(&post_line(post));
    }
    ctx.output.text("");
    ctx.output.info("Read one with: verin news show <slug>");
    Ok(())
}

/// One-line listing entry for a post.
pub fn post_line(post: &BlogPost) -> String {
    let mut line = format!("{} [{}]", truncate(&post.title, 60), post.slug);
    if let Some(date) = post.published_label() {
        line.push_str(&format!(" · {}", date));
    }
    line.push_str(&format!(" · {}", post.read_time_label()));
    line
}

fn show_post(post: &BlogPost, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(post);
        return Ok(());
    }

    ctx.output.header(&post.title);
    if let Some(tag) = post.primary_tag() {
        ctx.output.kv("Tag", tag);
    }
    if let Some(author) = post.author_name() {
        ctx.output.kv("By", &author);
    }
    if let Some(date) = post.published_label() {
        ctx.output.kv("Published", &date);
    }
    ctx.output.kv("Length", &post.read_time_label());
    if let Some(image) = post.thumbnail_image.as_deref() {
        ctx.output.kv("Image", &ctx.config.site.image_url(image));
    }

    let body = post
        .content
        .as_deref()
        .or(post.meta_description.as_deref())
        .map(html_to_text)
        .unwrap_or_default();
    if !body.is_empty() {
        ctx.output.text("");
        ctx.output.text(&body);
    }
    Ok(())
}

/// Run the faqs command.
pub async fn faqs(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading FAQs...");
    let faqs = api.faqs().await;
    spinner.finish_and_clear();
    let faqs = faqs.context("Failed to load FAQs")?;

    if ctx.output.is_json() {
        ctx.output.json(&faqs);
        return Ok(());
    }

    ctx.output.header("Frequently asked questions");
    for faq in &faqs {
        ctx.output.text("");
        ctx.output.text(&console::style(&faq.question).bold().to_string());
        ctx.output.text(&html_to_text(&faq.answer));
    }
    Ok(())
}

/// Run the testimonials command.
pub async fn testimonials(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading testimonials...");
    let testimonials = api.testimonials().await;
    spinner.finish_and_clear();
    let testimonials = testimonials.context("Failed to load testimonials")?;

    if ctx.output.is_json() {
        ctx.output.json(&testimonials);
        return Ok(());
    }

    ctx.output.header("What our customers say");
    for testimonial in &testimonials {
        ctx.output.text("");
        ctx.output.text(&format!("“{}”", testimonial.comment.trim()));
        ctx.output.text(&format!("  - {}", testimonial.byline()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_line() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": 1,
            "title": "Caring for linen",
            "slug": "caring-for-linen",
            "created_at": "2024-03-05T10:00:00Z",
            "time_to_read": "4 min"
        }))
        .unwrap();
        assert_eq!(
            post_line(&post),
            "Caring for linen [caring-for-linen] · March 5, 2024 · 4 min read"
        );
    }

    #[test]
    fn test_post_line_defaults() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": 2,
            "title": "Spring edit",
            "slug": "spring-edit"
        }))
        .unwrap();
        assert_eq!(post_line(&post), "Spring edit [spring-edit] · 5 min read");
    }
}

//! Typed access to the storefront REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use verin_commerce::catalog::{Category, Product};
use verin_commerce::checkout::{CreatedOrder, OrderGateway, OrderPayload};
use verin_commerce::content::{
    BlogPost, ContactSubmission, Faq, NewsletterSubscription, Testimonial,
};
use verin_commerce::listing::{Page, PageQuery, ProductQuery};
use verin_commerce::CommerceError;

use crate::{Endpoint, FetchClient, FetchError, HttpConfig, Response, SiteConfig};

/// A listing that may come back paginated or as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    fn into_page(self) -> Page<T> {
        match self {
            Listing::Plain(items) => Page::single(items),
            Listing::Paged(page) => page,
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.into_page().results
    }
}

/// Client for one tenant's storefront API.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
}

impl StorefrontApi {
    /// Build a client for `site` with the given transport settings.
    pub fn new(site: SiteConfig, http: &HttpConfig) -> Result<Self, FetchError> {
        let client = FetchClient::from_config(http)?
            .with_base_url(site.api_base_url())
            .with_default_header("Accept", "application/json");
        Ok(Self { client })
    }

    /// One page of products.
    #[instrument(skip(self), level = "debug")]
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, FetchError> {
        let listing: Listing<Product> = self.get(Endpoint::Products, query.to_pairs()).await?;
        let page = listing.into_page();
        debug!(count = page.count, returned = page.len(), "fetched products");
        Ok(page)
    }

    /// A single product by slug.
    #[instrument(skip(self), level = "debug")]
    pub async fn product(&self, slug: &str) -> Result<Product, FetchError> {
        self.get(Endpoint::product(slug)?, Vec::new()).await
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn categories(&self, query: &PageQuery) -> Result<Page<Category>, FetchError> {
        let listing: Listing<Category> =
            self.get(Endpoint::Categories, query.to_pairs()).await?;
        Ok(listing.into_page())
    }

    /// One page of blog posts.
    #[instrument(skip(self), level = "debug")]
    pub async fn blogs(&self, query: &PageQuery) -> Result<Page<BlogPost>, FetchError> {
        let listing: Listing<BlogPost> = self.get(Endpoint::Blogs, query.to_pairs()).await?;
        Ok(listing.into_page())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn blog(&self, slug: &str) -> Result<BlogPost, FetchError> {
        self.get(Endpoint::blog(slug)?, Vec::new()).await
    }

    /// The latest posts, as shown beside an article.
    #[instrument(skip(self), level = "debug")]
    pub async fn recent_blogs(&self) -> Result<Vec<BlogPost>, FetchError> {
        let listing: Listing<BlogPost> = self.get(Endpoint::RecentBlogs, Vec::new()).await?;
        Ok(listing.into_vec())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn faqs(&self) -> Result<Vec<Faq>, FetchError> {
        let listing: Listing<Faq> = self.get(Endpoint::Faqs, Vec::new()).await?;
        Ok(listing.into_vec())
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, FetchError> {
        let listing: Listing<Testimonial> = self.get(Endpoint::Testimonials, Vec::new()).await?;
        Ok(listing.into_vec())
    }

    /// Subscribe an address to the newsletter.
    ///
    /// A rejected subscription is an `HttpError`; its
    /// [`server_message`](FetchError::server_message) is what to show.
    #[instrument(skip_all, level = "debug")]
    pub async fn subscribe(&self, subscription: &NewsletterSubscription) -> Result<(), FetchError> {
        self.post(Endpoint::Newsletter, subscription).await?;
        info!("newsletter subscription accepted");
        Ok(())
    }

    /// Send a contact message.
    #[instrument(skip_all, level = "debug")]
    pub async fn contact(&self, submission: &ContactSubmission) -> Result<(), FetchError> {
        self.post(Endpoint::Contact, submission).await?;
        info!("contact message sent");
        Ok(())
    }

    /// Create an order.
    #[instrument(skip_all, fields(items = payload.items.len()), level = "debug")]
    pub async fn place_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, FetchError> {
        let order: CreatedOrder = self.post(Endpoint::Orders, payload).await?.json()?;
        info!(order_id = %order.id, "order created");
        Ok(order)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, FetchError> {
        self.client
            .request(endpoint.method(), endpoint.path())
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Response, FetchError> {
        self.client
            .request(endpoint.method(), endpoint.path())
            .json(body)?
            .send()
            .await?
            .error_for_status()
    }
}

#[async_trait]
impl OrderGateway for StorefrontApi {
    async fn create_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, CommerceError> {
        Ok(self.place_order(payload).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_accepts_plain_arrays() {
        let listing: Listing<Faq> = serde_json::from_value(json!([
            {"id": 1, "question": "Do you ship abroad?", "answer": "Yes."}
        ]))
        .unwrap();
        let page = listing.into_page();
        assert_eq!(page.count, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_listing_accepts_pages() {
        let listing: Listing<Faq> = serde_json::from_value(json!({
            "count": 7,
            "next": "https://shop.test/api/faq/?page=2",
            "previous": null,
            "results": [{"question": "Returns?", "answer": "30 days."}]
        }))
        .unwrap();
        let page = listing.into_page();
        assert_eq!(page.count, 7);
        assert!(page.has_next());
        assert_eq!(page.results[0].question, "Returns?");
    }
}

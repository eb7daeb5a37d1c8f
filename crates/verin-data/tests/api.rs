//! Storefront API client against a mock server.

use serde_json::json;
use verin_cache::MemoryStore;
use verin_commerce::cart::{CartProduct, CartStore};
use verin_commerce::checkout::{
    CheckoutError, CheckoutFlow, CheckoutState, DraftField, OrderGateway,
};
use verin_commerce::content::{ContactForm, NewsletterSubscription};
use verin_commerce::listing::{PageQuery, ProductQuery};
use verin_commerce::{CommerceError, Currency};
use verin_data::{FetchError, HttpConfig, SiteConfig, StorefrontApi};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> StorefrontApi {
    let site = SiteConfig::default()
        .with_api_base_url(server.uri())
        .with_media_base_url(format!("{}/media", server.uri()));
    StorefrontApi::new(site, &HttpConfig::default()).unwrap()
}

fn shirt() -> CartProduct {
    CartProduct::normalize(
        &json!({"id": 12, "name": "Linen Shirt", "price": "20.00", "stock": 5}),
        Currency::USD,
    )
    .unwrap()
}

fn filled_flow() -> CheckoutFlow {
    let mut flow = CheckoutFlow::new();
    flow.set_field(DraftField::CustomerName, "Ada Lovelace").unwrap();
    flow.set_field(DraftField::CustomerEmail, "ada@example.com").unwrap();
    flow.set_field(DraftField::CustomerPhone, "9800000000").unwrap();
    flow.set_field(DraftField::CustomerAddress, "1 Analytical Way").unwrap();
    flow.set_field(DraftField::City, "London").unwrap();
    flow
}

#[tokio::test]
async fn test_checkout_posts_order_and_clears_cart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "customer_name": "Ada Lovelace",
            "customer_email": "ada@example.com",
            "customer_phone": "9800000000",
            "customer_address": "1 Analytical Way",
            "shipping_address": "1 Analytical Way",
            "city": "London",
            "note": "",
            "total_amount": "60.00",
            "delivery_charge": "0.00",
            "items": [
                {"product_id": 12, "variant_id": null, "quantity": 3, "price": "20.00"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 123,
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_to_cart(shirt(), 3, None).unwrap();
    let mut flow = filled_flow();

    let confirmation = flow.submit(&mut cart, &api).await.unwrap();

    assert_eq!(confirmation.route, "/checkout/success?orderId=123");
    assert_eq!(cart.item_count(), 0);
    assert!(cart.total_price().unwrap().is_zero());
    assert!(matches!(flow.state(), CheckoutState::Succeeded { .. }));
}

#[tokio::test]
async fn test_rejected_order_keeps_cart_and_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_to_cart(shirt(), 1, None).unwrap();
    let mut flow = filled_flow();

    let err = flow.submit(&mut cart, &api).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Gateway(CommerceError::Gateway(_))));
    assert_eq!(
        flow.notice().map(|n| n.message.as_str()),
        Some("Failed to place order. Please try again.")
    );
    assert_eq!(cart.item_count(), 1);
    assert_eq!(flow.draft().get(DraftField::City), "London");
    assert_eq!(flow.state(), &CheckoutState::Failed);
}

#[tokio::test]
async fn test_empty_cart_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let api = api(&server);
    let mut cart = CartStore::open(MemoryStore::new());
    let mut flow = filled_flow();

    let err = flow.submit(&mut cart, &api).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
}

#[tokio::test]
async fn test_order_gateway_reply_without_id_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/order/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let api = api(&server);
    let mut cart = CartStore::open(MemoryStore::new());
    cart.add_to_cart(shirt(), 1, None).unwrap();
    let payload = verin_commerce::checkout::OrderPayload::build(
        filled_flow().draft(),
        cart.cart(),
    )
    .unwrap();

    let err = api.create_order(&payload).await.unwrap_err();
    assert!(matches!(err, CommerceError::Gateway(_)));
}

#[tokio::test]
async fn test_products_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/"))
        .and(query_param("category", "shirts"))
        .and(query_param("is_featured", "true"))
        .and(query_param("page_size", "4"))
        .and(query_param_is_missing("page"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 9,
            "next": format!("{}/api/product/?page=2", server.uri()),
            "previous": null,
            "results": [{
                "id": 12,
                "name": "Linen Shirt",
                "slug": "linen-shirt",
                "price": "20.00",
                "market_price": "25.00",
                "stock": 5,
                "thumbnail_image": "products/linen.jpg",
                "category": {"id": 3, "name": "Shirts", "slug": "shirts"},
                "is_featured": true,
                "variants": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ProductQuery::new()
        .with_category("shirts")
        .featured()
        .with_limit(4);
    let page = api(&server).products(&query).await.unwrap();

    assert_eq!(page.count, 9);
    assert!(page.has_next());
    let product = &page.results[0];
    assert_eq!(product.slug, "linen-shirt");
    assert_eq!(product.price, rust_decimal::Decimal::new(2000, 2));
    assert_eq!(product.discount_percent(), 20);
}

#[tokio::test]
async fn test_products_sends_page_when_paginating() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 13,
            "next": null,
            "previous": format!("{}/api/product/?page=1", server.uri()),
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ProductQuery::new().with_pagination(2, 12);
    let page = api(&server).products(&query).await.unwrap();

    assert_eq!(page.count, 13);
    assert!(!page.has_next());
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product/ghost/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = api(&server).product("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message().as_deref(), Some("Not found."));
}

#[tokio::test]
async fn test_categories_and_blogs_paginate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/category/"))
        .and(query_param("page_size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"id": 3, "name": "Shirts", "slug": "shirts"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blogs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{
                "id": 1,
                "title": "Caring for linen",
                "slug": "caring-for-linen",
                "time_to_read": 4,
                "created_at": "2024-03-05T10:00:00Z",
                "tags": [{"name": "Care"}]
            }]
        })))
        .mount(&server)
        .await;

    let api = api(&server);
    let categories = api
        .categories(&PageQuery::new().with_page_size(50))
        .await
        .unwrap();
    assert_eq!(categories.results[0].slug, "shirts");

    let blogs = api.blogs(&PageQuery::new()).await.unwrap();
    let post = &blogs.results[0];
    assert_eq!(post.primary_tag(), Some("Care"));
    assert_eq!(post.published_label().as_deref(), Some("March 5, 2024"));
}

#[tokio::test]
async fn test_plain_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/faq/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "question": "Do you ship abroad?", "answer": "Yes."},
            {"id": 2, "question": "Returns?", "answer": "Within 30 days."}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/testimonial/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Mira", "designation": "Stylist", "comment": "Lovely."}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blogs/recent/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = api(&server);
    assert_eq!(api.faqs().await.unwrap().len(), 2);
    assert_eq!(api.testimonials().await.unwrap()[0].byline(), "Mira, Stylist");
    assert!(api.recent_blogs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_subscribe_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/newsletter/"))
        .and(body_json(json!({"email": "taken@example.com"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["newsletter with this email already exists."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subscription = NewsletterSubscription::new("taken@example.com").unwrap();
    let err = api(&server).subscribe(&subscription).await.unwrap_err();

    let notice = NewsletterSubscription::failure_notice(err.server_message().as_deref());
    assert_eq!(notice.message, "newsletter with this email already exists.");
}

#[tokio::test]
async fn test_contact_posts_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact/"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone_number": "9800000000",
            "message": "Do you restock the navy shirt?"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let form = ContactForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "9800000000".into(),
        message: "Do you restock the navy shirt?".into(),
    };
    api(&server)
        .contact(&form.submission().unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    let site = SiteConfig::default().with_api_base_url("http://127.0.0.1:9");
    let http = HttpConfig {
        timeout_secs: 2,
        ..HttpConfig::default()
    };
    let api = StorefrontApi::new(site, &http).unwrap();

    let err = api.faqs().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::RequestError(_) | FetchError::Timeout
    ));
}

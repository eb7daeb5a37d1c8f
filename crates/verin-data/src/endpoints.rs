//! Storefront API routes.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{FetchError, Method};

/// Characters left as-is in a slug segment.
const SLUG_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A route on the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Products,
    Product(String),
    Categories,
    Blogs,
    Blog(String),
    RecentBlogs,
    Faqs,
    Testimonials,
    Orders,
    Newsletter,
    Contact,
}

impl Endpoint {
    /// Route for one product. Rejects slugs that are empty or a dot segment.
    pub fn product(slug: &str) -> Result<Self, FetchError> {
        checked_slug(slug).map(Endpoint::Product)
    }

    /// Route for one blog post. Rejects slugs that are empty or a dot segment.
    pub fn blog(slug: &str) -> Result<Self, FetchError> {
        checked_slug(slug).map(Endpoint::Blog)
    }

    /// Path relative to the API base, with a trailing slash.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Products => "/api/product/".to_string(),
            Endpoint::Product(slug) => format!("/api/product/{}/", encode_segment(slug)),
            Endpoint::Categories => "/api/category/".to_string(),
            Endpoint::Blogs => "/api/blogs/".to_string(),
            Endpoint::Blog(slug) => format!("/api/blogs/{}/", encode_segment(slug)),
            Endpoint::RecentBlogs => "/api/blogs/recent/".to_string(),
            Endpoint::Faqs => "/api/faq/".to_string(),
            Endpoint::Testimonials => "/api/testimonial/".to_string(),
            Endpoint::Orders => "/api/order/".to_string(),
            Endpoint::Newsletter => "/api/newsletter/".to_string(),
            Endpoint::Contact => "/api/contact/".to_string(),
        }
    }

    /// The method the storefront expects on this route.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Orders | Endpoint::Newsletter | Endpoint::Contact => Method::Post,
            _ => Method::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

fn checked_slug(slug: &str) -> Result<String, FetchError> {
    let slug = slug.trim();
    if slug.is_empty() || slug == "." || slug == ".." {
        return Err(FetchError::InvalidUrl(format!("invalid slug '{}'", slug)));
    }
    Ok(slug.to_string())
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment.trim(), SLUG_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Products.path(), "/api/product/");
        assert_eq!(
            Endpoint::Product("linen-shirt".into()).path(),
            "/api/product/linen-shirt/"
        );
        assert_eq!(Endpoint::RecentBlogs.path(), "/api/blogs/recent/");
        assert_eq!(Endpoint::Testimonials.path(), "/api/testimonial/");
    }

    #[test]
    fn test_slug_cannot_escape_route() {
        assert_eq!(
            Endpoint::Blog("../order/?x=1".into()).path(),
            "/api/blogs/..%2Forder%2F%3Fx%3D1/"
        );
        for slug in ["..", ".", " .. ", ""] {
            assert!(matches!(Endpoint::blog(slug), Err(FetchError::InvalidUrl(_))));
            assert!(Endpoint::product(slug).is_err());
        }
        assert_eq!(
            Endpoint::product("linen-shirt").unwrap(),
            Endpoint::Product("linen-shirt".into())
        );
    }

    #[test]
    fn test_slug_space_is_percent_encoded() {
        assert_eq!(
            Endpoint::Product("summer linen".into()).path(),
            "/api/product/summer%20linen/"
        );
        assert_eq!(
            Endpoint::Blog("café_notes.v2~".into()).path(),
            "/api/blogs/caf%C3%A9_notes.v2~/"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Orders.method(), Method::Post);
        assert_eq!(Endpoint::Newsletter.method(), Method::Post);
        assert_eq!(Endpoint::Faqs.method(), Method::Get);
        assert_eq!(Endpoint::Orders.to_string(), "POST /api/order/");
    }
}

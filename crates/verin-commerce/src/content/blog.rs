//! Blog posts ("news").

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::null_as_default;
use crate::ids::BlogId;

const DEFAULT_READ_TIME: &str = "5 min";

/// A blog post as served by `/api/blogs/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: BlogId,
    pub title: String,
    pub slug: String,
    /// HTML body. Omitted from list responses.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub thumbnail_image_alt_description: Option<String>,
    /// e.g. "5 min"; some servers send a bare number of minutes.
    #[serde(default, deserialize_with = "text_or_number")]
    pub time_to_read: Option<String>,
    /// ISO 8601 timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<BlogTag>,
    #[serde(default)]
    pub author: Option<BlogAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogTag {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogAuthor {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl BlogAuthor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl BlogPost {
    /// The first tag, used as the post's category label.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(|t| t.name.as_str())
    }

    pub fn author_name(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(BlogAuthor::full_name)
            .filter(|name| !name.is_empty())
    }

    /// "<time> read", defaulting to five minutes.
    pub fn read_time_label(&self) -> String {
        let time = self
            .time_to_read
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_READ_TIME);
        format!("{} read", time)
    }

    /// Publication date parsed from `created_at`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
    }

    /// e.g. "May 1, 2024".
    pub fn published_label(&self) -> Option<String> {
        self.published_on()
            .map(|d| d.format("%B %-d, %Y").to_string())
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Number(n)) => Some(format!("{} min", n)),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> BlogPost {
        serde_json::from_value(json!({
            "id": 8,
            "title": "Summer Edit",
            "slug": "summer-edit",
            "content": "<p>Linen season.</p>",
            "meta_description": "What to wear",
            "thumbnail_image": "blogs/summer.jpg",
            "time_to_read": "4 min",
            "created_at": "2024-05-01T09:30:00.000000+05:45",
            "tags": [{"name": "Style"}, {"name": "Summer"}],
            "author": {"first_name": "Ada", "last_name": "Lane"}
        }))
        .unwrap()
    }

    #[test]
    fn test_blog_from_api() {
        let post = post();
        assert_eq!(post.id, BlogId::new(8));
        assert_eq!(post.primary_tag(), Some("Style"));
        assert_eq!(post.author_name().as_deref(), Some("Ada Lane"));
        assert_eq!(post.read_time_label(), "4 min read");
    }

    #[test]
    fn test_published_date() {
        let post = post();
        assert_eq!(post.published_on(), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(post.published_label().as_deref(), Some("May 1, 2024"));
    }

    #[test]
    fn test_list_shape_defaults() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": "9",
            "title": "Short",
            "slug": "short",
            "time_to_read": 3,
            "created_at": "2024-06-10",
            "tags": null,
            "author": null
        }))
        .unwrap();

        assert_eq!(post.content, None);
        assert_eq!(post.primary_tag(), None);
        assert_eq!(post.author_name(), None);
        assert_eq!(post.read_time_label(), "3 min read");
        assert_eq!(post.published_on(), NaiveDate::from_ymd_opt(2024, 6, 10));
    }

    #[test]
    fn test_read_time_default() {
        let mut post = post();
        post.time_to_read = None;
        assert_eq!(post.read_time_label(), "5 min read");
    }
}

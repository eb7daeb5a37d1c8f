//! FAQ entries and testimonials.

use serde::{Deserialize, Serialize};

use crate::ids::{FaqId, TestimonialId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faq {
    #[serde(default)]
    pub id: Option<FaqId>,
    pub question: String,
    pub answer: String,
}

/// A customer quote shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    pub comment: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Testimonial {
    /// "Name, Designation" or just the name.
    pub fn byline(&self) -> String {
        match self.designation.as_deref().map(str::trim) {
            Some(role) if !role.is_empty() => format!("{}, {}", self.name, role),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_faq_from_api() {
        let faq: Faq =
            serde_json::from_value(json!({"question": "Returns?", "answer": "30 days."})).unwrap();
        assert_eq!(faq.id, None);
        assert_eq!(faq.answer, "30 days.");
    }

    #[test]
    fn test_testimonial_byline() {
        let mut t: Testimonial = serde_json::from_value(json!({
            "id": 2, "name": "Mira", "designation": "Stylist", "comment": "Lovely fabric."
        }))
        .unwrap();
        assert_eq!(t.byline(), "Mira, Stylist");

        t.designation = Some(" ".into());
        assert_eq!(t.byline(), "Mira");
    }
}

//! Newsletter and contact forms.

use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::notice::{messages, Notice};
use crate::CommerceError;

/// The body of `POST /api/newsletter/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: Email,
}

impl NewsletterSubscription {
    pub fn new(email: &str) -> Result<Self, CommerceError> {
        let email = Email::parse(email)
            .map_err(|e| CommerceError::ValidationError(format!("Email {}", e)))?;
        Ok(Self { email })
    }

    pub fn success_notice() -> Notice {
        Notice::success(messages::SUBSCRIBED)
    }

    /// The server's message when it sent one, otherwise the generic text.
    pub fn failure_notice(server_message: Option<&str>) -> Notice {
        match server_message.map(str::trim) {
            Some(message) if !message.is_empty() => Notice::error(message),
            _ => Notice::error(messages::SUBSCRIBE_FAILED),
        }
    }
}

/// The contact form as the user fills it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Validate and convert to the request body.
    pub fn submission(&self) -> Result<ContactSubmission, CommerceError> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(CommerceError::ValidationError("Name is required".into()));
        }
        let email = Email::parse(&self.email)
            .map_err(|e| CommerceError::ValidationError(format!("Email {}", e)))?;
        let message = self.message.trim();
        if message.is_empty() {
            return Err(CommerceError::ValidationError("Message is required".into()));
        }

        Ok(ContactSubmission {
            name,
            email,
            phone_number: self.phone.trim().to_string(),
            message: message.to_string(),
        })
    }
}

/// The body of `POST /api/contact/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub phone_number: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn success_notice() -> Notice {
        Notice::success(messages::MESSAGE_SENT)
    }

    pub fn failure_notice() -> Notice {
        Notice::error(messages::MESSAGE_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_newsletter_body() {
        let sub = NewsletterSubscription::new(" reader@example.com ").unwrap();
        assert_eq!(
            serde_json::to_value(&sub).unwrap(),
            json!({"email": "reader@example.com"})
        );
        assert!(NewsletterSubscription::new("reader").is_err());
    }

    #[test]
    fn test_newsletter_notices() {
        assert_eq!(
            NewsletterSubscription::success_notice().message,
            "Successfully subscribed to newsletter!"
        );
        assert_eq!(
            NewsletterSubscription::failure_notice(None).message,
            "Failed to subscribe. Please try again."
        );
        assert_eq!(
            NewsletterSubscription::failure_notice(Some("Already subscribed")).message,
            "Already subscribed"
        );
    }

    #[test]
    fn test_contact_submission() {
        let form = ContactForm {
            first_name: "Ada".into(),
            last_name: "".into(),
            email: "ada@example.com".into(),
            phone: " 98000 ".into(),
            message: "Do you ship abroad?".into(),
        };
        let body = form.submission().unwrap();

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "phone_number": "98000",
                "message": "Do you ship abroad?"
            })
        );
    }

    #[test]
    fn test_contact_requires_fields() {
        let form = ContactForm {
            email: "ada@example.com".into(),
            message: "hi".into(),
            ..ContactForm::default()
        };
        assert!(matches!(
            form.submission(),
            Err(CommerceError::ValidationError(ref m)) if m == "Name is required"
        ));

        let form = ContactForm {
            first_name: "Ada".into(),
            email: "ada@example.com".into(),
            ..ContactForm::default()
        };
        assert!(form.submission().is_err());
        assert_eq!(ContactSubmission::failure_notice().message, "Failed to send message");
    }
}

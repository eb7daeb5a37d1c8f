//! Content module.
//!
//! Contains the blog, FAQ and testimonial records shown alongside the
//! catalog, and the newsletter and contact forms.

mod blog;
mod faq;
mod forms;

pub use blog::{BlogAuthor, BlogPost, BlogTag};
pub use faq::{Faq, Testimonial};
pub use forms::{ContactForm, ContactSubmission, NewsletterSubscription};

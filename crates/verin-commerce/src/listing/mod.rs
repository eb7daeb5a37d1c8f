//! Listing module.
//!
//! Contains the query builders and the paginated envelope used by the
//! product, category and blog listings.

mod page;
mod query;

pub use page::Page;
pub use query::{PageQuery, ProductQuery};
